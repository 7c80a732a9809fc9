//! Motionscope CLI: motion analysis of video files.
//!
//! Usage:
//!   motionscope analyze <VIDEO>   Analyze a video and save the report
//!   motionscope report <ID>       Show a saved report
//!   motionscope list              List saved reports, newest first
//!   motionscope probe <VIDEO>     Show frame rate and duration only
//!   motionscope check             Check for ffmpeg and ffprobe

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use motionscope_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "motionscope",
    about = "Detect bursts of motion in video files",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a video for motion events
    Analyze {
        /// Path to the video file
        video: PathBuf,

        /// Directory reports are saved to
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Frames sampled per second of video
        #[arg(long)]
        sample_fps: Option<f64>,

        /// Image format for sampled frames: jpg|png
        #[arg(long)]
        frame_format: Option<String>,

        /// Do not save the report
        #[arg(long)]
        no_save: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a saved report
    Report {
        /// Report id
        id: String,

        /// Directory reports are saved to
        #[arg(long)]
        reports_dir: Option<PathBuf>,
    },

    /// List saved reports, newest first
    List {
        /// Directory reports are saved to
        #[arg(long)]
        reports_dir: Option<PathBuf>,
    },

    /// Show video metadata without analyzing motion
    Probe {
        /// Path to the video file
        video: PathBuf,
    },

    /// Check that the media tools are installed
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    motionscope_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Analyze {
            video,
            reports_dir,
            sample_fps,
            frame_format,
            no_save,
            json,
        } => {
            if let Some(dir) = reports_dir {
                config.reports_dir = dir;
            }
            if let Some(rate) = sample_fps {
                config.analysis.sample_fps = rate;
            }
            if let Some(format) = frame_format {
                config.analysis.frame_format = format;
            }
            commands::analyze::run(&config, video, !no_save, json).await
        }
        Commands::Report { id, reports_dir } => {
            commands::report::run(&reports_dir.unwrap_or(config.reports_dir), &id)
        }
        Commands::List { reports_dir } => {
            commands::list::run(&reports_dir.unwrap_or(config.reports_dir))
        }
        Commands::Probe { video } => commands::probe::run(&config, video),
        Commands::Check => commands::check::run(&config),
    }
}
