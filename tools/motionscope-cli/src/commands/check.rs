//! Check for the media tools the analyzer shells out to.

use motionscope_common::config::AppConfig;
use motionscope_media_engine::ffmpeg::tool_runs;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Motionscope System Check");
    println!("{}", "=".repeat(50));

    let tools = [
        ("ffmpeg", &config.analysis.ffmpeg_path),
        ("ffprobe", &config.analysis.ffprobe_path),
    ];

    let mut all_ok = true;
    for (name, path) in tools {
        if tool_runs(path) {
            println!("[OK] {name}: {}", path.display());
        } else {
            all_ok = false;
            println!("[MISSING] {name}: {} did not run", path.display());
        }
    }

    println!("[OK] Reports directory: {}", config.reports_dir.display());

    println!();
    if all_ok {
        println!("All required tools are available. Motionscope is ready.");
    } else {
        println!("Install ffmpeg (which ships ffprobe) or set its path in the config file.");
    }

    Ok(())
}
