//! Show video metadata.

use std::path::PathBuf;

use motionscope_common::config::AppConfig;
use motionscope_media_engine::{probe_video, FfmpegBackend};

pub fn run(config: &AppConfig, video: PathBuf) -> anyhow::Result<()> {
    let backend = FfmpegBackend::from_config(&config.analysis);
    let metadata = probe_video(&backend, &video)?;

    println!("Video: {}", video.display());
    println!(
        "  Frame rate: {} ({:.3}fps)",
        metadata.frame_rate(),
        metadata.fps()
    );
    println!("  Duration: {:.2}s", metadata.duration_secs());
    println!("  Estimated frames: {}", metadata.estimated_total_frames());
    Ok(())
}
