//! Analyze a video for motion events.

use std::path::PathBuf;
use std::sync::Arc;

use motionscope_common::clock::ReportStamp;
use motionscope_common::config::AppConfig;
use motionscope_media_engine::{analyze_video, AnalysisOptions, AnalysisRequest, FfmpegBackend};
use motionscope_report_model::report::AnalysisResult;
use motionscope_report_model::store::ReportStore;

pub async fn run(config: &AppConfig, video: PathBuf, save: bool, json: bool) -> anyhow::Result<()> {
    let options = AnalysisOptions::from_config(&config.analysis)?;
    let backend = Arc::new(FfmpegBackend::from_config(&config.analysis));

    let request = AnalysisRequest::new(&video, ReportStamp::now());
    if !json {
        println!("Analyzing: {}", video.display());
    }

    let result = analyze_video(request, backend, options)
        .await
        .map_err(|e| anyhow::anyhow!("Analysis failed: {e}"))?;

    let saved_to = if save {
        let store = ReportStore::open(&config.reports_dir)?;
        Some(store.save(&result)?)
    } else {
        None
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
        if let Some(path) = saved_to {
            println!("\nReport saved to: {}", path.display());
        }
    }

    Ok(())
}

pub fn print_summary(result: &AnalysisResult) {
    println!("Report: {}", result.report_id);
    println!("  Created: {}", result.created_at);
    println!("  Source: {}", result.source_filename);
    println!();
    println!("Video:");
    println!(
        "  {:.2}s @ {:.3}fps (~{} frames)",
        result.duration_seconds, result.fps, result.total_frames
    );
    println!();
    println!("Motion:");
    println!("  Events: {}", result.motion_events);
    println!(
        "  Score: mean {:.3}, std {:.3}",
        result.motion_score_mean, result.motion_score_std
    );
}
