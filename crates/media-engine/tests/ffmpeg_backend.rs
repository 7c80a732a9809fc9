//! Runs the real ffmpeg backend against a generated clip.
//!
//! Skipped (passes trivially) on machines without ffmpeg and ffprobe.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use motionscope_common::clock::ReportStamp;
use motionscope_media_engine::{
    analyze_video, probe_video, AnalysisOptions, AnalysisRequest, FfmpegBackend, MediaBackend,
};

fn make_test_clip(backend: &FfmpegBackend, output: &Path) -> bool {
    Command::new(backend.ffmpeg_path())
        .args([
            "-nostdin",
            "-hide_banner",
            "-v",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=3:size=160x120:rate=25",
            "-c:v",
            "mpeg4",
            "-y",
        ])
        .arg(output)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[test]
fn probe_reads_generated_clip() {
    let backend = FfmpegBackend::default();
    if !backend.is_available() {
        eprintln!("ffmpeg/ffprobe not available, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let clip = dir.path().join("testsrc.mp4");
    if !make_test_clip(&backend, &clip) {
        eprintln!("could not generate test clip, skipping");
        return;
    }

    let metadata = probe_video(&backend, &clip).unwrap();
    assert!((metadata.fps() - 25.0).abs() < 1e-6);
    assert!((metadata.duration_secs() - 3.0).abs() < 0.2);
    let frames = metadata.estimated_total_frames();
    assert!((70..=80).contains(&frames), "estimated {frames} frames");
}

#[tokio::test]
async fn full_analysis_on_generated_clip() {
    let backend = FfmpegBackend::default();
    if !backend.is_available() {
        eprintln!("ffmpeg/ffprobe not available, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let clip = dir.path().join("testsrc.mp4");
    if !make_test_clip(&backend, &clip) {
        eprintln!("could not generate test clip, skipping");
        return;
    }
    let scratch_root = dir.path().join("scratch");

    let options = AnalysisOptions {
        scratch_root: Some(scratch_root.clone()),
        ..Default::default()
    };
    let result = analyze_video(
        AnalysisRequest::new(&clip, ReportStamp::now()),
        Arc::new(backend),
        options,
    )
    .await
    .unwrap();

    assert_eq!(result.source_filename, "testsrc.mp4");
    assert!((result.fps - 25.0).abs() < 1e-6);
    assert!(result.motion_score_mean >= 0.0);
    assert!(result.motion_score_std >= 0.0);
    assert_eq!(std::fs::read_dir(&scratch_root).unwrap().count(), 0);
}
