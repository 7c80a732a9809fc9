//! End-to-end motion analysis of one video.
//!
//! ```text
//! probe ────────────────────────────────┐
//!                                       ├─> statistics ─> AnalysisResult
//! sample ─> score pairs (parallel) ─────┘
//! ```
//!
//! Probing and sampling run concurrently on the blocking pool. Stages only
//! exchange return values; the scratch directory never outlives the
//! sampling task that owns it.

use std::path::PathBuf;
use std::sync::Arc;

use motionscope_common::clock::{ReportStamp, StageTimer};
use motionscope_common::config::AnalysisDefaults;
use motionscope_common::error::{MotionError, MotionResult};
use motionscope_processing_core::analyzer::{MotionAnalyzer, MotionConfig};
use motionscope_processing_core::diff::DifferenceScorer;
use motionscope_report_model::motion::ScoreSequence;
use motionscope_report_model::report::AnalysisResult;

use crate::backend::{FrameFormat, MediaBackend};
use crate::probe::probe_video;
use crate::sampler::{load_frame, FrameSampler, DEFAULT_SAMPLE_FPS};
use crate::scratch::ScratchDir;

/// Tunables for one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Frames sampled per second of video.
    pub sample_fps: f64,

    /// Image format of sampled frames.
    pub frame_format: FrameFormat,

    /// Per-pixel color distance threshold in `[0.0, 1.0]`.
    pub pixel_threshold: f64,

    /// Threshold and hysteresis settings.
    pub motion: MotionConfig,

    /// Parent of the scratch directory; system temp dir when `None`.
    pub scratch_root: Option<PathBuf>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sample_fps: DEFAULT_SAMPLE_FPS,
            frame_format: FrameFormat::default(),
            pixel_threshold: 0.1,
            motion: MotionConfig::default(),
            scratch_root: None,
        }
    }
}

impl AnalysisOptions {
    /// Build options from the application config, validating them.
    pub fn from_config(config: &AnalysisDefaults) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            sample_fps: config.sample_fps,
            frame_format: config.frame_format.parse()?,
            pixel_threshold: config.pixel_threshold,
            motion: MotionConfig {
                threshold_sigma: config.threshold_sigma,
                rearm_ratio: config.rearm_ratio,
            },
            scratch_root: config.scratch_root.clone(),
        })
    }
}

/// What to analyze and how to label the result.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub video_path: PathBuf,
    pub stamp: ReportStamp,
}

impl AnalysisRequest {
    pub fn new(video_path: impl Into<PathBuf>, stamp: ReportStamp) -> Self {
        Self {
            video_path: video_path.into(),
            stamp,
        }
    }
}

/// A single analysis run.
///
/// [`Analysis::run`] consumes the analysis, so one instance can never start
/// a second sampler run against its scratch directory.
pub struct Analysis {
    request: AnalysisRequest,
    options: AnalysisOptions,
    backend: Arc<dyn MediaBackend>,
}

impl Analysis {
    pub fn new(
        request: AnalysisRequest,
        backend: Arc<dyn MediaBackend>,
        options: AnalysisOptions,
    ) -> Self {
        Self {
            request,
            options,
            backend,
        }
    }

    /// Run the pipeline to completion.
    ///
    /// Either a complete [`AnalysisResult`] or an error is returned. If the
    /// returned future is dropped, the sampling task still runs to the end
    /// on the blocking pool and removes its scratch directory when it does.
    pub async fn run(self) -> MotionResult<AnalysisResult> {
        let Self {
            request,
            options,
            backend,
        } = self;
        let timer = StageTimer::start();

        tracing::info!(
            report_id = %request.stamp.report_id,
            video = %request.video_path.display(),
            backend = backend.name(),
            sample_fps = options.sample_fps,
            "Starting analysis"
        );

        let sampler = FrameSampler::new(options.sample_fps, options.frame_format)?;
        let scorer = DifferenceScorer::new(options.pixel_threshold);
        let scratch = ScratchDir::create(options.scratch_root.as_deref())?;

        let probe_task = {
            let backend = Arc::clone(&backend);
            let video = request.video_path.clone();
            tokio::task::spawn_blocking(move || probe_video(backend.as_ref(), &video))
        };

        let score_task = {
            let backend = Arc::clone(&backend);
            let video = request.video_path.clone();
            tokio::task::spawn_blocking(move || -> MotionResult<ScoreSequence> {
                let stage = StageTimer::start();
                let frames = sampler.sample(backend.as_ref(), &video, &scratch)?;
                tracing::debug!(
                    frames = frames.len(),
                    elapsed_ms = stage.elapsed_ms(),
                    "Sampling finished"
                );

                let stage = StageTimer::start();
                let scores = scorer.score_sequence(&frames, load_frame)?;
                tracing::debug!(
                    scores = scores.len(),
                    elapsed_ms = stage.elapsed_ms(),
                    "Scoring finished"
                );

                scratch.release()?;
                Ok(scores)
            })
        };

        let (metadata, scores) = tokio::join!(probe_task, score_task);
        let metadata = metadata.map_err(|e| join_error("probe", e))?;
        let scores = scores.map_err(|e| join_error("sampling", e))?;

        let result = metadata.and_then(|metadata| {
            let scores = scores?;
            let stats = MotionAnalyzer::new(options.motion).analyze(&scores);
            Ok(AnalysisResult::assemble(
                &request.stamp,
                &request.video_path,
                &metadata,
                &stats,
            ))
        });

        match &result {
            Ok(report) => tracing::info!(
                report_id = %report.report_id,
                total_frames = report.total_frames,
                fps = report.fps,
                duration_seconds = report.duration_seconds,
                motion_events = report.motion_events,
                motion_score_mean = report.motion_score_mean,
                motion_score_std = report.motion_score_std,
                elapsed_ms = timer.elapsed_ms(),
                "Analysis complete"
            ),
            Err(e) => tracing::warn!(
                report_id = %request.stamp.report_id,
                kind = e.kind(),
                error = %e,
                elapsed_ms = timer.elapsed_ms(),
                "Analysis failed"
            ),
        }
        result
    }
}

/// Analyze `request` with `backend`. See [`Analysis::run`].
pub async fn analyze_video(
    request: AnalysisRequest,
    backend: Arc<dyn MediaBackend>,
    options: AnalysisOptions,
) -> MotionResult<AnalysisResult> {
    Analysis::new(request, backend, options).run().await
}

fn join_error(stage: &str, err: tokio::task::JoinError) -> MotionError {
    MotionError::Other(anyhow::anyhow!("{stage} task did not complete: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_config() {
        let config = AnalysisDefaults {
            sample_fps: 4.0,
            frame_format: "png".to_string(),
            threshold_sigma: 1.5,
            ..Default::default()
        };
        let options = AnalysisOptions::from_config(&config).unwrap();
        assert!((options.sample_fps - 4.0).abs() < 1e-9);
        assert_eq!(options.frame_format, FrameFormat::Png);
        assert!((options.motion.threshold_sigma - 1.5).abs() < 1e-9);
        assert!((options.motion.rearm_ratio - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_options_from_config_rejects_bad_format() {
        let config = AnalysisDefaults {
            frame_format: "gif".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            AnalysisOptions::from_config(&config),
            Err(MotionError::Config { .. })
        ));
    }
}
