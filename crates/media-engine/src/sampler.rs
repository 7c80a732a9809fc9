//! Time-uniform frame sampling.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use motionscope_common::error::{MotionError, MotionResult};

use crate::backend::{FrameFormat, MediaBackend, FRAME_PREFIX};
use crate::scratch::ScratchDir;

/// Default number of frames sampled per second of video.
pub const DEFAULT_SAMPLE_FPS: f64 = 2.0;

/// One still image extracted from the source video.
///
/// Lives only inside the scratch directory of the analysis that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledFrame {
    /// 1-based position in time order.
    pub index: usize,
    pub path: PathBuf,
}

/// Extracts frames at a fixed rate, independent of the source frame rate.
#[derive(Debug, Clone, Copy)]
pub struct FrameSampler {
    sample_fps: f64,
    format: FrameFormat,
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self {
            sample_fps: DEFAULT_SAMPLE_FPS,
            format: FrameFormat::default(),
        }
    }
}

impl FrameSampler {
    pub fn new(sample_fps: f64, format: FrameFormat) -> MotionResult<Self> {
        if !sample_fps.is_finite() || sample_fps <= 0.0 {
            return Err(MotionError::config(format!(
                "Sampling rate must be a positive number, got {sample_fps}"
            )));
        }
        Ok(Self { sample_fps, format })
    }

    pub fn sample_fps(&self) -> f64 {
        self.sample_fps
    }

    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Extract frames of `video` into `scratch` and list them in time order.
    ///
    /// A decode that succeeds but yields nothing returns an empty list.
    pub fn sample(
        &self,
        backend: &dyn MediaBackend,
        video: &Path,
        scratch: &ScratchDir,
    ) -> MotionResult<Vec<SampledFrame>> {
        backend.extract_frames(video, self.sample_fps, scratch.path(), self.format)?;

        let frames = collect_frames(scratch.path(), self.format)?;
        if frames.is_empty() {
            tracing::warn!(
                video = %video.display(),
                "Frame extraction produced no frames"
            );
        } else {
            tracing::debug!(frames = frames.len(), sample_fps = self.sample_fps, "Sampled frames");
        }
        Ok(frames)
    }
}

/// List sampled frame files in `dir`, ordered by their numeric index.
pub fn collect_frames(dir: &Path, format: FrameFormat) -> MotionResult<Vec<SampledFrame>> {
    let entries = std::fs::read_dir(dir).map_err(|e| MotionError::scratch_io(dir, e))?;

    let mut indexed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MotionError::scratch_io(dir, e))?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(format.extension()) {
            continue;
        }
        let Some(number) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|stem| stem.strip_prefix(FRAME_PREFIX))
            .and_then(|digits| digits.parse::<u64>().ok())
        else {
            continue;
        };
        indexed.push((number, path));
    }

    indexed.sort_unstable_by_key(|(number, _)| *number);
    Ok(indexed
        .into_iter()
        .enumerate()
        .map(|(i, (_, path))| SampledFrame {
            index: i + 1,
            path,
        })
        .collect())
}

/// Decode a sampled frame into RGBA.
pub fn load_frame(frame: &SampledFrame) -> MotionResult<RgbaImage> {
    let image = image::open(&frame.path).map_err(|e| {
        MotionError::extraction(format!(
            "Failed to decode frame {} ({}): {e}",
            frame.index,
            frame.path.display()
        ))
    })?;
    Ok(image.to_rgba8())
}
