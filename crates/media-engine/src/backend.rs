//! Media backend abstraction.
//!
//! A backend knows how to read container metadata and how to dump frames
//! of a video into a directory. The default implementation drives the
//! `ffprobe` and `ffmpeg` command-line tools.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use motionscope_common::error::{MotionError, MotionResult};
use serde::Deserialize;

/// Trait for media backends (ffmpeg CLI, in-process decoders, test fakes).
pub trait MediaBackend: Send + Sync {
    /// Read stream and container metadata of `video`.
    fn probe(&self, video: &Path) -> MotionResult<ProbeData>;

    /// Write frames of `video`, sampled at `sample_fps`, into `output_dir`.
    ///
    /// Frames must be named with [`frame_file_name`] so that index order is
    /// time order. Producing zero frames is not an error.
    fn extract_frames(
        &self,
        video: &Path,
        sample_fps: f64,
        output_dir: &Path,
        format: FrameFormat,
    ) -> MotionResult<()>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Raw probe output, shaped like `ffprobe -print_format json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeData {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,

    #[serde(default)]
    pub format: Option<ProbeFormat>,
}

/// One stream entry. Numeric values arrive as strings and may be `"N/A"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<String>,
    pub duration: Option<String>,
}

/// Container-level entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeFormat {
    pub format_name: Option<String>,
    pub duration: Option<String>,
}

impl ProbeData {
    /// The first video stream, if any.
    pub fn video_stream(&self) -> Option<&ProbeStream> {
        self.streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
    }
}

/// Image format of sampled frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameFormat {
    #[default]
    Jpeg,
    Png,
}

impl FrameFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FrameFormat::Jpeg => "jpg",
            FrameFormat::Png => "png",
        }
    }
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FrameFormat {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(FrameFormat::Jpeg),
            "png" => Ok(FrameFormat::Png),
            other => Err(MotionError::config(format!(
                "Unsupported frame format '{other}' (expected jpg or png)"
            ))),
        }
    }
}

/// Prefix shared by every sampled frame file.
pub const FRAME_PREFIX: &str = "frame-";

/// Digits in the zero-padded frame index.
pub const FRAME_INDEX_WIDTH: usize = 6;

/// File name of the 1-based `index`-th frame, e.g. `frame-000001.jpg`.
pub fn frame_file_name(index: usize, format: FrameFormat) -> String {
    format!(
        "{FRAME_PREFIX}{index:0width$}.{ext}",
        width = FRAME_INDEX_WIDTH,
        ext = format.extension()
    )
}

/// printf-style pattern matching [`frame_file_name`], for ffmpeg's image muxer.
pub fn frame_file_pattern(format: FrameFormat) -> String {
    format!("{FRAME_PREFIX}%0{FRAME_INDEX_WIDTH}d.{}", format.extension())
}
