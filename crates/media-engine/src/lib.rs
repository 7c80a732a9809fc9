//! Motionscope Media Engine
//!
//! Everything that touches the source video or the filesystem:
//! - **Backend:** `MediaBackend` trait and the ffmpeg/ffprobe implementation
//! - **Probe:** Lenient frame-rate/duration extraction
//! - **Sampler:** Time-uniform still frames in a private scratch directory
//! - **Analysis:** The end-to-end pipeline producing an `AnalysisResult`

pub mod analysis;
pub mod backend;
pub mod ffmpeg;
pub mod probe;
pub mod sampler;
pub mod scratch;

pub use analysis::{analyze_video, Analysis, AnalysisOptions, AnalysisRequest};
pub use backend::{FrameFormat, MediaBackend, ProbeData};
pub use ffmpeg::FfmpegBackend;
pub use probe::probe_video;
