//! Error types shared across Motionscope crates.

use std::path::PathBuf;

/// Top-level error type for a single analysis.
///
/// Every variant is scoped to the analysis that raised it; none of them
/// leave state behind that would affect the next analysis.
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("Probe error for {path}: {message}")]
    Probe { path: PathBuf, message: String },

    #[error("Extraction error: {message}")]
    Extraction { message: String },

    #[error("Frame dimension mismatch: expected {expected_width}x{expected_height}, found {found_width}x{found_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("Scratch I/O error at {path}: {source}")]
    ScratchIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MotionError.
pub type MotionResult<T> = Result<T, MotionError>;

impl MotionError {
    pub fn probe(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction {
            message: msg.into(),
        }
    }

    pub fn dimension_mismatch(expected: (u32, u32), found: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            found_width: found.0,
            found_height: found.1,
        }
    }

    pub fn scratch_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ScratchIo {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Short machine-friendly name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Probe { .. } => "probe",
            Self::Extraction { .. } => "extraction",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::ScratchIo { .. } => "scratch_io",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = MotionError::dimension_mismatch((640, 480), (320, 240));
        assert_eq!(
            err.to_string(),
            "Frame dimension mismatch: expected 640x480, found 320x240"
        );
        assert_eq!(err.kind(), "dimension_mismatch");
    }

    #[test]
    fn test_probe_error_mentions_path() {
        let err = MotionError::probe("/videos/clip.mp4", "no video stream");
        let msg = err.to_string();
        assert!(msg.contains("/videos/clip.mp4"));
        assert!(msg.contains("no video stream"));
    }
}
