//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MotionError, MotionResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where analysis reports are stored.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Default analysis settings.
    #[serde(default)]
    pub analysis: AnalysisDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    /// Frames extracted per second of source video.
    pub sample_fps: f64,

    /// Standard deviations above the mean at which a score counts as motion.
    pub threshold_sigma: f64,

    /// Fraction of the threshold a score must fall below to re-arm the detector.
    pub rearm_ratio: f64,

    /// Per-pixel color distance threshold in `[0.0, 1.0]`.
    pub pixel_threshold: f64,

    /// Image format for sampled frames ("jpg" or "png").
    pub frame_format: String,

    /// ffmpeg binary used for frame extraction.
    pub ffmpeg_path: PathBuf,

    /// ffprobe binary used for metadata probing.
    pub ffprobe_path: PathBuf,

    /// Parent directory for per-analysis scratch directories.
    /// `None` uses the system temp directory.
    pub scratch_root: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "motionscope=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            analysis: AnalysisDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            sample_fps: 2.0,
            threshold_sigma: 1.2,
            rearm_ratio: 0.7,
            pixel_threshold: 0.1,
            frame_format: "jpg".to_string(),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            scratch_root: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AnalysisDefaults {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> MotionResult<()> {
        if !self.sample_fps.is_finite() || self.sample_fps <= 0.0 {
            return Err(MotionError::config(format!(
                "sample_fps must be a positive number, got {}",
                self.sample_fps
            )));
        }
        if !self.threshold_sigma.is_finite() || self.threshold_sigma < 0.0 {
            return Err(MotionError::config(format!(
                "threshold_sigma must be non-negative, got {}",
                self.threshold_sigma
            )));
        }
        if !(0.0..=1.0).contains(&self.rearm_ratio) {
            return Err(MotionError::config(format!(
                "rearm_ratio must be within [0, 1], got {}",
                self.rearm_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.pixel_threshold) {
            return Err(MotionError::config(format!(
                "pixel_threshold must be within [0, 1], got {}",
                self.pixel_threshold
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("motionscope").join("config.json")
}

/// Default reports directory.
fn default_reports_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("motionscope").join("reports")
}
