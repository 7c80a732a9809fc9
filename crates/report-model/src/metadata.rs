//! Source video metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Frame rate as a rational `numerator/denominator`.
///
/// Always positive: parsing never yields a zero numerator or denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameRate {
    /// Rate used when the container does not report a usable one.
    pub const DEFAULT: FrameRate = FrameRate {
        numerator: 30,
        denominator: 1,
    };

    /// Parse an ffprobe-style rate string (`"30000/1001"`, `"25/1"`).
    ///
    /// Absent, empty, non-numeric, zero-denominator and non-positive rates all
    /// fall back to [`FrameRate::DEFAULT`].
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or(Self::DEFAULT)
    }

    /// Strict parse; `None` when the string is not a usable positive rate.
    ///
    /// A denominator is required: a bare `"25"` is not a rate.
    pub fn parse(raw: &str) -> Option<Self> {
        let (num, den) = raw.trim().split_once('/')?;
        let (num, den) = (num.trim(), den.trim());
        let numerator = num.parse::<u32>().ok()?;
        let denominator = den.parse::<u32>().ok()?;
        if numerator == 0 || denominator == 0 {
            return None;
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    /// Frames per second as a float.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Container/stream metadata of the source video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    frame_rate: FrameRate,
    duration_secs: f64,
    estimated_total_frames: u64,
}

impl VideoMetadata {
    /// Build metadata from a rate and duration.
    ///
    /// Negative or non-finite durations are treated as unknown (0).
    pub fn new(frame_rate: FrameRate, duration_secs: f64) -> Self {
        let duration_secs = if duration_secs.is_finite() && duration_secs > 0.0 {
            duration_secs
        } else {
            0.0
        };
        let estimated_total_frames = (duration_secs * frame_rate.as_f64()).round() as u64;
        Self {
            frame_rate,
            duration_secs,
            estimated_total_frames,
        }
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    pub fn fps(&self) -> f64 {
        self.frame_rate.as_f64()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// `round(duration × fps)`. Reporting only; it never gates sampling.
    pub fn estimated_total_frames(&self) -> u64 {
        self.estimated_total_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ntsc_rate() {
        let rate = FrameRate::parse_lenient(Some("30000/1001"));
        assert_eq!(rate.numerator, 30000);
        assert_eq!(rate.denominator, 1001);
        assert!((rate.as_f64() - 29.97).abs() < 0.001);
    }

    #[test]
    fn test_parse_falls_back_to_default() {
        for raw in [None, Some(""), Some("x/0"), Some("30/0"), Some("abc"), Some("0/1"), Some("-25/1")] {
            assert_eq!(FrameRate::parse_lenient(raw), FrameRate::DEFAULT, "input {raw:?}");
        }
        assert!((FrameRate::DEFAULT.as_f64() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_denominator_falls_back_to_default() {
        assert_eq!(FrameRate::parse(" 25 "), None);
        assert_eq!(FrameRate::parse_lenient(Some("25")), FrameRate::DEFAULT);
        assert_eq!(
            FrameRate::parse(" 25 / 1 "),
            Some(FrameRate {
                numerator: 25,
                denominator: 1
            })
        );
    }

    #[test]
    fn test_estimated_total_frames() {
        let metadata = VideoMetadata::new(FrameRate::DEFAULT, 10.0);
        assert_eq!(metadata.estimated_total_frames(), 300);

        let ntsc = VideoMetadata::new(FrameRate::parse_lenient(Some("30000/1001")), 60.0);
        assert_eq!(ntsc.estimated_total_frames(), 1798);
    }

    #[test]
    fn test_unknown_duration_is_zero() {
        for duration in [-1.0, f64::NAN, f64::INFINITY] {
            let metadata = VideoMetadata::new(FrameRate::DEFAULT, duration);
            assert_eq!(metadata.duration_secs(), 0.0);
            assert_eq!(metadata.estimated_total_frames(), 0);
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let rate = FrameRate::parse_lenient(Some("24000/1001"));
        assert_eq!(rate.to_string(), "24000/1001");
    }
}
