//! The analysis result record handed back to callers.

use std::path::Path;

use chrono::{DateTime, Utc};
use motionscope_common::clock::ReportStamp;
use serde::{Deserialize, Serialize};

use crate::metadata::VideoMetadata;
use crate::motion::MotionStatistics;

/// Outcome of one complete analysis.
///
/// Serializes to the flat record callers persist and serve:
/// `report_id`, `created_at`, `source_filename`, `total_frames`, `fps`,
/// `duration_seconds`, `motion_events`, `motion_score_mean`,
/// `motion_score_std`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub report_id: String,

    /// ISO 8601 (RFC 3339) when serialized.
    pub created_at: DateTime<Utc>,

    pub source_filename: String,

    /// Estimated from duration and frame rate.
    pub total_frames: u64,

    pub fps: f64,

    pub duration_seconds: f64,

    pub motion_events: u64,

    pub motion_score_mean: f64,

    pub motion_score_std: f64,
}

impl AnalysisResult {
    /// Combine stage outputs into the final record. Pure; no I/O.
    pub fn assemble(
        stamp: &ReportStamp,
        source: &Path,
        metadata: &VideoMetadata,
        stats: &MotionStatistics,
    ) -> Self {
        Self {
            report_id: stamp.report_id.clone(),
            created_at: stamp.created_at,
            source_filename: source_filename(source),
            total_frames: metadata.estimated_total_frames(),
            fps: metadata.fps(),
            duration_seconds: metadata.duration_secs(),
            motion_events: stats.event_count() as u64,
            motion_score_mean: stats.mean,
            motion_score_std: stats.std_dev,
        }
    }
}

/// Final path component, or the whole path when it has none.
fn source_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FrameRate;
    use crate::motion::MotionEvent;
    use chrono::TimeZone;

    fn sample_stats() -> MotionStatistics {
        MotionStatistics {
            mean: 5.0,
            std_dev: 2.0,
            threshold: 7.4,
            events: vec![MotionEvent {
                start_index: 3,
                end_index: None,
                peak_score: 9.0,
            }],
        }
    }

    #[test]
    fn test_assemble_from_known_metadata() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let stamp = ReportStamp::with_id("20240102030405-deadbeef", created_at);
        let metadata = VideoMetadata::new(FrameRate::DEFAULT, 10.0);

        let result = AnalysisResult::assemble(
            &stamp,
            Path::new("/uploads/match-highlights.mp4"),
            &metadata,
            &sample_stats(),
        );

        assert_eq!(result.report_id, "20240102030405-deadbeef");
        assert_eq!(result.source_filename, "match-highlights.mp4");
        assert_eq!(result.total_frames, 300);
        assert!((result.fps - 30.0).abs() < 1e-9);
        assert!((result.duration_seconds - 10.0).abs() < 1e-9);
        assert_eq!(result.motion_events, 1);
        assert!((result.motion_score_mean - 5.0).abs() < 1e-9);
        assert!((result.motion_score_std - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_field_names() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let stamp = ReportStamp::with_id("r1", created_at);
        let metadata = VideoMetadata::new(FrameRate::DEFAULT, 1.0);
        let result =
            AnalysisResult::assemble(&stamp, Path::new("clip.mov"), &metadata, &sample_stats());

        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "created_at",
                "duration_seconds",
                "fps",
                "motion_events",
                "motion_score_mean",
                "motion_score_std",
                "report_id",
                "source_filename",
                "total_frames",
            ]
        );
        assert_eq!(object["created_at"], "2024-01-02T03:04:05Z");
    }
}
