//! Report stamping and stage timing.
//!
//! Every analysis is identified by a report id and a creation timestamp
//! captured once when the analysis is requested. Report ids sort by
//! creation time: `YYYYmmddHHMMSS-xxxxxxxx` (UTC, then eight hex digits).

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Identity of one analysis: who it is and when it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStamp {
    /// Unique report identifier.
    pub report_id: String,

    /// Moment the analysis was requested.
    pub created_at: DateTime<Utc>,
}

impl ReportStamp {
    /// Stamp a new analysis with the current time and a fresh id.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Stamp a new analysis at a known time.
    pub fn at(created_at: DateTime<Utc>) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            report_id: format!("{}-{}", created_at.format("%Y%m%d%H%M%S"), &suffix[..8]),
            created_at,
        }
    }

    /// Use a caller-generated id.
    pub fn with_id(report_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            report_id: report_id.into(),
            created_at,
        }
    }
}

/// Wall-clock timer for one pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct StageTimer {
    start: Instant,
}

impl StageTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the stage started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_id_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let stamp = ReportStamp::at(at);

        let (time_part, suffix) = stamp.report_id.split_once('-').unwrap();
        assert_eq!(time_part, "20240309140507");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(stamp.created_at, at);
    }

    #[test]
    fn test_report_ids_are_unique() {
        let at = Utc::now();
        assert_ne!(ReportStamp::at(at).report_id, ReportStamp::at(at).report_id);
    }

    #[test]
    fn test_stage_timer_is_monotonic() {
        let timer = StageTimer::start();
        // Should be very small
        assert!(timer.elapsed_ms() < 1_000);
    }
}
