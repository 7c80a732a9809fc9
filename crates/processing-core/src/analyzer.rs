//! Score sequence → motion statistics.

use motionscope_report_model::motion::{MotionStatistics, ScoreSequence};

use crate::peaks::{PeakDetector, DEFAULT_REARM_RATIO};
use crate::stats::{mean_and_std_dev, motion_threshold};

/// Configuration for the motion analyzer.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// Standard deviations above the mean that make up the threshold.
    pub threshold_sigma: f64,

    /// Fraction of the threshold a score must drop below to re-arm.
    pub rearm_ratio: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            threshold_sigma: 1.2,
            rearm_ratio: DEFAULT_REARM_RATIO,
        }
    }
}

/// Derives statistics and events from one score sequence.
///
/// The threshold adapts to each video's own noise floor; there is no
/// global constant.
pub struct MotionAnalyzer {
    config: MotionConfig,
    detector: PeakDetector,
}

impl MotionAnalyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            detector: PeakDetector::new(config.rearm_ratio),
        }
    }

    /// Create an analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MotionConfig::default())
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn analyze(&self, scores: &ScoreSequence) -> MotionStatistics {
        let (mean, std_dev) = mean_and_std_dev(scores.as_slice());
        let threshold = motion_threshold(mean, std_dev, self.config.threshold_sigma);
        let events = self.detector.detect(scores.as_slice(), threshold);

        if scores.is_degenerate() {
            tracing::debug!("Analyzing sentinel score sequence; threshold is zero");
        }
        tracing::debug!(
            scores = scores.len(),
            mean,
            std_dev,
            threshold,
            events = events.len(),
            "Motion statistics computed"
        );

        MotionStatistics {
            mean,
            std_dev,
            threshold,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_sanity_sequence() {
        let analyzer = MotionAnalyzer::with_defaults();
        let stats = analyzer.analyze(&ScoreSequence::from_scores(vec![2.0, 4.0, 6.0, 8.0]));

        assert!((stats.mean - 5.0).abs() < 1e-9);
        assert!((stats.std_dev - 2.236).abs() < 1e-3);
        assert!((stats.threshold - 7.683).abs() < 1e-3);
        assert_eq!(stats.event_count(), 1);
        assert_eq!(stats.events[0].start_index, 3);
    }

    #[test]
    fn test_empty_extraction_reports_one_event() {
        // Zero or one sampled frame gives the [0] sentinel: mean, std-dev and
        // threshold are all zero and the 0 >= 0 comparison records one event.
        let analyzer = MotionAnalyzer::with_defaults();
        let stats = analyzer.analyze(&ScoreSequence::from_scores(vec![]));

        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.threshold, 0.0);
        assert_eq!(stats.event_count(), 1);
    }

    #[test]
    fn test_custom_sigma_changes_sensitivity() {
        let scores = ScoreSequence::from_scores(vec![1.0, 1.0, 6.0, 1.0, 1.0, 5.0, 1.0]);

        let strict = MotionAnalyzer::new(MotionConfig {
            threshold_sigma: 1.5,
            ..Default::default()
        });
        let loose = MotionAnalyzer::new(MotionConfig {
            threshold_sigma: 0.5,
            ..Default::default()
        });

        assert_eq!(strict.analyze(&scores).event_count(), 1);
        assert_eq!(loose.analyze(&scores).event_count(), 2);
    }
}
