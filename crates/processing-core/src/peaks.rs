//! Hysteresis peak detection over a score sequence.
//!
//! A Schmitt trigger: an armed detector records an event when a score
//! reaches the threshold and disarms. It re-arms only once a score falls
//! below `threshold × rearm_ratio`. A sustained burst that hovers around
//! the threshold is therefore counted once.
//!
//! The comparison is `score >= threshold`. With the single-zero sentinel
//! sequence the threshold is also zero, so `0 >= 0` records one event for
//! a video that had nothing to compare. That behavior is kept as is.

use motionscope_report_model::motion::MotionEvent;

/// Default re-arm ratio.
pub const DEFAULT_REARM_RATIO: f64 = 0.7;

/// Counts discrete motion events in a score sequence.
#[derive(Debug, Clone, Copy)]
pub struct PeakDetector {
    rearm_ratio: f64,
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::new(DEFAULT_REARM_RATIO)
    }
}

impl PeakDetector {
    pub fn new(rearm_ratio: f64) -> Self {
        Self { rearm_ratio }
    }

    /// Walk `scores` in order and return every event found.
    pub fn detect(&self, scores: &[f64], threshold: f64) -> Vec<MotionEvent> {
        let rearm_level = threshold * self.rearm_ratio;
        let mut armed = true;
        let mut events: Vec<MotionEvent> = Vec::new();

        for (index, &score) in scores.iter().enumerate() {
            if armed && score >= threshold {
                events.push(MotionEvent {
                    start_index: index,
                    end_index: None,
                    peak_score: score,
                });
                armed = false;
            } else if !armed && score < rearm_level {
                if let Some(event) = events.last_mut() {
                    event.end_index = Some(index);
                }
                armed = true;
            } else if !armed {
                if let Some(event) = events.last_mut() {
                    event.peak_score = event.peak_score.max(score);
                }
            }
        }

        events
    }

    /// Number of events in `scores`.
    pub fn count(&self, scores: &[f64], threshold: f64) -> usize {
        self.detect(scores, threshold).len()
    }
}
