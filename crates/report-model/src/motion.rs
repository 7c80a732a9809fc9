//! Score sequences and the motion statistics derived from them.

use serde::{Deserialize, Serialize};

/// Difference scores between consecutive sampled frames, in sample order.
///
/// Never empty: a run that sampled fewer than two frames produces the
/// single sentinel score `0.0`, which keeps mean/std-dev well defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSequence(Vec<f64>);

impl ScoreSequence {
    /// Wrap pairwise scores, normalizing an empty list to `[0.0]`.
    pub fn from_scores(scores: Vec<f64>) -> Self {
        debug_assert!(scores.iter().all(|s| s.is_finite() && *s >= 0.0));
        if scores.is_empty() {
            Self(vec![0.0])
        } else {
            Self(scores)
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is the single-zero sentinel of a too-short extraction.
    pub fn is_degenerate(&self) -> bool {
        self.0.len() == 1 && self.0[0] == 0.0
    }
}

impl AsRef<[f64]> for ScoreSequence {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// One contiguous burst of above-threshold change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// Index into the score sequence where the event was triggered.
    pub start_index: usize,

    /// Index of the score that re-armed the detector, if the sequence
    /// dropped back below the re-arm level before it ended.
    pub end_index: Option<usize>,

    /// Highest score observed while the event was active.
    pub peak_score: f64,
}

/// Summary of one score sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionStatistics {
    /// Mean score.
    pub mean: f64,

    /// Population standard deviation of the scores.
    pub std_dev: f64,

    /// Score at or above which an armed detector records an event.
    pub threshold: f64,

    /// Detected events in sequence order.
    pub events: Vec<MotionEvent>,
}

impl MotionStatistics {
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}
