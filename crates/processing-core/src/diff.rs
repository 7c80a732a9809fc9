//! Frame difference scoring.
//!
//! A pair of frames is scored by the fraction of pixels that differ
//! perceptually, scaled by 255 so scores live on an 8-bit-intensity-like
//! scale. The scale is a convention; it only has to be the same for every
//! score that feeds one set of statistics.
//!
//! # Pixel comparison
//!
//! Both pixels are alpha-blended over white and converted to YIQ. The
//! weighted squared YIQ distance is compared against `35215 × t²`, where
//! `35215` is the largest possible distance and `t` is the per-pixel
//! threshold in `[0.0, 1.0]` (default 0.1).

use image::RgbaImage;
use motionscope_common::error::{MotionError, MotionResult};
use motionscope_report_model::motion::ScoreSequence;
use rayon::prelude::*;

/// Largest possible YIQ distance between two pixels.
const MAX_YIQ_DELTA: f64 = 35215.0;

/// Frames decoded per parallel batch in [`DifferenceScorer::score_sequence`].
pub const DECODE_BATCH: usize = 32;

/// Scores visual dissimilarity between consecutive frames.
#[derive(Debug, Clone, Copy)]
pub struct DifferenceScorer {
    pixel_threshold: f64,
}

impl Default for DifferenceScorer {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl DifferenceScorer {
    /// Create a scorer; `pixel_threshold` is clamped to `[0.0, 1.0]`.
    pub fn new(pixel_threshold: f64) -> Self {
        Self {
            pixel_threshold: pixel_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn pixel_threshold(&self) -> f64 {
        self.pixel_threshold
    }

    /// Fraction of pixels in `[0.0, 1.0]` that differ between two frames.
    ///
    /// Frames from one sampler run always share dimensions; anything else is
    /// a broken precondition and fails with `DimensionMismatch`.
    pub fn diff_ratio(&self, previous: &RgbaImage, next: &RgbaImage) -> MotionResult<f64> {
        if previous.dimensions() != next.dimensions() {
            return Err(MotionError::dimension_mismatch(
                previous.dimensions(),
                next.dimensions(),
            ));
        }

        let total = previous.width() as u64 * previous.height() as u64;
        if total == 0 {
            return Ok(0.0);
        }

        let max_delta = MAX_YIQ_DELTA * self.pixel_threshold * self.pixel_threshold;
        let differing = previous
            .pixels()
            .zip(next.pixels())
            .filter(|(a, b)| color_delta(a.0, b.0) > max_delta)
            .count() as u64;

        Ok(differing as f64 / total as f64)
    }

    /// Dissimilarity score of one frame pair: `diff_ratio × 255`.
    pub fn score(&self, previous: &RgbaImage, next: &RgbaImage) -> MotionResult<f64> {
        Ok(self.diff_ratio(previous, next)? * 255.0)
    }

    /// Score every consecutive pair of `frames`.
    ///
    /// Frames are decoded in parallel batches of [`DECODE_BATCH`], each one
    /// exactly once, and the pairs of a batch are scored in parallel. The
    /// last frame of a batch is carried over to pair with the first frame
    /// of the next, so at most one batch of decoded frames is alive at a
    /// time. The returned sequence is in frame order and has
    /// `frames.len() - 1` entries, or the single sentinel `0.0` when fewer
    /// than two frames were given.
    pub fn score_sequence<T, F>(&self, frames: &[T], load: F) -> MotionResult<ScoreSequence>
    where
        T: Sync,
        F: Fn(&T) -> MotionResult<RgbaImage> + Sync,
    {
        if frames.len() < 2 {
            tracing::debug!(frames = frames.len(), "Too few frames to score");
            return Ok(ScoreSequence::from_scores(Vec::new()));
        }

        let mut scores = Vec::with_capacity(frames.len() - 1);
        let mut carried: Option<RgbaImage> = None;
        for chunk in frames.chunks(DECODE_BATCH) {
            let decoded = chunk
                .par_iter()
                .map(|frame| load(frame))
                .collect::<MotionResult<Vec<RgbaImage>>>()?;

            let mut batch = Vec::with_capacity(decoded.len() + 1);
            batch.extend(carried.take());
            batch.extend(decoded);

            let batch_scores = batch
                .par_windows(2)
                .map(|pair| self.score(&pair[0], &pair[1]))
                .collect::<MotionResult<Vec<f64>>>()?;
            scores.extend(batch_scores);

            carried = batch.pop();
        }

        Ok(ScoreSequence::from_scores(scores))
    }
}

/// Weighted squared YIQ distance between two RGBA pixels.
fn color_delta(a: [u8; 4], b: [u8; 4]) -> f64 {
    if a == b {
        return 0.0;
    }

    let (r1, g1, b1) = blend_over_white(a);
    let (r2, g2, b2) = blend_over_white(b);

    let y = rgb_to_y(r1, g1, b1) - rgb_to_y(r2, g2, b2);
    let i = rgb_to_i(r1, g1, b1) - rgb_to_i(r2, g2, b2);
    let q = rgb_to_q(r1, g1, b1) - rgb_to_q(r2, g2, b2);

    0.5053 * y * y + 0.299 * i * i + 0.1957 * q * q
}

fn blend_over_white(px: [u8; 4]) -> (f64, f64, f64) {
    let alpha = px[3] as f64 / 255.0;
    let blend = |c: u8| 255.0 + (c as f64 - 255.0) * alpha;
    (blend(px[0]), blend(px[1]), blend(px[2]))
}

fn rgb_to_y(r: f64, g: f64, b: f64) -> f64 {
    r * 0.29889531 + g * 0.58662247 + b * 0.11448223
}

fn rgb_to_i(r: f64, g: f64, b: f64) -> f64 {
    r * 0.59597799 - g * 0.27417610 - b * 0.32180189
}

fn rgb_to_q(r: f64, g: f64, b: f64) -> f64 {
    r * 0.21147017 - g * 0.52261711 + b * 0.31114694
}
