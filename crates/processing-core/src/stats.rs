//! Score statistics.

/// Mean and population standard deviation (divide by N, not N-1).
///
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn mean_and_std_dev(scores: &[f64]) -> (f64, f64) {
    if scores.is_empty() {
        return (0.0, 0.0);
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Adaptive motion threshold: `mean + sigma × std_dev`.
pub fn motion_threshold(mean: f64, std_dev: f64, sigma: f64) -> f64 {
    mean + sigma * std_dev
}
