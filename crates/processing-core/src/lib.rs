//! Motionscope Processing Core
//!
//! Turns sampled frames into motion statistics:
//! - **Difference scoring:** Perceptual per-pixel difference ratio between frame pairs
//! - **Statistics:** Mean and population standard deviation of the scores
//! - **Peak detection:** Hysteresis event counting against an adaptive threshold
//!
//! This crate is pure computation: no processes, no scratch files.
//! Frame loading is supplied by the caller.

pub mod analyzer;
pub mod diff;
pub mod peaks;
pub mod stats;

pub use analyzer::{MotionAnalyzer, MotionConfig};
pub use diff::DifferenceScorer;
pub use peaks::PeakDetector;
