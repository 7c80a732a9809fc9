//! Motionscope Common Utilities
//!
//! Shared infrastructure for all Motionscope crates:
//! - Error types and result aliases
//! - Report stamping (id + creation time) and stage timing
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
