//! Motionscope Report Model
//!
//! Defines the data contracts of a motion analysis:
//! - **Metadata:** Frame rate and duration of the source video
//! - **Motion:** Score sequences, detected events, and their statistics
//! - **Report:** The immutable `AnalysisResult` returned to callers
//! - **Store:** JSON persistence of reports by id, for callers that want it

pub mod metadata;
pub mod motion;
pub mod report;
pub mod store;

pub use metadata::*;
pub use motion::*;
pub use report::*;
pub use store::*;
