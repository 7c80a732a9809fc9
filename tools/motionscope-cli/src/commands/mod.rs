pub mod analyze;
pub mod check;
pub mod list;
pub mod probe;
pub mod report;
