//! One display schema for real, demo and degraded
//! results alike.

pub mod normalize;
pub mod report;

pub use normalize::normalize;
pub use report::ReportView;
