// In crates/analytics/src/lib.rs

pub mod engine;
pub mod history;
pub mod types;

pub use engine::{AnalyticsEngine, roi_against_peak};
pub use history::HistoryTracker;
pub use types::{HistoryRecord, PerformanceReport};
