// In crates/analytics/src/types.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of the portfolio's value history, recorded per time advance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Simulated day counter at the time of recording.
    pub day: u32,
    /// Simulated wall-clock time at the time of recording.
    pub timestamp: DateTime<Utc>,
    /// Cash plus the market value of every position.
    pub total_value: Decimal,
    /// Return in percent against the all-time-high *before* this record.
    pub roi_percent: f64,
}

/// A read-only summary of how the simulation has gone so far.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PerformanceReport {
    pub day: u32,
    pub total_value: Decimal,
    pub all_time_high: Decimal,
    /// Same formula as the history ROI, without touching the high-water mark.
    pub roi_vs_peak_percent: f64,

    // Against the starting balance
    pub net_pnl_absolute: Decimal,
    pub net_pnl_percentage: f64,

    // Over the recorded history
    pub max_drawdown_absolute: Decimal,
    pub max_drawdown_percentage: f64,
    pub best_value: Option<Decimal>,
    pub worst_value: Option<Decimal>,
    pub records: usize,
}
