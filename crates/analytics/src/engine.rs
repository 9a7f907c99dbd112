// In crates/analytics/src/engine.rs

use crate::types::{HistoryRecord, PerformanceReport};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Return in percent of `total_value` against a high-water mark `peak`.
///
/// With no previous peak (zero) the return is defined as 0 instead of a
/// division by zero.
pub fn roi_against_peak(total_value: Decimal, peak: Decimal) -> f64 {
    if peak <= Decimal::ZERO {
        return 0.0;
    }
    percent_of(total_value - peak, peak)
}

/// `part / whole * 100`. Falls back to float math when the decimal quotient
/// is out of range.
fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .and_then(|percent| percent.to_f64())
        .unwrap_or_else(|| part.to_f64().unwrap_or(0.0) / whole.to_f64().unwrap_or(1.0) * 100.0)
}

/// The engine responsible for turning the value history into a report.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a full performance report for the current state.
    ///
    /// Nothing here mutates the portfolio: `all_time_high` is the portfolio's
    /// current mark and is only read.
    pub fn calculate(
        &self,
        initial_balance: Decimal,
        all_time_high: Decimal,
        day: u32,
        total_value: Decimal,
        history: &[HistoryRecord],
    ) -> PerformanceReport {
        let mut report = PerformanceReport {
            day,
            total_value,
            all_time_high,
            records: history.len(),
            ..PerformanceReport::default()
        };

        // 1. ROI against the high-water mark, read-only.
        report.roi_vs_peak_percent = roi_against_peak(total_value, all_time_high);

        // 2. Net P&L against the starting balance.
        report.net_pnl_absolute = total_value - initial_balance;
        if initial_balance > dec!(0) {
            report.net_pnl_percentage = percent_of(report.net_pnl_absolute, initial_balance);
        }

        // 3. Max drawdown over the recorded history, starting from the
        //    initial balance as the first peak.
        let mut peak = initial_balance;
        let mut max_drawdown = dec!(0);
        let mut max_drawdown_pct = 0.0;
        for record in history {
            peak = peak.max(record.total_value);
            let drawdown = peak - record.total_value;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
                if peak > dec!(0) {
                    max_drawdown_pct = percent_of(drawdown, peak);
                }
            }
        }
        report.max_drawdown_absolute = max_drawdown;
        report.max_drawdown_percentage = max_drawdown_pct;

        // 4. Extremes
        report.best_value = history.iter().map(|r| r.total_value).max();
        report.worst_value = history.iter().map(|r| r.total_value).min();

        report
    }
}
