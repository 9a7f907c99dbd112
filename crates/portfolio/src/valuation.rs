// In crates/portfolio/src/valuation.rs

use crate::ledger::Portfolio;
use crate::types::{Position, Valuation};
use analytics::{HistoryRecord, HistoryTracker, roi_against_peak};
use core_types::PriceSource;
use rust_decimal::Decimal;

impl Portfolio {
    /// Re-marks every position at the latest market price.
    ///
    /// Assets the market no longer quotes keep their previous value rather
    /// than dropping to zero halfway through a valuation.
    pub fn revalue(&mut self, market: &impl PriceSource) {
        for position in self.positions.values_mut() {
            match market.price_of(&position.name) {
                Some(price) => position.mark(price),
                None => tracing::warn!(asset = %position.name, "No market price; keeping stale valuation."),
            }
        }
    }

    /// Cash plus the market value of every position, saturating at
    /// `Decimal::MAX`.
    pub fn total_value(&self) -> Decimal {
        self.positions
            .values()
            .fold(self.balance, |total, p| total.saturating_add(p.market_value))
    }

    /// Appends today's total value to `history` and updates the all-time-high.
    ///
    /// The ROI is measured against the high-water mark as it stood *before*
    /// this record, so a new high shows as a positive return and the very
    /// first record (no mark yet) shows 0.
    pub fn record_history(&mut self, history: &mut HistoryTracker) -> HistoryRecord {
        let total_value = self.total_value();
        let ath_before = self.all_time_high;
        if total_value > ath_before {
            self.all_time_high = total_value;
        }

        let record = HistoryRecord {
            day: self.day,
            timestamp: self.timestamp,
            total_value,
            roi_percent: roi_against_peak(total_value, ath_before),
        };
        history.append(record);

        tracing::debug!(
            day = record.day,
            total_value = %record.total_value,
            roi = record.roi_percent,
            all_time_high = %self.all_time_high,
            "Recorded portfolio history."
        );
        record
    }

    /// A snapshot of cash, holdings (sorted by name) and total value.
    pub fn valuation(&self) -> Valuation {
        let mut positions: Vec<Position> = self.positions.values().cloned().collect();
        positions.sort_by(|a, b| a.name.cmp(&b.name));

        Valuation {
            day: self.day,
            timestamp: self.timestamp,
            balance: self.balance,
            positions,
            total_value: self.total_value(),
            all_time_high: self.all_time_high,
        }
    }
}
