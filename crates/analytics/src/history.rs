// In crates/analytics/src/history.rs

use crate::types::HistoryRecord;

/// Append-only log of [`HistoryRecord`]s in chronological order.
///
/// There is intentionally no way to edit or remove a record once written.
#[derive(Debug, Clone, Default)]
pub struct HistoryTracker {
    records: Vec<HistoryRecord>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn records_keep_insertion_order() {
        let mut tracker = HistoryTracker::new();
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for day in 1..=3 {
            tracker.append(HistoryRecord {
                day,
                timestamp: start,
                total_value: dec!(100) * rust_decimal::Decimal::from(day),
                roi_percent: 0.0,
            });
        }

        let days: Vec<u32> = tracker.records().iter().map(|r| r.day).collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert_eq!(tracker.latest().unwrap().total_value, dec!(300));
        assert_eq!(tracker.len(), 3);
    }
}
