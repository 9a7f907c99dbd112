// In crates/engine/src/types.rs

use analytics::HistoryRecord;
use app_config::Settings;
use chrono::{DateTime, Utc};
use core_types::{AssetClass, AssetQuote, TimeStep};
use rust_decimal::Decimal;
use serde::Serialize;

/// How a new simulation starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub initial_balance: Decimal,
    pub start: DateTime<Utc>,
    /// Cap on reported significant movements per asset class and step.
    pub max_movements_per_class: usize,
}

impl SimulationParams {
    pub fn new(initial_balance: Decimal, start: DateTime<Utc>) -> Self {
        Self {
            initial_balance,
            start,
            max_movements_per_class: 3,
        }
    }

    /// Reads the parameters from loaded settings. A missing start time
    /// means the simulation starts now.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            initial_balance: settings.simulation.initial_balance,
            start: settings.simulation.start_time.unwrap_or_else(Utc::now),
            max_movements_per_class: settings.reporting.max_movements_per_class,
        }
    }
}

/// One asset whose last step crossed its class's significance threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMovement {
    pub name: String,
    pub class: AssetClass,
    /// Fractional change over the step, e.g. `0.05` for +5%.
    pub change: f64,
    pub price: Decimal,
}

impl From<&AssetQuote> for PriceMovement {
    fn from(quote: &AssetQuote) -> Self {
        Self {
            name: quote.name.clone(),
            class: quote.class,
            change: quote.daily_change,
            price: quote.price,
        }
    }
}

/// The outcome of advancing simulated time by one step.
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceReport {
    pub step: TimeStep,
    pub day: u32,
    pub timestamp: DateTime<Utc>,
    /// Significant moves in catalog order, capped per class.
    pub movements: Vec<PriceMovement>,
    pub record: HistoryRecord,
}
