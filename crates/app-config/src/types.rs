// In crates/app-config/src/types.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// How a new simulation starts.
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub reporting: ReportingSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SimulationSettings {
    /// Cash the player starts with.
    pub initial_balance: Decimal,
    /// Fixed seed for reproducible runs. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulated start time (RFC 3339). Unset means "now".
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ReportingSettings {
    /// Cap on reported significant movements per asset class and step.
    #[serde(default = "default_max_movements")]
    pub max_movements_per_class: usize,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            max_movements_per_class: default_max_movements(),
        }
    }
}

/// Helper functions for serde defaults
fn default_max_movements() -> usize { 3 }
