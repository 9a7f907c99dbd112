// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};
use rust_decimal::Decimal;
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ReportingSettings, Settings, SimulationSettings};

/// Built-in defaults, so the simulator runs without any config directory.
const DEFAULT_SETTINGS: &str = r#"
[app]
environment = "development"
log_level = "warn"

[simulation]
initial_balance = 10000.0

[reporting]
max_movements_per_class = 3
"#;

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Starts from the built-in defaults.
/// 2. Merges `base.toml` from `dir`, if present.
/// 3. Merges an environment-specific file (e.g., `development.toml`), if present.
/// 4. Merges settings from environment variables (e.g., `APP_SIMULATION__SEED=42`).
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
        .add_source(File::with_name(&dir.join("base").to_string_lossy()).required(false))
        .add_source(File::with_name(&dir.join(&environment).to_string_lossy()).required(false))
        // The prefix is `APP_`, nested keys are separated by `__`.
        .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"))
        .build()?;

    validate(settings.try_deserialize()?)
}

/// Parses settings from a TOML document layered over the built-in defaults.
pub fn parse_settings(toml: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    validate(settings.try_deserialize()?)
}

fn validate(settings: Settings) -> Result<Settings> {
    if settings.simulation.initial_balance < Decimal::ZERO {
        return Err(Error::InvalidSetting {
            key: "simulation.initial_balance",
            reason: format!("must not be negative, got {}", settings.simulation.initial_balance),
        });
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn defaults_apply_without_any_files() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.app.log_level, "warn");
        assert_eq!(settings.simulation.initial_balance, Decimal::from(10_000));
        assert_eq!(settings.simulation.seed, None);
        assert_eq!(settings.reporting.max_movements_per_class, 3);
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = parse_settings(
            r#"
            [app]
            log_level = "debug"

            [simulation]
            initial_balance = 2500.5
            seed = 42
            start_time = "2025-01-06T09:30:00Z"

            [reporting]
            max_movements_per_class = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.app.environment, "development");
        assert_eq!(settings.simulation.initial_balance, Decimal::new(25005, 1));
        assert_eq!(settings.simulation.seed, Some(42));
        assert_eq!(
            settings.simulation.start_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 6, 9, 30, 0).unwrap())
        );
        assert_eq!(settings.reporting.max_movements_per_class, 5);
    }

    #[test]
    fn negative_balance_is_rejected() {
        let err = parse_settings("[simulation]\ninitial_balance = -1.0").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSetting { key: "simulation.initial_balance", .. }
        ));
    }

    #[test]
    fn missing_directory_falls_back_to_defaults() {
        let settings = load_settings_from(Path::new("does/not/exist")).unwrap();
        assert_eq!(settings.simulation.initial_balance, Decimal::from(10_000));
    }
}
