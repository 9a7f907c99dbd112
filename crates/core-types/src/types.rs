// In crates/core-types/src/types.rs

use crate::Error;
use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three families of tradable instruments.
///
/// The declaration order is also the lookup and reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Equity,
    Commodity,
    Crypto,
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [AssetClass::Equity, AssetClass::Commodity, AssetClass::Crypto];

    /// Base volatility of the class-wide sentiment draw for one 1D step.
    pub fn sentiment_volatility(self) -> f64 {
        match self {
            AssetClass::Equity => 0.01,
            AssetClass::Commodity => 0.005,
            AssetClass::Crypto => 0.02,
        }
    }

    /// Absolute daily change above which a move is worth reporting.
    /// Commodities are never reported.
    pub fn significance_threshold(self) -> Option<f64> {
        match self {
            AssetClass::Equity => Some(0.02),
            AssetClass::Commodity => None,
            AssetClass::Crypto => Some(0.05),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetClass::Equity => "Stocks (S&P 500)",
            AssetClass::Commodity => "Commodities",
            AssetClass::Crypto => "Cryptocurrencies",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

/// A single catalog entry: the live quote of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetQuote {
    pub name: String,
    pub class: AssetClass,
    /// Current price. Always at least the minimum tradable price.
    pub price: Decimal,
    /// Baseline volatility as a fraction (0.05 = 5%).
    pub volatility: f64,
    /// Fractional change produced by the most recent price step.
    pub daily_change: f64,
}

impl AssetQuote {
    pub fn new(name: impl Into<String>, class: AssetClass, price: Decimal, volatility: f64) -> Self {
        Self {
            name: name.into(),
            class,
            price,
            volatility,
            daily_change: 0.0,
        }
    }
}

/// The selectable simulated time-step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeStep {
    #[serde(rename = "1H")]
    OneHour,
    #[serde(rename = "4H")]
    FourHours,
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl TimeStep {
    pub const ALL: [TimeStep; 5] = [
        TimeStep::OneHour,
        TimeStep::FourHours,
        TimeStep::OneDay,
        TimeStep::OneWeek,
        TimeStep::OneMonth,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TimeStep::OneHour => "1H",
            TimeStep::FourHours => "4H",
            TimeStep::OneDay => "1D",
            TimeStep::OneWeek => "1W",
            TimeStep::OneMonth => "1M",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeStep::OneHour => "1 Hour",
            TimeStep::FourHours => "4 Hours",
            TimeStep::OneDay => "1 Day",
            TimeStep::OneWeek => "1 Week",
            TimeStep::OneMonth => "1 Month",
        }
    }

    /// Wall-clock time the step represents. A month is 30 days.
    pub fn duration(self) -> Duration {
        match self {
            TimeStep::OneHour => Duration::hours(1),
            TimeStep::FourHours => Duration::hours(4),
            TimeStep::OneDay => Duration::days(1),
            TimeStep::OneWeek => Duration::days(7),
            TimeStep::OneMonth => Duration::days(30),
        }
    }

    /// Multiplier applied to every stochastic draw and price cap for this step.
    pub fn factor(self) -> f64 {
        match self {
            TimeStep::OneHour => 0.2,
            TimeStep::FourHours => 0.4,
            TimeStep::OneDay => 1.0,
            TimeStep::OneWeek => 2.5,
            TimeStep::OneMonth => 5.0,
        }
    }

    /// Day-counter increment: whole days in the step, but never less than one.
    pub fn days_elapsed(self) -> u32 {
        self.duration().num_days().max(1) as u32
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TimeStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeStep::ALL
            .into_iter()
            .find(|step| step.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownTimeStep(s.to_string()))
    }
}
