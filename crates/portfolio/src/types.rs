// In crates/portfolio/src/types.rs

use chrono::{DateTime, Utc};
use core_types::Side;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A holding of one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    /// Canonical asset name, as listed in the market catalog.
    pub name: String,
    /// Units held. A position is dropped as soon as this reaches zero.
    pub quantity: u64,
    /// What the units still held cost, net of proportional removals on sells.
    pub cost_basis: Decimal,
    /// The most recent market price seen for this asset.
    pub last_price: Decimal,
    /// `quantity * last_price` as of the last valuation.
    pub market_value: Decimal,
}

impl Position {
    pub fn profit_loss(&self) -> Decimal {
        self.market_value - self.cost_basis
    }

    /// Unrealised return in percent of cost basis; 0 when nothing was paid.
    pub fn return_percent(&self) -> f64 {
        if self.cost_basis <= dec!(0) {
            return 0.0;
        }
        let profit_loss = self.profit_loss();
        profit_loss
            .checked_div(self.cost_basis)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .and_then(|percent| percent.to_f64())
            .unwrap_or_else(|| {
                profit_loss.to_f64().unwrap_or(0.0) / self.cost_basis.to_f64().unwrap_or(1.0) * 100.0
            })
    }

    /// Re-prices the holding. A value beyond the decimal range leaves the
    /// previous mark in place.
    pub(crate) fn mark(&mut self, price: Decimal) {
        match Decimal::from(self.quantity).checked_mul(price) {
            Some(value) => {
                self.last_price = price;
                self.market_value = value;
            }
            None => tracing::warn!(
                asset = %self.name,
                quantity = self.quantity,
                %price,
                "Position value overflowed; keeping previous valuation."
            ),
        }
    }
}

/// The outcome of a successful buy or sell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub asset: String,
    pub side: Side,
    pub quantity: u64,
    pub price: Decimal,
    /// `quantity * price`: debited on a buy, credited on a sell.
    pub amount: Decimal,
    /// Cost basis taken off the position (sells only, zero for buys).
    pub cost_removed: Decimal,
    pub balance_after: Decimal,
}

impl Fill {
    /// Proceeds minus the cost basis released by a sell.
    pub fn realized_pnl(&self) -> Decimal {
        match self.side {
            Side::Buy => Decimal::ZERO,
            Side::Sell => self.amount - self.cost_removed,
        }
    }
}

/// A point-in-time snapshot of the whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub day: u32,
    pub timestamp: DateTime<Utc>,
    pub balance: Decimal,
    /// Held positions sorted by name.
    pub positions: Vec<Position>,
    pub total_value: Decimal,
    pub all_time_high: Decimal,
}
