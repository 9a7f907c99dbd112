// In crates/portfolio/src/ledger.rs

use crate::types::{Fill, Position};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use core_types::{PriceSource, Side, TimeStep};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The player's cash, holdings and simulated clock.
///
/// Invariants kept by every method:
/// - the balance never goes negative;
/// - no position is ever stored with zero units;
/// - the all-time-high never decreases.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub(crate) balance: Decimal,
    pub(crate) positions: HashMap<String, Position>,
    pub(crate) day: u32,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) initial_balance: Decimal,
    pub(crate) all_time_high: Decimal,
}

impl Portfolio {
    /// Creates a new portfolio on day 1 with an initial cash balance.
    pub fn new(initial_balance: Decimal, start: DateTime<Utc>) -> Result<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(Error::NegativeBalance(initial_balance));
        }
        Ok(Self {
            balance: initial_balance,
            positions: HashMap::new(),
            day: 1,
            timestamp: start,
            initial_balance,
            all_time_high: Decimal::ZERO,
        })
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    pub fn all_time_high(&self) -> Decimal {
        self.all_time_high
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn position(&self, name: &str) -> Option<&Position> {
        self.positions.get(name)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }

    /// Buys `quantity` units of `name` at `price`.
    ///
    /// The position's market value is then refreshed from `market`, not from
    /// the trade price, so a stale quote does not leak into the valuation.
    pub fn buy(
        &mut self,
        name: &str,
        quantity: u64,
        price: Decimal,
        market: &impl PriceSource,
    ) -> Result<Fill> {
        validate_order(name, quantity, price)?;

        // An amount beyond the decimal range exceeds any balance.
        let amount = match Decimal::from(quantity).checked_mul(price) {
            Some(amount) if amount <= self.balance => amount,
            amount => {
                return Err(Error::InsufficientFunds {
                    asset: name.to_string(),
                    required: amount.unwrap_or(Decimal::MAX),
                    available: self.balance,
                });
            }
        };

        let (held, basis) = self
            .positions
            .get(name)
            .map_or((0, Decimal::ZERO), |p| (p.quantity, p.cost_basis));
        let (Some(new_quantity), Some(new_basis)) = (held.checked_add(quantity), basis.checked_add(amount))
        else {
            return Err(Error::AmountOverflow { asset: name.to_string() });
        };

        self.balance -= amount;
        let position = self.positions.entry(name.to_string()).or_insert_with(|| Position {
            name: name.to_string(),
            quantity: 0,
            cost_basis: Decimal::ZERO,
            last_price: price,
            market_value: Decimal::ZERO,
        });
        position.quantity = new_quantity;
        position.cost_basis = new_basis;
        position.mark(market.price_of(name).unwrap_or(price));

        tracing::info!(
            asset = name,
            quantity,
            %price,
            balance = %self.balance,
            "Bought asset."
        );

        Ok(Fill {
            asset: name.to_string(),
            side: Side::Buy,
            quantity,
            price,
            amount,
            cost_removed: Decimal::ZERO,
            balance_after: self.balance,
        })
    }

    /// Sells `quantity` units of `name` at `price`.
    ///
    /// Cost basis shrinks by the sold fraction of the *current* basis, which
    /// avoids drift from repeatedly multiplying a rounded average cost.
    pub fn sell(
        &mut self,
        name: &str,
        quantity: u64,
        price: Decimal,
        market: &impl PriceSource,
    ) -> Result<Fill> {
        validate_order(name, quantity, price)?;

        let held = self.positions.get(name).map_or(0, |p| p.quantity);
        if held < quantity {
            return Err(Error::InsufficientHoldings {
                asset: name.to_string(),
                requested: quantity,
                held,
            });
        }

        let Some((amount, balance)) = Decimal::from(quantity)
            .checked_mul(price)
            .and_then(|amount| self.balance.checked_add(amount).map(|balance| (amount, balance)))
        else {
            return Err(Error::AmountOverflow { asset: name.to_string() });
        };
        self.balance = balance;

        let mut cost_removed = Decimal::ZERO;
        if let Some(position) = self.positions.get_mut(name) {
            cost_removed = proportional_cost(position.cost_basis, quantity, held);
            position.cost_basis = (position.cost_basis - cost_removed).max(Decimal::ZERO);
            position.quantity -= quantity;

            let mark = market.price_of(name).unwrap_or(position.last_price);
            position.mark(mark);
        }
        if held == quantity {
            self.positions.remove(name);
        }

        tracing::info!(
            asset = name,
            quantity,
            %price,
            proceeds = %amount,
            balance = %self.balance,
            "Sold asset."
        );

        Ok(Fill {
            asset: name.to_string(),
            side: Side::Sell,
            quantity,
            price,
            amount,
            cost_removed,
            balance_after: self.balance,
        })
    }

    /// Moves the simulated clock forward by one step.
    pub fn advance_clock(&mut self, step: TimeStep) {
        self.day += step.days_elapsed();
        self.timestamp += step.duration();
    }
}

/// The share of `cost_basis` that `sold` out of `held` units carry.
fn proportional_cost(cost_basis: Decimal, sold: u64, held: u64) -> Decimal {
    if sold == held {
        return cost_basis;
    }
    let (sold, held) = (Decimal::from(sold), Decimal::from(held));
    cost_basis
        .checked_mul(sold)
        .and_then(|scaled| scaled.checked_div(held))
        .or_else(|| (cost_basis / held).checked_mul(sold))
        .unwrap_or(cost_basis)
        .min(cost_basis)
}

fn validate_order(name: &str, quantity: u64, price: Decimal) -> Result<()> {
    if quantity == 0 {
        return Err(Error::InvalidQuantity { asset: name.to_string() });
    }
    if price <= Decimal::ZERO {
        return Err(Error::InvalidPrice {
            asset: name.to_string(),
            price,
        });
    }
    Ok(())
}
