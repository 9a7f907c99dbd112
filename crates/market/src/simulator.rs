// In crates/market/src/simulator.rs

use crate::catalog::{AssetCatalog, MIN_TRADABLE_PRICE};
use crate::random::RandomSource;
use core_types::{AssetClass, AssetQuote};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction of an asset's volatility that every step must move it by.
const MIN_MOVE_FRACTION: f64 = 0.3;
/// Half-width of the extra uniform noise applied to crypto assets.
const CRYPTO_NOISE: f64 = 0.01;
const EQUITY_MAX_MOVE: f64 = 0.05;
const COMMODITY_MAX_MOVE: f64 = 0.03;

/// Advances every quote in a catalog by one simulated time step.
///
/// The model is a volatility-scaled Gaussian return with three twists:
/// 1. A class-wide "sentiment" draw shared by every asset of the class.
/// 2. A minimum-movement floor so prices never sit still.
/// 3. A per-class cap on the size of a single move.
///
/// All randomness goes through the injected [`RandomSource`].
pub struct PriceSimulator {
    random: Box<dyn RandomSource + Send>,
}

impl PriceSimulator {
    pub fn new(random: Box<dyn RandomSource + Send>) -> Self {
        Self { random }
    }

    /// Applies one step, scaled by `step_factor`, to every quote in place.
    pub fn advance(&mut self, catalog: &mut AssetCatalog, step_factor: f64) {
        for class in AssetClass::ALL {
            let sentiment = self.random.standard_normal() * class.sentiment_volatility() * step_factor;

            for quote in catalog.quotes_mut().iter_mut().filter(|q| q.class == class) {
                let change = self.price_change(quote, sentiment, step_factor);
                apply_change(quote, change);
            }

            tracing::debug!(%class, sentiment, step_factor, "Applied price step to asset class.");
        }
    }

    /// The fractional move for one asset, before it is applied to the price.
    fn price_change(&mut self, quote: &AssetQuote, sentiment: f64, step_factor: f64) -> f64 {
        let mut change = self.random.standard_normal() * quote.volatility * step_factor + sentiment;

        // Enforce a minimum move in the candidate's own direction.
        let min_move = quote.volatility * MIN_MOVE_FRACTION * step_factor;
        if change.abs() < min_move {
            let forced = min_move * self.random.uniform_between(0.5, 1.5);
            change = if change > 0.0 { forced } else { -forced };
        }

        if quote.class == AssetClass::Crypto {
            change += self.random.uniform_between(-CRYPTO_NOISE, CRYPTO_NOISE) * step_factor;
        }

        let cap = (max_move(quote) * step_factor).abs();
        if change > cap {
            cap
        } else if change < -cap {
            -cap
        } else {
            change
        }
    }
}

impl std::fmt::Debug for PriceSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceSimulator").finish_non_exhaustive()
    }
}

/// Largest move allowed for a 1D step.
fn max_move(quote: &AssetQuote) -> f64 {
    match quote.class {
        AssetClass::Equity => EQUITY_MAX_MOVE,
        AssetClass::Commodity => COMMODITY_MAX_MOVE,
        AssetClass::Crypto => quote.volatility * 2.0,
    }
}

fn apply_change(quote: &mut AssetQuote, change: f64) {
    let old_price = quote.price;
    let multiplier = Decimal::from_f64(1.0 + change).unwrap_or(Decimal::ONE);
    let raw = old_price.checked_mul(multiplier).unwrap_or_else(|| {
        tracing::warn!(asset = %quote.name, change, "Price step overflowed; keeping previous price.");
        old_price
    });

    // Sub-dollar crypto keeps four decimals, everything else is in cents.
    let decimals = if quote.class == AssetClass::Crypto && raw < Decimal::ONE { 4 } else { 2 };
    let new_price = raw
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .max(MIN_TRADABLE_PRICE);

    quote.daily_change = ((new_price - old_price) / old_price).to_f64().unwrap_or(0.0);
    quote.price = new_price;
}
