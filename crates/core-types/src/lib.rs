// In crates/core-types/src/lib.rs

pub mod error;
pub mod types;

use rust_decimal::Decimal;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use types::{AssetClass, AssetQuote, Side, TimeStep};

/// Read-only access to current market prices, keyed by asset name.
///
/// The portfolio ledger only ever needs to *read* prices; whoever owns the
/// quotes (the market catalog in production, a plain map in tests) implements
/// this to hand them out.
pub trait PriceSource {
    /// The latest price for `name`, or `None` if the asset is unknown.
    fn price_of(&self, name: &str) -> Option<Decimal>;
}
