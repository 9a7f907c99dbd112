// In crates/portfolio/src/error.rs

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Not enough balance to buy {asset}: need ${required}, have ${available}")]
    InsufficientFunds {
        asset: String,
        required: Decimal,
        available: Decimal,
    },

    #[error("Not enough {asset} to sell: requested {requested}, holding {held}")]
    InsufficientHoldings { asset: String, requested: u64, held: u64 },

    #[error("Quantity for {asset} must be at least 1")]
    InvalidQuantity { asset: String },

    #[error("Trade price for {asset} must be positive, got {price}")]
    InvalidPrice { asset: String, price: Decimal },

    #[error("Trade in {asset} is too large to book")]
    AmountOverflow { asset: String },

    #[error("Initial balance cannot be negative, got {0}")]
    NegativeBalance(Decimal),
}

pub type Result<T> = std::result::Result<T, Error>;
