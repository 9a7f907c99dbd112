// In crates/market/src/error.rs

use core_types::AssetClass;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Asset '{name}' is listed more than once ({first} and {second})")]
    DuplicateAsset {
        name: String,
        first: AssetClass,
        second: AssetClass,
    },

    #[error("Invalid quote for '{name}': {reason}")]
    InvalidQuote { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
