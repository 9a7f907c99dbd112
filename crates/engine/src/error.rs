// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Asset '{0}' is not listed on any market")]
    AssetNotFound(String),

    #[error(transparent)]
    Portfolio(#[from] portfolio::Error),

    #[error(transparent)]
    Market(#[from] market::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
