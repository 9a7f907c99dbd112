// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown time step '{0}' (expected one of 1H, 4H, 1D, 1W, 1M)")]
    UnknownTimeStep(String),
}

pub type Result<T> = std::result::Result<T, Error>;
