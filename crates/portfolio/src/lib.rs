// In crates/portfolio/src/lib.rs

pub mod error;
pub mod ledger;
pub mod types;
pub mod valuation;

// Re-export public types
pub use error::{Error, Result};
pub use ledger::Portfolio;
pub use types::{Fill, Position, Valuation};
