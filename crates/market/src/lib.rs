// In crates/market/src/lib.rs

pub mod catalog;
pub mod error;
pub mod random;
pub mod simulator;

// Re-export public types
pub use catalog::{AssetCatalog, MIN_TRADABLE_PRICE};
pub use error::{Error, Result};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use simulator::PriceSimulator;
