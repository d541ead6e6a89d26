// In crates/core-types/src/lib.rs

pub mod error;
pub mod journal;
pub mod strategy;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use journal::{Journal, JournalSettings};
pub use strategy::{Strategy, StrategyStatus};
pub use types::{AssetCategory, Session, Trade, TradeSide, TradeStatus};
