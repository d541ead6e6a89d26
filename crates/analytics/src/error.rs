// In crates/analytics/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Need at least {required} trades for a profile, got {actual}")]
    InsufficientTrades { required: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
