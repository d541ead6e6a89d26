// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse journal JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {value}")]
    InvalidField { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
