// In crates/analytics/src/lib.rs

//! Pure analytics over a trading journal snapshot: quantitative indices,
//! a psychological profile and dashboard aggregates.

pub mod aggregate;
pub mod classify;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod psychology;
pub mod quant;
pub mod stats;
pub mod types;

pub use dashboard::build_dashboard;
pub use engine::{AnalyticsEngine, FullReport};
pub use error::{Error, Result};
pub use psychology::{ProfileReport, PsychologicalProfile, generate_profile};
pub use quant::compute_quantitative_metrics;
pub use stats::{Grade, score_to_grade};
pub use types::*;
