// In crates/core-types/src/strategy.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StrategyStatus {
    #[default]
    Active,
    Testing,
    Archived,
}

/// A named trading plan. Trades reference it by name through
/// `Trade::strategy`, and its rules through `Trade::rules_used`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: StrategyStatus,
    // Ordered list of the plan's rules, free text.
    pub rules: Vec<String>,
}

impl Strategy {
    /// Exact match on the trimmed name.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim() == name.trim()
    }
}
