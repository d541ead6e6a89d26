// In crates/core-types/src/journal.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::strategy::Strategy;
use crate::types::{Session, Trade};

/// Account-level settings stored alongside the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalSettings {
    pub balance: Decimal,
    pub risk_default: f64,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            balance: Decimal::new(1000, 0),
            risk_default: 1.0,
        }
    }
}

/// A full snapshot of the journal: every trade, session and strategy.
///
/// Unknown keys written by the journal front-end (theme, language, ...)
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Journal {
    pub trades: Vec<Trade>,
    pub sessions: Vec<Session>,
    pub strategies: Vec<Strategy>,
    pub settings: JournalSettings,
}

impl Journal {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn loads_snapshot_with_front_end_settings() {
        let json = r#"{
            "trades": [{"id": "a", "profit": -12.5, "status": "SL"}],
            "sessions": [{"id": "s1", "name": "Asia", "initialCapital": 5000}],
            "strategies": [{"id": "x", "name": "Breakout", "status": "Testing", "rules": ["Wait for close"]}],
            "settings": {"balance": 2500, "riskDefault": 0.5, "theme": "dark", "language": "en"}
        }"#;

        let journal = Journal::from_json(json).unwrap();
        assert_eq!(journal.trades.len(), 1);
        assert_eq!(journal.trades[0].profit, dec!(-12.5));
        assert_eq!(journal.sessions[0].initial_capital, Some(dec!(5000)));
        assert_eq!(journal.strategies[0].rules.len(), 1);
        assert_eq!(journal.settings.balance, dec!(2500));
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let journal = Journal::from_json(r#"{"trades": []}"#).unwrap();
        assert!(journal.is_empty());
        assert_eq!(journal.settings.balance, dec!(1000));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(Journal::from_json("{"), Err(crate::Error::Json(_))));
    }
}
