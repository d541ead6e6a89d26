// In crates/analytics/src/engine.rs

use core_types::Journal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dashboard::build_dashboard;
use crate::error::{Error, Result};
use crate::psychology::{ProfileReport, generate_profile};
use crate::quant::compute_quantitative_metrics;
use crate::types::{AnalyticsSettings, Dashboard, QuantitativeMetrics};

/// Everything the engine computes for one journal snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullReport {
    pub metrics: QuantitativeMetrics,
    /// `None` when the journal is below the profile minimum.
    pub profile: Option<ProfileReport>,
    pub dashboard: Dashboard,
}

/// The entry point for analysing a journal.
///
/// The engine holds configuration only; every call works on the snapshot
/// it is given and can run from any thread.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: AnalyticsSettings,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AnalyticsSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    pub fn quantitative(&self, journal: &Journal) -> QuantitativeMetrics {
        tracing::debug!(trades = journal.trades.len(), "Computing quantitative metrics.");
        compute_quantitative_metrics(&journal.trades, &journal.sessions, &journal.strategies)
    }

    /// Builds the psychological profile, stamped with a fresh trader id
    /// and the current time.
    pub fn profile(&self, journal: &Journal) -> Result<ProfileReport> {
        let required = self.settings.min_profile_trades;
        let actual = journal.trades.len();
        if actual < required {
            tracing::warn!(required, actual, "Not enough trades for a psychological profile.");
            return Err(Error::InsufficientTrades { required, actual });
        }

        tracing::debug!(trades = actual, "Generating psychological profile.");
        let profile = generate_profile(&journal.trades, &journal.sessions, &journal.strategies);
        Ok(ProfileReport::new(profile))
    }

    pub fn dashboard(&self, journal: &Journal, session_filter: Option<&str>) -> Dashboard {
        tracing::debug!(trades = journal.trades.len(), session = ?session_filter, "Building dashboard.");
        build_dashboard(
            &journal.trades,
            &journal.sessions,
            &journal.strategies,
            self.starting_balance(journal),
            session_filter,
        )
    }

    /// Computes metrics, profile and dashboard in parallel on the rayon pool.
    pub fn full_report(&self, journal: &Journal, session_filter: Option<&str>) -> FullReport {
        let (metrics, (profile, dashboard)) = rayon::join(
            || self.quantitative(journal),
            || rayon::join(|| self.profile(journal).ok(), || self.dashboard(journal, session_filter)),
        );
        FullReport { metrics, profile, dashboard }
    }

    fn starting_balance(&self, journal: &Journal) -> Decimal {
        if journal.settings.balance.is_zero() {
            self.settings.starting_balance
        } else {
            journal.settings.balance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{JournalSettings, Trade};
    use rust_decimal_macros::dec;

    fn journal(n: usize) -> Journal {
        let trades = (0..n)
            .map(|i| Trade {
                date: format!("2024-04-{:02}", i + 1),
                time: "10:00".to_string(),
                profit: if i % 2 == 0 { dec!(20) } else { dec!(-10) },
                ..Default::default()
            })
            .collect();
        Journal {
            trades,
            ..Default::default()
        }
    }

    #[test]
    fn profile_requires_minimum_trades() {
        let engine = AnalyticsEngine::new();
        assert_eq!(
            engine.profile(&journal(4)),
            Err(Error::InsufficientTrades { required: 5, actual: 4 })
        );
        assert!(engine.profile(&journal(5)).is_ok());
    }

    #[test]
    fn minimum_is_configurable() {
        let engine = AnalyticsEngine::with_settings(AnalyticsSettings {
            min_profile_trades: 1,
            ..Default::default()
        });
        assert!(engine.profile(&journal(1)).is_ok());
    }

    #[test]
    fn zero_balance_falls_back_to_settings() {
        let mut snapshot = journal(2);
        snapshot.settings = JournalSettings {
            balance: Decimal::ZERO,
            ..Default::default()
        };
        let dashboard = AnalyticsEngine::new().dashboard(&snapshot, None);
        assert_eq!(dashboard.equity_curve[0].balance, dec!(1000));

        snapshot.settings.balance = dec!(250);
        let dashboard = AnalyticsEngine::new().dashboard(&snapshot, None);
        assert_eq!(dashboard.equity_curve[0].balance, dec!(250));
    }

    #[test]
    fn full_report_matches_individual_calls() {
        let engine = AnalyticsEngine::new();
        let snapshot = journal(3);
        let report = engine.full_report(&snapshot, None);

        assert_eq!(report.metrics, engine.quantitative(&snapshot));
        assert_eq!(report.dashboard, engine.dashboard(&snapshot, None));
        assert!(report.profile.is_none());
    }
}
