// In crates/analytics/tests/scenarios.rs

use analytics::aggregate::UNSPECIFIED;
use analytics::psychology::ViolationKind;
use analytics::{AnalyticsEngine, Error};
use approx::assert_relative_eq;
use core_types::{Journal, Trade};
use rust_decimal::Decimal;

fn trade(date: &str, time: &str, profit: i64) -> Trade {
    Trade {
        date: date.to_string(),
        time: time.to_string(),
        symbol: "GBPUSD".to_string(),
        profit: Decimal::from(profit),
        sl: Decimal::new(12_500, 4),
        ..Default::default()
    }
}

fn journal(trades: Vec<Trade>) -> Journal {
    Journal { trades, ..Default::default() }
}

#[test]
fn six_wins_four_losses() {
    let mut trades: Vec<Trade> = (1..=6).map(|d| trade(&format!("2024-01-{d:02}"), "10:00", 100)).collect();
    trades.extend((7..=10).map(|d| trade(&format!("2024-01-{d:02}"), "10:00", -50)));
    let snapshot = journal(trades);
    let engine = AnalyticsEngine::new();

    let profile = engine.profile(&snapshot).expect("ten trades is enough");
    let consistency = &profile.profile.consistency_metrics;
    assert_relative_eq!(consistency.win_rate, 60.0);
    assert_relative_eq!(consistency.profit_factor, 3.0);
    assert_relative_eq!(consistency.expectancy, 40.0);

    let headline = engine.dashboard(&snapshot, None).headline;
    assert_relative_eq!(headline.total_profit, 400.0);
    assert_relative_eq!(headline.profit_factor, 3.0);
}

#[test]
fn single_trade_without_stop_loss() {
    let snapshot = journal(vec![Trade { sl: Decimal::ZERO, ..trade("2024-01-01", "10:00", 10) }]);
    let engine = AnalyticsEngine::with_settings(analytics::AnalyticsSettings {
        min_profile_trades: 1,
        ..Default::default()
    });

    let profile = engine.profile(&snapshot).expect("threshold lowered");
    let violation = profile
        .profile
        .risk_management
        .risk_violations
        .iter()
        .find(|v| v.kind == ViolationKind::NoStopLoss)
        .expect("no_stop_loss violation");
    assert_eq!(violation.occurrences, 1);

    let dqi = engine.quantitative(&snapshot).decision_quality_index;
    assert!(dqi.violations.iter().any(|v| v.contains("without stop loss")));
}

#[test]
fn losses_after_losses_are_revenge_trades() {
    let trades = vec![
        trade("2024-01-02", "09:00", -10),
        trade("2024-01-02", "09:30", -10),
        trade("2024-01-02", "10:00", -10),
        trade("2024-01-02", "10:30", -10),
        trade("2024-01-03", "09:00", 50),
        trade("2024-01-03", "09:30", -10),
    ];
    // Newest first, the way the journal stores them.
    let snapshot = journal(trades.into_iter().rev().collect());

    let profile = AnalyticsEngine::new().profile(&snapshot).expect("six trades");
    let revenge = profile
        .profile
        .behavioral_patterns
        .iter()
        .find(|p| p.id == "revenge_trading")
        .expect("revenge pattern");
    assert_eq!(revenge.trades_affected, 3);
}

#[test]
fn evenly_performing_sessions_are_stable() {
    let trades: Vec<Trade> = ["London", "New York", "Asia"]
        .iter()
        .flat_map(|session| {
            [40, -10, 30, 20].into_iter().enumerate().map(move |(i, profit)| Trade {
                session: session.to_string(),
                ..trade(&format!("2024-01-{:02}", i + 1), "10:00", profit)
            })
        })
        .collect();
    let metrics = AnalyticsEngine::new().quantitative(&journal(trades));

    let stability = &metrics.session_performance_stability;
    assert_eq!(stability.stability_score, 100.0);
    assert_eq!(stability.session_breakdown.len(), 3);
    assert!(stability.session_breakdown.iter().all(|s| s.session != UNSPECIFIED));
}

#[test]
fn profile_refused_below_minimum() {
    let snapshot = journal(vec![trade("2024-01-01", "10:00", 5); 2]);
    assert!(matches!(
        AnalyticsEngine::new().profile(&snapshot),
        Err(Error::InsufficientTrades { required: 5, actual: 2 })
    ));
}

#[test]
fn report_from_journal_json() {
    let json = r#"{
        "trades": [
            {"id": "1", "date": "2024-05-06", "time": "08:30", "symbol": "EURUSD", "type": "buy",
             "entry": 1.07, "exit": 1.08, "sl": 1.065, "tp": 1.08, "riskPercent": 1, "rrPlanned": 2,
             "profit": 100, "status": "TP", "emotionBefore": "Calm", "strategy": "Breakout",
             "session": "London", "rulesUsed": ["Trend"]},
            {"id": "2", "date": "2024-05-07", "time": "15:10", "symbol": "BTCUSD", "type": "sell",
             "profit": -40, "status": "SL", "assetCategory": "Crypto", "emotionBefore": "FOMO",
             "mistakes": ["Chased entry"], "session": "New York"}
        ],
        "sessions": [{"id": "s1", "name": "London", "initialCapital": 2000}],
        "strategies": [{"id": "x", "name": "Breakout", "rules": ["Trend", "Retest"]}],
        "settings": {"balance": 1500}
    }"#;
    let snapshot = Journal::from_json(json).expect("valid journal");
    let report = AnalyticsEngine::new().full_report(&snapshot, None);

    assert!(report.profile.is_none());
    assert_eq!(report.dashboard.equity_curve[0].balance, Decimal::from(1500));
    assert_eq!(report.dashboard.sessions[0].equity, Decimal::from(2100));
    assert_eq!(report.dashboard.strategies[0].rule_count, 2);
    assert_eq!(report.dashboard.discipline.top_mistakes[0].mistake, "Chased entry");

    let value = serde_json::to_value(&report).expect("serializable");
    assert!(value["metrics"]["decisionQualityIndex"]["score"].is_number());
    assert!(value["profile"].is_null());
}
