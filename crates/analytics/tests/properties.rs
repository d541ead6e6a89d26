// In crates/analytics/tests/properties.rs

use analytics::{AnalyticsEngine, Grade, compute_quantitative_metrics, generate_profile, score_to_grade};
use core_types::{Journal, Trade, TradeStatus};
use proptest::prelude::*;
use rust_decimal::Decimal;

const EMOTIONS: &[&str] = &["", "Calm", "Confident", "FOMO", "Fear", "Greed", "Anxious", "Revenge"];
const STRATEGIES: &[&str] = &["", "Breakout", "Pullback", "Range", "News"];
const SESSIONS: &[&str] = &["", "London", "New York", "Asia"];
const MISTAKES: &[&str] = &["FOMO entry", "Moved SL", "Oversized", "Revenge trade"];

fn label(options: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(options).prop_map(str::to_string)
}

prop_compose! {
    fn arb_trade()(
        day in 1u32..=28,
        hour in 0u32..24,
        profit in -500i64..=500,
        sl in prop::bool::ANY,
        lot_size in prop::option::of(0.0f64..5.0),
        risk_percent in prop::option::of(0.0f64..8.0),
        rr_planned in prop::option::of(0.0f64..5.0),
        rr_actual in prop::option::of(0.0f64..5.0),
        status in prop::sample::select(vec![
            TradeStatus::TakeProfit,
            TradeStatus::StopLoss,
            TradeStatus::Breakeven,
            TradeStatus::Open,
        ]),
        emotion_before in label(EMOTIONS),
        emotion_after in label(EMOTIONS),
        strategy in label(STRATEGIES),
        session in label(SESSIONS),
        mistakes in prop::collection::vec(label(MISTAKES), 0..3),
        with_rules in prop::bool::ANY,
    ) -> Trade {
        Trade {
            date: format!("2024-02-{day:02}"),
            time: format!("{hour:02}:15"),
            symbol: "EURUSD".to_string(),
            profit: Decimal::from(profit),
            sl: if sl { Decimal::new(10_850, 4) } else { Decimal::ZERO },
            lot_size,
            risk_percent,
            rr_planned,
            rr_actual,
            status,
            emotion_before: Some(emotion_before),
            emotion_after: Some(emotion_after),
            mistakes,
            strategy,
            session,
            rules_used: if with_rules { vec!["Trend aligned".to_string()] } else { Vec::new() },
            ..Default::default()
        }
    }
}

fn in_range(score: f64) -> bool {
    (0.0..=100.0).contains(&score)
}

proptest! {
    #[test]
    fn composite_scores_stay_in_range(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let metrics = compute_quantitative_metrics(&trades, &[], &[]);

        prop_assert!(in_range(metrics.decision_quality_index.score));
        prop_assert!(in_range(metrics.emotional_impact_score.score));
        prop_assert!(in_range(metrics.strategy_reliability_coefficient.overall_coefficient));
        prop_assert!(in_range(metrics.session_performance_stability.stability_score));
        prop_assert!(in_range(metrics.composite_score));
        prop_assert_eq!(metrics.overall_quantitative_grade, score_to_grade(metrics.composite_score));
        prop_assert_eq!(
            metrics.decision_quality_index.grade,
            score_to_grade(metrics.decision_quality_index.score)
        );
    }

    #[test]
    fn profile_score_stays_in_range(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let profile = generate_profile(&trades, &[], &[]);

        prop_assert!(in_range(profile.overall_score));
        prop_assert!(in_range(profile.risk_management.overall_score));
        prop_assert!(in_range(profile.strategy_execution.overall_score));
        prop_assert_eq!(profile.grade, score_to_grade(profile.overall_score));
    }

    #[test]
    fn win_rate_ignores_storage_order(mut trades in prop::collection::vec(arb_trade(), 1..30)) {
        let forward = generate_profile(&trades, &[], &[]).consistency_metrics.win_rate;
        trades.reverse();
        let backward = generate_profile(&trades, &[], &[]).consistency_metrics.win_rate;
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn dashboard_discipline_is_graded(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let journal = Journal { trades, ..Default::default() };
        let discipline = AnalyticsEngine::new().dashboard(&journal, None).discipline;

        prop_assert!(in_range(discipline.decision_quality_score));
        prop_assert_eq!(discipline.grade, score_to_grade(discipline.decision_quality_score));
    }
}

#[test]
fn empty_journal_is_all_zero() {
    let metrics = compute_quantitative_metrics(&[], &[], &[]);
    assert_eq!(metrics.decision_quality_index.score, 0.0);
    assert_eq!(metrics.decision_quality_index.grade, Grade::F);
    assert_eq!(metrics.emotional_impact_score.emotional_awareness, 0.0);

    let profile = generate_profile(&[], &[], &[]);
    assert_eq!(profile.consistency_metrics.win_rate, 0.0);
    assert_eq!(profile.strategy_execution.plan_adherence, 0.0);
    assert_eq!(profile.risk_management.max_drawdown_respect, 0.0);
}
