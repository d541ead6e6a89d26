// In crates/analytics/src/psychology/execution.rs

use core_types::Trade;

use super::profile::{DeviationImpact, StrategyDeviation, StrategyExecutionScore};
use crate::aggregate;
use crate::stats;

/// Share of trades expected to carry a strategy tag.
const EXPECTED_TAGGED_SHARE: f64 = 0.7;
const DEVIATION_MIN_TRADES: usize = 5;
const DEVIATION_MIN_WIN_RATE: f64 = 60.0;

pub fn score_execution(trades: &[&Trade]) -> StrategyExecutionScore {
    let n = trades.len();

    // 1. Plan adherence: R:R, strategy and emotion all recorded.
    let planned = trades
        .iter()
        .filter(|t| t.tracked_rr_planned().is_some() && t.has_strategy() && t.emotion_before_label().is_some())
        .count();
    let plan_adherence = stats::percentage(planned, n);

    // 2. Entry timing: winners taken from a strategy.
    let winners = trades.iter().filter(|t| t.is_win()).count();
    let strategic_winners = trades.iter().filter(|t| t.is_win() && t.has_strategy()).count();
    let entry_timing = stats::percentage(strategic_winners, winners.max(1));

    // 3. Exit timing: closed at the planned target or stop.
    let planned_exits = trades.iter().filter(|t| t.status.is_planned_exit()).count();
    let exit_timing = stats::percentage(planned_exits, n);

    // 4. Strategy consistency
    let tagged = trades.iter().filter(|t| t.has_strategy()).count();
    let strategy_consistency = if n == 0 {
        0.0
    } else {
        (tagged as f64 / (n as f64 * EXPECTED_TAGGED_SHARE) * 100.0).min(100.0)
    };

    // 5. Rule following
    let with_rules = trades.iter().filter(|t| !t.rules_used.is_empty()).count();
    let rule_following = stats::percentage(with_rules, n);

    let overall_score =
        ((plan_adherence + entry_timing + exit_timing + strategy_consistency + rule_following) / 5.0).round();

    StrategyExecutionScore {
        overall_score,
        plan_adherence,
        entry_timing,
        exit_timing,
        strategy_consistency,
        rule_following,
        common_deviations: deviations(trades, strategy_consistency),
    }
}

/// Winning strategies that are used less often than the journal is tagged.
fn deviations(trades: &[&Trade], strategy_consistency: f64) -> Vec<StrategyDeviation> {
    let tagged = aggregate::group_by(trades.iter().copied(), |t| t.strategy_name().map(str::to_string));

    tagged
        .iter()
        .filter_map(|(name, group)| {
            let summary = aggregate::summarize(group);
            (summary.win_rate > DEVIATION_MIN_WIN_RATE && group.len() >= DEVIATION_MIN_TRADES).then(|| {
                StrategyDeviation {
                    rule: format!("Stick to {name} strategy"),
                    violation_rate: 100.0 - strategy_consistency,
                    impact: DeviationImpact::Negative,
                    context: format!(
                        "This strategy has {:.0}% win rate but you only use it {:.0}% of the time",
                        summary.win_rate, strategy_consistency
                    ),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core_types::TradeStatus;
    use rust_decimal::Decimal;

    fn trade(strategy: &str, profit: i64) -> Trade {
        Trade {
            strategy: strategy.to_string(),
            profit: Decimal::from(profit),
            ..Default::default()
        }
    }

    #[test]
    fn scores_each_dimension() {
        let trades = vec![
            Trade {
                rr_planned: Some(2.0),
                emotion_before: Some("calm".to_string()),
                status: TradeStatus::TakeProfit,
                rules_used: vec!["HTF trend".to_string()],
                ..trade("Breakout", 50)
            },
            Trade { status: TradeStatus::StopLoss, ..trade("", -20) },
            trade("", 10),
            trade("Breakout", -5),
        ];
        let refs: Vec<&Trade> = trades.iter().collect();
        let score = score_execution(&refs);

        assert_relative_eq!(score.plan_adherence, 25.0);
        assert_relative_eq!(score.entry_timing, 50.0);
        assert_relative_eq!(score.exit_timing, 50.0);
        assert_relative_eq!(score.strategy_consistency, 2.0 / 2.8 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(score.rule_following, 25.0);
        assert!(score.common_deviations.is_empty());
    }

    #[test]
    fn underused_winning_strategy_is_a_deviation() {
        let mut trades: Vec<Trade> = (0..5).map(|_| trade("Pullback", 10)).collect();
        trades.extend((0..5).map(|_| trade("", -10)));
        let refs: Vec<&Trade> = trades.iter().collect();
        let score = score_execution(&refs);

        assert_eq!(score.common_deviations.len(), 1);
        let deviation = &score.common_deviations[0];
        assert_eq!(deviation.rule, "Stick to Pullback strategy");
        assert_eq!(deviation.impact, DeviationImpact::Negative);
        assert_eq!(
            deviation.context,
            "This strategy has 100% win rate but you only use it 71% of the time"
        );
    }

    #[test]
    fn empty_input_scores_zero() {
        let score = score_execution(&[]);
        assert_eq!(score.overall_score, 0.0);
        assert_eq!(score.entry_timing, 0.0);
    }
}
