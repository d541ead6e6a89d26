// In crates/analytics/src/quant/strategy_reliability.rs

use core_types::Trade;

use crate::aggregate;
use crate::stats;
use crate::types::{Reliability, StrategyReliabilityCoefficient, StrategyScore};

/// Below this sample a strategy is not scored at all.
const MIN_SCORED_TRADES: usize = 5;
/// Below this sample a scored strategy is still reported as untested.
const MIN_TESTED_TRADES: usize = 10;

pub fn strategy_reliability(trades: &[Trade]) -> StrategyReliabilityCoefficient {
    let groups = aggregate::by_strategy(aggregate::chronological(trades));

    let mut strategy_scores: Vec<StrategyScore> = groups
        .iter()
        .map(|(name, group)| score_strategy(name, group))
        .collect();
    strategy_scores.sort_by(|a, b| b.coefficient.total_cmp(&a.coefficient));

    let total: usize = strategy_scores.iter().map(|s| s.sample_size).sum();
    let overall_coefficient = if total == 0 {
        0.0
    } else {
        strategy_scores
            .iter()
            .map(|s| s.coefficient * s.sample_size as f64 / total as f64)
            .sum::<f64>()
            .round()
    };

    let tested: Vec<&StrategyScore> = strategy_scores
        .iter()
        .filter(|s| s.sample_size >= MIN_TESTED_TRADES)
        .collect();
    let best_strategy = tested.first().map(|s| s.strategy.clone());
    let worst_strategy = if tested.len() > 1 {
        tested.last().map(|s| s.strategy.clone())
    } else {
        None
    };

    StrategyReliabilityCoefficient {
        overall_coefficient: stats::clamp_score(overall_coefficient),
        strategy_scores,
        best_strategy,
        worst_strategy,
        diversification_score: (groups.len() as f64 * 25.0).min(100.0),
    }
}

/// Scores one strategy group. The group must be in chronological order for
/// the consecutive-loss count to be meaningful.
fn score_strategy(name: &str, group: &[&Trade]) -> StrategyScore {
    let n = group.len();
    if n < MIN_SCORED_TRADES {
        return StrategyScore {
            strategy: name.to_string(),
            reliability: Reliability::Untested,
            sample_size: n,
            ..Default::default()
        };
    }

    let summary = aggregate::summarize(group);
    let profits = aggregate::profits(group.iter().copied());

    let profit_factor = stats::profit_factor(summary.gross_profit, summary.gross_loss);
    let consistency = (1.0 - stats::coefficient_of_variation(&profits)).max(0.0);
    let expectancy = stats::expectancy(
        summary.win_rate,
        summary.gross_profit,
        summary.wins,
        summary.gross_loss,
        summary.losses,
    );
    let max_consecutive_losses = aggregate::streaks(group.iter().copied()).max_losses;

    // Every term is normalized onto 0-100 before weighting.
    let normalized_pf = (profit_factor * 25.0).min(100.0);
    let normalized_volatility = (100.0 - summary.volatility * 2.0).max(0.0);
    let coefficient = (summary.win_rate * 0.25
        + normalized_pf * 0.30
        + consistency * 100.0 * 0.25
        + normalized_volatility * 0.20)
        .round();

    let (lo, hi) = stats::confidence_interval_95(coefficient, summary.volatility, n, 0.0, 100.0);

    let reliability = if n < MIN_TESTED_TRADES {
        Reliability::Untested
    } else if coefficient >= 70.0 && summary.win_rate >= 55.0 {
        Reliability::High
    } else if coefficient >= 50.0 {
        Reliability::Medium
    } else {
        Reliability::Low
    };

    StrategyScore {
        strategy: name.to_string(),
        coefficient,
        reliability,
        win_rate: summary.win_rate,
        profit_factor,
        sample_size: n,
        expectancy,
        max_consecutive_losses,
        confidence_interval: (lo.round(), hi.round()),
    }
}
