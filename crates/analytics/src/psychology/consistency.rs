// In crates/analytics/src/psychology/consistency.rs

use core_types::Trade;

use super::profile::ConsistencyMetrics;
use crate::aggregate;
use crate::stats;

/// Outcome and habit consistency over chronologically ordered trades.
pub fn consistency_metrics(ordered: &[&Trade]) -> ConsistencyMetrics {
    let summary = aggregate::summarize(ordered);
    let streaks = aggregate::streaks(ordered.iter().copied());

    let daily_counts: Vec<f64> = aggregate::daily_trade_counts(ordered.iter().copied())
        .values()
        .map(|c| *c as f64)
        .collect();
    let avg_daily = stats::mean(&daily_counts);
    let trading_frequency_consistency =
        (100.0 - stats::variance(&daily_counts) / avg_daily.max(1.0) * 20.0).max(0.0);

    let tracked = ordered.iter().filter(|t| t.emotion_before_label().is_some()).count();

    ConsistencyMetrics {
        win_rate: summary.win_rate,
        profit_factor: stats::profit_factor(summary.gross_profit, summary.gross_loss),
        expectancy: stats::expectancy(
            summary.win_rate,
            summary.gross_profit,
            summary.wins,
            summary.gross_loss,
            summary.losses,
        ),
        consecutive_wins: streaks.max_wins,
        consecutive_losses: streaks.max_losses,
        volatility_of_returns: summary.volatility,
        trading_frequency_consistency,
        emotional_consistency: stats::percentage(tracked, ordered.len()),
    }
}
