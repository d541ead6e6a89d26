// In crates/analytics/src/quant/secondary.rs

//! Secondary ratios that complement the four primary metrics.

use core_types::Trade;

use crate::aggregate;
use crate::stats;

const EDGE_MIN_TRADES: usize = 10;
const EDGE_WINDOWS: usize = 3;

/// Stability of the win rate across three equal chronological windows,
/// in `[0, 1]`. Zero below ten trades.
pub fn edge_consistency_ratio(trades: &[Trade]) -> f64 {
    if trades.len() < EDGE_MIN_TRADES {
        return 0.0;
    }
    let ordered = aggregate::chronological(trades);
    let window = ordered.len() / EDGE_WINDOWS;

    let win_rates: Vec<f64> = ordered
        .chunks(window)
        .take(EDGE_WINDOWS)
        .map(|chunk| chunk.iter().filter(|t| t.is_win()).count() as f64 / chunk.len() as f64)
        .collect();

    (1.0 - stats::std_dev(&win_rates) * 3.0).max(0.0)
}

/// Blends the DQI score with a tier for the average tracked risk.
pub fn risk_adjusted_discipline(trades: &[Trade], dqi_score: f64) -> f64 {
    let risks: Vec<f64> = trades.iter().filter_map(Trade::tracked_risk).collect();
    let avg_risk = stats::mean(&risks);

    let risk_tier = if avg_risk <= 1.0 {
        100.0
    } else if avg_risk <= 2.0 {
        80.0
    } else if avg_risk <= 3.0 {
        60.0
    } else {
        40.0
    };

    (dqi_score * 0.6 + risk_tier * 0.4).round()
}

/// Normalized entropy of strategy usage, in `[0, 1]`; lower is more systematic.
pub fn behavioral_entropy(trades: &[Trade]) -> f64 {
    let usage = aggregate::tally(trades.iter().map(|t| t.strategy_name().unwrap_or("none")));
    stats::normalized_entropy(&usage)
}

/// Percentage of asset categories that are net profitable. Neutral 50 when
/// fewer than two categories were traded.
pub fn market_adaptability_index(trades: &[Trade]) -> f64 {
    let categories = aggregate::by_asset_category(trades, "Unknown");
    if categories.len() < 2 {
        return 50.0;
    }
    let profitable = categories
        .values()
        .filter(|group| aggregate::summarize(group).total_profit > 0.0)
        .count();
    stats::percentage(profitable, categories.len()).round()
}
