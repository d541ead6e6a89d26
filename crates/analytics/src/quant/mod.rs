// In crates/analytics/src/quant/mod.rs

//! Quantitative metrics: DQI, EIS, SRC, SPS, the secondary ratios and the
//! composite grade built from them.

pub mod decision_quality;
pub mod emotional_impact;
pub mod secondary;
pub mod session_stability;
pub mod strategy_reliability;

pub use decision_quality::decision_quality_index;
pub use emotional_impact::emotional_impact_score;
pub use session_stability::session_stability;
pub use strategy_reliability::strategy_reliability;

use core_types::{Session, Strategy, Trade};

use crate::stats::{self, score_to_grade};
use crate::types::QuantitativeMetrics;

/// Computes every quantitative metric for a trade set.
///
/// Trades are grouped by the strategy and session labels they carry; the
/// session and strategy records are not consulted.
pub fn compute_quantitative_metrics(
    trades: &[Trade],
    _sessions: &[Session],
    _strategies: &[Strategy],
) -> QuantitativeMetrics {
    if trades.is_empty() {
        return QuantitativeMetrics::empty();
    }

    // --- Primary metrics ---
    let dqi = decision_quality_index(trades);
    let eis = emotional_impact_score(trades);
    let src = strategy_reliability(trades);
    let sps = session_stability(trades);

    // --- Secondary metrics ---
    let edge_consistency_ratio = secondary::edge_consistency_ratio(trades);
    let risk_adjusted_discipline = secondary::risk_adjusted_discipline(trades, dqi.score);
    let behavioral_entropy = secondary::behavioral_entropy(trades);
    let market_adaptability_index = secondary::market_adaptability_index(trades);

    // --- Composite ---
    let composite_score = stats::clamp_score(
        (dqi.score * 0.30
            + eis.score * 0.20
            + src.overall_coefficient * 0.25
            + sps.stability_score * 0.15
            + edge_consistency_ratio * 10.0)
            .round(),
    );

    QuantitativeMetrics {
        decision_quality_index: dqi,
        emotional_impact_score: eis,
        strategy_reliability_coefficient: src,
        session_performance_stability: sps,
        edge_consistency_ratio,
        risk_adjusted_discipline,
        behavioral_entropy,
        market_adaptability_index,
        overall_quantitative_grade: score_to_grade(composite_score),
        composite_score,
    }
}
