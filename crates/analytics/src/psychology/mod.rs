// In crates/analytics/src/psychology/mod.rs

//! The psychological profiler.
//!
//! Every detector runs over the trades in chronological order, so the
//! profile does not depend on how the journal happens to be stored.

pub mod consistency;
pub mod execution;
pub mod patterns;
pub mod plan;
pub mod profile;
pub mod risk;
pub mod weaknesses;

use core_types::{Session, Strategy, Trade};

use crate::aggregate;
use crate::stats;

pub use profile::*;

const RISK_WEIGHT: f64 = 0.35;
const EXECUTION_WEIGHT: f64 = 0.30;
const EMOTIONAL_WEIGHT: f64 = 0.15;
const PROFIT_FACTOR_WEIGHT: f64 = 0.20;

/// Builds the full profile. Sessions and strategies are accepted for
/// parity with the other entry points; the profile reads trades only.
pub fn generate_profile(
    trades: &[Trade],
    _sessions: &[Session],
    _strategies: &[Strategy],
) -> PsychologicalProfile {
    let ordered = aggregate::chronological(trades);

    // 1. Independent analyses
    let behavioral_patterns = patterns::detect_patterns(&ordered);
    let risk_management = risk::analyze_risk(&ordered);
    let psychological_weaknesses = weaknesses::identify_weaknesses(&ordered);
    let strategy_execution = execution::score_execution(&ordered);
    let consistency_metrics = consistency::consistency_metrics(&ordered);

    // 2. Overall score
    let overall_score = overall_score(
        &risk_management,
        &strategy_execution,
        &consistency_metrics,
        &psychological_weaknesses,
    );

    // 3. Synthesis
    let improvement_plan = plan::improvement_plan(
        &behavioral_patterns,
        &risk_management,
        &psychological_weaknesses,
        &strategy_execution,
    );
    let red_flags = plan::red_flags(&risk_management, &psychological_weaknesses);
    let strengths = plan::strengths(&behavioral_patterns, &consistency_metrics);

    PsychologicalProfile {
        overall_score,
        grade: stats::score_to_grade(overall_score),
        behavioral_patterns,
        risk_management,
        psychological_weaknesses,
        strategy_execution,
        consistency_metrics,
        improvement_plan,
        red_flags,
        strengths,
    }
}

fn overall_score(
    risk: &RiskAnalysis,
    execution: &StrategyExecutionScore,
    consistency: &ConsistencyMetrics,
    weaknesses: &[PsychologicalWeakness],
) -> f64 {
    let penalty: f64 = weaknesses
        .iter()
        .map(|w| w.frequency / 100.0 * w.severity.weight())
        .sum();

    let raw = RISK_WEIGHT * risk.overall_score
        + EXECUTION_WEIGHT * execution.overall_score
        + EMOTIONAL_WEIGHT * consistency.emotional_consistency
        + PROFIT_FACTOR_WEIGHT * (consistency.profit_factor * 20.0).min(100.0)
        - penalty;

    stats::clamp_score(raw.round())
}
