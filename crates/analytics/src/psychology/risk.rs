// In crates/analytics/src/psychology/risk.rs

use core_types::Trade;
use itertools::Itertools;

use super::profile::{RiskAnalysis, RiskViolation, Severity, ViolationKind};
use crate::stats::{self, Grade};

const OVERSIZED_RISK_PCT: f64 = 3.0;
const MARTINGALE_FACTOR: f64 = 1.5;
const EXAMPLE_LIMIT: usize = 3;

/// Analyzes risk habits over chronologically ordered trades.
pub fn analyze_risk(ordered: &[&Trade]) -> RiskAnalysis {
    let risks: Vec<f64> = ordered.iter().filter_map(|t| t.tracked_risk()).collect();
    let average_risk_per_trade = stats::mean(&risks);
    let rrs: Vec<f64> = ordered.iter().filter_map(|t| t.tracked_rr_planned()).collect();
    let average_planned_rr = stats::mean(&rrs);

    let risk_violations: Vec<RiskViolation> = [
        oversized_positions(ordered),
        missing_stop_losses(ordered),
        martingale(ordered),
    ]
    .into_iter()
    .flatten()
    .collect();

    RiskAnalysis {
        overall_score: risk_score(&risk_violations, average_risk_per_trade, average_planned_rr),
        position_sizing_grade: position_sizing_grade(average_risk_per_trade),
        risk_reward_grade: risk_reward_grade(average_planned_rr),
        max_drawdown_respect: stats::percentage(
            ordered.iter().filter(|t| t.has_stop_loss()).count(),
            ordered.len(),
        ),
        average_risk_per_trade,
        average_planned_rr,
        risk_violations,
        capital_preservation_score: capital_preservation(ordered),
    }
}

fn position_sizing_grade(avg_risk: f64) -> Grade {
    if avg_risk <= 1.0 {
        Grade::A
    } else if avg_risk <= 2.0 {
        Grade::B
    } else if avg_risk <= 3.0 {
        Grade::C
    } else if avg_risk <= 5.0 {
        Grade::D
    } else {
        Grade::F
    }
}

fn risk_reward_grade(avg_rr: f64) -> Grade {
    if avg_rr >= 3.0 {
        Grade::A
    } else if avg_rr >= 2.0 {
        Grade::B
    } else if avg_rr >= 1.5 {
        Grade::C
    } else if avg_rr >= 1.0 {
        Grade::D
    } else {
        Grade::F
    }
}

fn oversized_positions(trades: &[&Trade]) -> Option<RiskViolation> {
    let oversized: Vec<(&Trade, f64)> = trades
        .iter()
        .filter_map(|t| t.tracked_risk().filter(|r| *r > OVERSIZED_RISK_PCT).map(|r| (*t, r)))
        .collect();
    if oversized.is_empty() {
        return None;
    }

    Some(RiskViolation {
        kind: ViolationKind::OversizedPosition,
        severity: if oversized.len() > 3 {
            Severity::Critical
        } else {
            Severity::Warning
        },
        occurrences: oversized.len(),
        examples: oversized
            .iter()
            .take(EXAMPLE_LIMIT)
            .map(|(t, risk)| format!("{}: {risk}% risk", t.symbol))
            .collect(),
        recommendation: "Reduce position size to maximum 2% per trade".to_string(),
    })
}

fn missing_stop_losses(trades: &[&Trade]) -> Option<RiskViolation> {
    let unprotected: Vec<&Trade> = trades.iter().copied().filter(|t| !t.has_stop_loss()).collect();
    if unprotected.is_empty() {
        return None;
    }

    Some(RiskViolation {
        kind: ViolationKind::NoStopLoss,
        severity: Severity::Critical,
        occurrences: unprotected.len(),
        examples: unprotected
            .iter()
            .take(EXAMPLE_LIMIT)
            .map(|t| format!("{} on {}", t.symbol, t.date))
            .collect(),
        recommendation: "Always set a stop loss before entering any trade".to_string(),
    })
}

/// Lot size raised by more than half immediately after a loss. Both lot
/// sizes must be recorded.
fn martingale(trades: &[&Trade]) -> Option<RiskViolation> {
    let increases: Vec<String> = trades
        .iter()
        .tuple_windows()
        .filter_map(|(prev, curr)| {
            let (before, after) = (prev.lot_size?, curr.lot_size?);
            (prev.is_loss() && before > 0.0 && after > before * MARTINGALE_FACTOR)
                .then(|| format!("{}: Increased size from {before} to {after} after loss", curr.date))
        })
        .collect();
    if increases.is_empty() {
        return None;
    }

    Some(RiskViolation {
        kind: ViolationKind::Martingale,
        severity: Severity::Critical,
        occurrences: increases.len(),
        examples: increases.into_iter().take(EXAMPLE_LIMIT).collect(),
        recommendation: "Never increase position size after losses. Use fixed fractional sizing.".to_string(),
    })
}

fn risk_score(violations: &[RiskViolation], avg_risk: f64, avg_rr: f64) -> f64 {
    let mut score = 100.0;

    for violation in violations {
        score -= match violation.severity {
            Severity::Critical => 25.0,
            Severity::Warning => 15.0,
        };
    }

    if avg_risk > 5.0 {
        score -= 20.0;
    } else if avg_risk > 3.0 {
        score -= 15.0;
    } else if avg_risk > 2.0 {
        score -= 10.0;
    }

    if avg_rr < 1.0 {
        score -= 15.0;
    } else if avg_rr < 1.5 {
        score -= 10.0;
    } else if avg_rr < 2.0 {
        score -= 5.0;
    }

    stats::clamp_score(score)
}

/// Average of a worst-loss tier and an average-loss tier, in account currency.
fn capital_preservation(trades: &[&Trade]) -> f64 {
    let worst = trades.iter().map(|t| t.profit_f64()).fold(0.0, f64::min);
    let losses: Vec<f64> = trades.iter().filter(|t| t.is_loss()).map(|t| t.profit_f64().abs()).collect();
    let avg_loss = stats::mean(&losses);

    let worst_tier = if worst > -5.0 {
        100.0
    } else if worst > -10.0 {
        70.0
    } else if worst > -20.0 {
        40.0
    } else {
        20.0
    };
    let avg_tier = if avg_loss < 2.0 {
        100.0
    } else if avg_loss < 3.0 {
        80.0
    } else if avg_loss < 5.0 {
        60.0
    } else {
        40.0
    };

    ((worst_tier + avg_tier) / 2.0_f64).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trade(profit: i64) -> Trade {
        Trade {
            date: "2024-02-01".to_string(),
            symbol: "XAUUSD".to_string(),
            profit: Decimal::from(profit),
            sl: dec!(1900),
            ..Default::default()
        }
    }

    #[test]
    fn single_unprotected_trade() {
        let t = Trade { sl: Decimal::ZERO, ..trade(5) };
        let risk = analyze_risk(&[&t]);

        assert_eq!(risk.risk_violations.len(), 1);
        let v = &risk.risk_violations[0];
        assert_eq!(v.kind, ViolationKind::NoStopLoss);
        assert_eq!(v.occurrences, 1);
        assert_eq!(v.examples, vec!["XAUUSD on 2024-02-01".to_string()]);
        // 100 - 25 critical - 15 for an untracked R:R
        assert_eq!(risk.overall_score, 60.0);
        assert_eq!(risk.max_drawdown_respect, 0.0);
        assert_eq!(risk.risk_reward_grade, Grade::F);
    }

    #[test]
    fn oversized_positions_escalate_after_three() {
        let trades: Vec<Trade> = (0..4)
            .map(|_| Trade { risk_percent: Some(4.0), rr_planned: Some(2.0), ..trade(10) })
            .collect();
        let refs: Vec<&Trade> = trades.iter().collect();
        let risk = analyze_risk(&refs);

        let v = &risk.risk_violations[0];
        assert_eq!(v.kind, ViolationKind::OversizedPosition);
        assert_eq!(v.severity, Severity::Critical);
        assert_eq!(v.examples.len(), 3);
        assert_eq!(v.examples[0], "XAUUSD: 4% risk");
        assert_eq!(risk.position_sizing_grade, Grade::D);
        assert_eq!(risk.risk_reward_grade, Grade::B);
        // 100 - 25 - 15 (avg risk > 3)
        assert_eq!(risk.overall_score, 60.0);
    }

    #[test]
    fn martingale_needs_a_prior_loss() {
        let a = Trade { lot_size: Some(1.0), ..trade(-10) };
        let b = Trade { lot_size: Some(2.0), ..trade(-10) };
        let c = Trade { lot_size: Some(4.0), ..trade(30) };
        let d = Trade { lot_size: Some(8.0), ..trade(5) };
        let risk = analyze_risk(&[&a, &b, &c, &d]);

        let v = risk
            .risk_violations
            .iter()
            .find(|v| v.kind == ViolationKind::Martingale)
            .expect("martingale violation");
        assert_eq!(v.occurrences, 2);
        assert_eq!(v.examples[0], "2024-02-01: Increased size from 1 to 2 after loss");
    }

    #[test]
    fn capital_preservation_tiers() {
        let small = trade(-1);
        let risk = analyze_risk(&[&small]);
        assert_relative_eq!(risk.capital_preservation_score, 100.0);

        let big = trade(-50);
        let risk = analyze_risk(&[&small, &big]);
        // worst tier 20, average loss 25.5 -> 40
        assert_relative_eq!(risk.capital_preservation_score, 30.0);
    }
}
