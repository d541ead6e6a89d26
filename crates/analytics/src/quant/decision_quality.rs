// In crates/analytics/src/quant/decision_quality.rs

//! Decision Quality Index: scores the trading process independent of the
//! outcome of each trade.

use core_types::{Trade, TradeStatus};
use rust_decimal::Decimal;

use crate::aggregate;
use crate::classify::EMOTIONAL_MISTAKES;
use crate::stats::{self, score_to_grade};
use crate::types::{DecisionQualityComponents, DecisionQualityIndex};

/// Minimum sample for the daily-consistency bonus.
const BONUS_MIN_TRADES: usize = 10;

pub fn decision_quality_index(trades: &[Trade]) -> DecisionQualityIndex {
    let n = trades.len();
    if n == 0 {
        return DecisionQualityIndex {
            violations: vec!["Insufficient data".to_string()],
            ..Default::default()
        };
    }

    // --- Components ---
    let components = DecisionQualityComponents {
        plan_quality: average(trades, plan_quality),
        risk_management: average(trades, risk_management),
        execution_precision: average(trades, execution_precision),
        emotional_control: average(trades, emotional_control),
        documentation: average(trades, documentation),
    };

    let weighted = components.plan_quality * 0.25
        + components.risk_management * 0.25
        + components.execution_precision * 0.20
        + components.emotional_control * 0.15
        + components.documentation * 0.15;

    // --- Penalties ---
    let mut violations = Vec::new();
    let mut penalty = 0.0;

    let no_stop_loss = trades.iter().filter(|t| !t.has_stop_loss()).count();
    if no_stop_loss > 0 {
        violations.push(format!("{no_stop_loss} trades without stop loss"));
        penalty += no_stop_loss as f64 / n as f64 * 15.0;
    }

    let oversized = trades
        .iter()
        .filter(|t| t.risk_percent.unwrap_or(0.0) > 3.0)
        .count();
    if oversized > 0 {
        violations.push(format!("{oversized} oversized positions"));
        penalty += oversized as f64 / n as f64 * 10.0;
    }

    let no_strategy = trades.iter().filter(|t| !t.has_strategy()).count();
    if no_strategy > 0 {
        violations.push(format!("{no_strategy} trades without strategy"));
        penalty += no_strategy as f64 / n as f64 * 10.0;
    }

    // --- Final score ---
    let multiplier = 1.0 + consistency_bonus(trades);
    let final_score = stats::clamp_score(weighted * (1.0 - penalty / 100.0) * multiplier);
    let score = final_score.round();

    let spread = stats::std_dev(&aggregate::profits(trades));
    let (lo, hi) = stats::confidence_interval_95(final_score, spread, n, 0.0, 100.0);

    DecisionQualityIndex {
        score,
        grade: score_to_grade(score),
        components: DecisionQualityComponents {
            plan_quality: components.plan_quality.round(),
            risk_management: components.risk_management.round(),
            execution_precision: components.execution_precision.round(),
            emotional_control: components.emotional_control.round(),
            documentation: components.documentation.round(),
        },
        violations,
        confidence_interval: (lo.round(), hi.round()),
    }
}

fn average(trades: &[Trade], score: fn(&Trade) -> f64) -> f64 {
    trades.iter().map(score).sum::<f64>() / trades.len() as f64
}

pub(crate) fn plan_quality(trade: &Trade) -> f64 {
    let mut score = 0.0;
    if trade.tracked_rr_planned().is_some() {
        score += 30.0;
    }
    if trade.has_strategy() {
        score += 25.0;
    }
    let has_exit_plan = trade.exit != Decimal::ZERO || trade.has_take_profit() || trade.has_stop_loss();
    if trade.entry != Decimal::ZERO && has_exit_plan {
        score += 25.0;
    }
    if trade.notes.chars().count() > 10 {
        score += 20.0;
    }
    score
}

pub(crate) fn risk_management(trade: &Trade) -> f64 {
    // Untracked risk counts as 0%.
    let risk = trade.risk_percent.unwrap_or(0.0);
    let mut score = if risk <= 1.0 {
        40.0
    } else if risk <= 2.0 {
        30.0
    } else if risk <= 3.0 {
        15.0
    } else {
        5.0
    };

    if trade.has_stop_loss() {
        score += 30.0;
    }
    if trade.has_take_profit() {
        score += 20.0;
    }
    match trade.tracked_rr_planned() {
        Some(rr) if rr >= 2.0 => score += 10.0,
        Some(rr) if rr >= 1.5 => score += 5.0,
        _ => {}
    }
    score
}

pub(crate) fn execution_precision(trade: &Trade) -> f64 {
    let mut score = 0.0;

    if let (Some(actual), Some(planned)) = (trade.rr_actual, trade.tracked_rr_planned()) {
        let achievement = actual / planned;
        if achievement >= 0.9 {
            score += 40.0;
        } else if achievement >= 0.7 {
            score += 25.0;
        } else if achievement >= 0.5 {
            score += 10.0;
        }
    }

    score += match trade.status {
        TradeStatus::TakeProfit | TradeStatus::StopLoss => 30.0,
        TradeStatus::Breakeven => 20.0,
        TradeStatus::Open => 0.0,
    };

    if !trade.rules_used.is_empty() {
        score += 10.0;
    }
    score
}

pub(crate) fn emotional_control(trade: &Trade) -> f64 {
    let mut score = 0.0;
    if trade.emotion_before_label().is_some() {
        score += 40.0;
    }
    if trade.emotion_after_label().is_some() {
        score += 30.0;
    }
    let emotional_mistakes = trade
        .mistakes
        .iter()
        .filter(|m| EMOTIONAL_MISTAKES.matches(m))
        .count();
    score + (30.0 - emotional_mistakes as f64 * 10.0).max(0.0)
}

pub(crate) fn documentation(trade: &Trade) -> f64 {
    let mut score = 0.0;
    let note_len = trade.notes.chars().count();
    if note_len > 20 {
        score += 25.0;
    } else if note_len > 0 {
        score += 15.0;
    }
    if trade.screenshot.as_deref().is_some_and(|s| !s.is_empty()) {
        score += 25.0;
    }
    if !trade.mistakes.is_empty() {
        score += 25.0;
    }
    let complete = !trade.symbol.trim().is_empty()
        && trade.entry != Decimal::ZERO
        && !trade.date.trim().is_empty()
        && !trade.time.trim().is_empty();
    if complete {
        score += 25.0;
    }
    score
}

/// Bonus for steady daily P&L, from the coefficient of variation.
fn consistency_bonus(trades: &[Trade]) -> f64 {
    if trades.len() < BONUS_MIN_TRADES {
        return 0.0;
    }
    let cv = stats::coefficient_of_variation(&aggregate::daily_pnl(trades));
    if cv < 0.5 {
        0.2
    } else if cv < 1.0 {
        0.1
    } else if cv < 1.5 {
        0.05
    } else {
        0.0
    }
}
