// In crates/analytics/src/psychology/patterns.rs

//! Behavioral pattern detectors. Each detector emits at most one pattern.

use std::collections::BTreeSet;

use core_types::Trade;
use itertools::Itertools;

use super::profile::{BehavioralPattern, Impact, PatternFrequency};
use crate::aggregate;
use crate::classify::{EMOTIONAL_TRADING, FOMO};

const OVERTRADING_DAILY_LIMIT: usize = 5;
/// Entries after this hour count as late.
const LATE_ENTRY_HOUR: u32 = 14;
const EVIDENCE_LIMIT: usize = 5;

/// Runs every detector over chronologically ordered trades.
pub fn detect_patterns(ordered: &[&Trade]) -> Vec<BehavioralPattern> {
    [
        overtrading(ordered),
        revenge_trading(ordered),
        fomo_trading(ordered),
        strategy_hopping(ordered),
        emotional_trading(ordered),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn overtrading(trades: &[&Trade]) -> Option<BehavioralPattern> {
    let counts = aggregate::tally(trades.iter().map(|t| t.date.trim()));
    let heavy_days: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count > OVERTRADING_DAILY_LIMIT)
        .collect();
    if heavy_days.is_empty() {
        return None;
    }

    Some(BehavioralPattern {
        id: "overtrading".to_string(),
        name: "Overtrading".to_string(),
        description: "Taking too many trades in a single session, often a sign of boredom or FOMO".to_string(),
        frequency: if heavy_days.len() > 5 {
            PatternFrequency::Frequent
        } else {
            PatternFrequency::Occasional
        },
        impact: Impact::High,
        evidence: heavy_days.iter().map(|(date, count)| format!("{date}: {count} trades")).collect(),
        trades_affected: heavy_days.iter().map(|(_, count)| count).sum(),
    })
}

/// Losses that immediately follow another loss.
pub(crate) fn revenge_trades<'a>(trades: &[&'a Trade]) -> Vec<&'a Trade> {
    trades
        .iter()
        .tuple_windows()
        .filter(|(prev, curr)| prev.is_loss() && curr.is_loss())
        .map(|(_, curr)| *curr)
        .collect()
}

fn revenge_trading(trades: &[&Trade]) -> Option<BehavioralPattern> {
    let revenge = revenge_trades(trades);
    if revenge.is_empty() {
        return None;
    }

    Some(BehavioralPattern {
        id: "revenge_trading".to_string(),
        name: "Revenge Trading".to_string(),
        description: "Entering trades immediately after losses to \"make back\" money".to_string(),
        frequency: if revenge.len() > 3 {
            PatternFrequency::Frequent
        } else {
            PatternFrequency::Occasional
        },
        impact: Impact::Critical,
        evidence: revenge
            .iter()
            .map(|t| format!("{} {}: Entered {} {} after loss", t.date, t.time, t.symbol, t.trade_type))
            .collect(),
        trades_affected: revenge.len(),
    })
}

fn fomo_trading(trades: &[&Trade]) -> Option<BehavioralPattern> {
    let late: Vec<&Trade> = trades
        .iter()
        .copied()
        .filter(|t| {
            t.hour().is_some_and(|h| h > LATE_ENTRY_HOUR)
                && FOMO.matches_opt(t.emotion_before_label())
                && t.is_loss()
        })
        .collect();
    if late.len() <= 2 {
        return None;
    }

    Some(BehavioralPattern {
        id: "fomo_trading".to_string(),
        name: "FOMO Trading".to_string(),
        description: "Entering trades due to fear of missing out, often late in the move".to_string(),
        frequency: if late.len() > 5 {
            PatternFrequency::Frequent
        } else {
            PatternFrequency::Occasional
        },
        impact: Impact::High,
        evidence: late
            .iter()
            .map(|t| {
                format!(
                    "{}: Late {} entry ({}) with emotion: {}",
                    t.date,
                    t.symbol,
                    t.time,
                    t.emotion_before_label().unwrap_or_default()
                )
            })
            .collect(),
        trades_affected: late.len(),
    })
}

fn strategy_hopping(trades: &[&Trade]) -> Option<BehavioralPattern> {
    let tagged: Vec<&str> = trades.iter().filter_map(|t| t.strategy_name()).collect();
    let unique = tagged.iter().collect::<BTreeSet<_>>().len();
    let ratio = unique as f64 / tagged.len().max(1) as f64;
    if unique <= 3 || ratio <= 0.5 {
        return None;
    }

    let frequency = if ratio > 0.7 {
        PatternFrequency::Frequent
    } else if ratio > 0.4 {
        PatternFrequency::Occasional
    } else {
        PatternFrequency::Rare
    };

    Some(BehavioralPattern {
        id: "strategy_hopping".to_string(),
        name: "Strategy Hopping".to_string(),
        description: "Frequently switching strategies instead of mastering one".to_string(),
        frequency,
        impact: Impact::Medium,
        evidence: vec![format!("Used {unique} different strategies in {} trades", trades.len())],
        trades_affected: trades.len() * 3 / 10,
    })
}

fn emotional_trading(trades: &[&Trade]) -> Option<BehavioralPattern> {
    let emotional: Vec<&Trade> = trades
        .iter()
        .copied()
        .filter(|t| EMOTIONAL_TRADING.matches_opt(t.emotion_before_label()))
        .collect();
    let share = emotional.len() as f64 / trades.len().max(1) as f64;
    if share <= 0.2 {
        return None;
    }

    Some(BehavioralPattern {
        id: "emotional_trading".to_string(),
        name: "Emotional Trading".to_string(),
        description: "Making trading decisions based on emotions rather than plan".to_string(),
        frequency: if share > 0.4 {
            PatternFrequency::Frequent
        } else {
            PatternFrequency::Occasional
        },
        impact: Impact::High,
        evidence: emotional
            .iter()
            .take(EVIDENCE_LIMIT)
            .map(|t| {
                format!(
                    "{}: Traded {} while feeling {}",
                    t.date,
                    t.symbol,
                    t.emotion_before_label().unwrap_or_default()
                )
            })
            .collect(),
        trades_affected: emotional.len(),
    })
}
