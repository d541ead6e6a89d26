// In crates/analytics/src/quant/session_stability.rs

use std::collections::BTreeMap;

use core_types::Trade;

use crate::aggregate;
use crate::stats;
use crate::types::{SessionBreakdown, SessionPerformanceStability, TimeBasedPatterns, Trend};

/// A time bucket needs this many trades to be ranked.
const MIN_BUCKET_TRADES: usize = 3;

pub fn session_stability(trades: &[Trade]) -> SessionPerformanceStability {
    let groups = aggregate::by_session(aggregate::chronological(trades));
    if groups.is_empty() {
        return SessionPerformanceStability::default();
    }

    let session_breakdown: Vec<SessionBreakdown> = groups
        .iter()
        .map(|(name, group)| breakdown(name, group))
        .collect();

    let avg_trades: Vec<f64> = session_breakdown.iter().map(|s| s.avg_trade).collect();
    let stability_score = ((1.0 - stats::coefficient_of_variation(&avg_trades)) * 100.0)
        .max(0.0)
        .round();

    let most_stable_session = session_breakdown
        .iter()
        .min_by(|a, b| a.volatility.total_cmp(&b.volatility))
        .map(|s| s.session.clone());
    let most_volatile_session = if session_breakdown.len() > 1 {
        session_breakdown
            .iter()
            .max_by(|a, b| a.volatility.total_cmp(&b.volatility))
            .map(|s| s.session.clone())
    } else {
        None
    };

    let win_rates: Vec<f64> = session_breakdown.iter().map(|s| s.win_rate).collect();
    let session_consistency_index = (100.0 - stats::variance(&win_rates) / 10.0).max(0.0).round();

    SessionPerformanceStability {
        stability_score: stats::clamp_score(stability_score),
        session_breakdown,
        most_stable_session,
        most_volatile_session,
        session_consistency_index,
        time_based_patterns: time_patterns(trades),
    }
}

fn breakdown(name: &str, group: &[&Trade]) -> SessionBreakdown {
    let summary = aggregate::summarize(group);

    // Compare the later half of the session against the earlier half.
    let mid = group.len() / 2;
    let first_half: f64 = group[..mid].iter().map(|t| t.profit_f64()).sum();
    let second_half: f64 = group[mid..].iter().map(|t| t.profit_f64()).sum();
    let change = second_half - first_half;
    let trend = if change > summary.avg_profit * 2.0 {
        Trend::Improving
    } else if change < -summary.avg_profit * 2.0 {
        Trend::Declining
    } else {
        Trend::Stable
    };

    SessionBreakdown {
        session: name.to_string(),
        trades: summary.count,
        total_profit: summary.total_profit,
        win_rate: summary.win_rate,
        avg_trade: summary.avg_profit,
        volatility: summary.volatility,
        trend,
    }
}

fn time_patterns(trades: &[Trade]) -> TimeBasedPatterns {
    let hours = ranked_buckets(aggregate::by_hour(trades));
    let days = ranked_buckets(aggregate::by_weekday(trades));
    let day_name = |d: u32| aggregate::weekday_name(d).to_string();

    TimeBasedPatterns {
        best_hour: best(&hours),
        worst_hour: worst(&hours),
        best_day: best(&days).map(day_name),
        worst_day: worst(&days).map(day_name),
    }
}

/// Average profit per bucket, for buckets with enough trades.
fn ranked_buckets(groups: BTreeMap<u32, Vec<&Trade>>) -> Vec<(u32, f64)> {
    groups
        .into_iter()
        .filter(|(_, group)| group.len() >= MIN_BUCKET_TRADES)
        .map(|(key, group)| (key, aggregate::summarize(&group).avg_profit))
        .collect()
}

// Ties resolve to the earliest key.
fn best(buckets: &[(u32, f64)]) -> Option<u32> {
    buckets
        .iter()
        .fold(None, |acc: Option<(u32, f64)>, &(key, avg)| match acc {
            Some((_, top)) if top >= avg => acc,
            _ => Some((key, avg)),
        })
        .map(|(key, _)| key)
}

fn worst(buckets: &[(u32, f64)]) -> Option<u32> {
    buckets
        .iter()
        .fold(None, |acc: Option<(u32, f64)>, &(key, avg)| match acc {
            Some((_, low)) if low <= avg => acc,
            _ => Some((key, avg)),
        })
        .map(|(key, _)| key)
}
