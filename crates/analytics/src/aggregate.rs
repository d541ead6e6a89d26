// In crates/analytics/src/aggregate.rs

//! Grouping and reduction of trade collections.
//!
//! Groups are returned as `BTreeMap`s so every report built on top of them
//! is deterministic regardless of input order.

use std::collections::BTreeMap;

use chrono::Datelike;
use core_types::Trade;
use serde::{Deserialize, Serialize};

use crate::stats;

/// Bucket name for trades with no strategy or session label.
pub const UNSPECIFIED: &str = "Unspecified";

/// Count/sum/win-rate/volatility reduction of a group of trades.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
    /// Wins over all trades in the group, in percent.
    pub win_rate: f64,
    pub total_profit: f64,
    pub avg_profit: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    /// Population standard deviation of per-trade profit.
    pub volatility: f64,
}

/// Groups trades by `key_fn`. Trades for which the key function returns
/// `None` are skipped. Within a group, input order is preserved.
pub fn group_by<'a, K, I, F>(trades: I, mut key_fn: F) -> BTreeMap<K, Vec<&'a Trade>>
where
    K: Ord,
    I: IntoIterator<Item = &'a Trade>,
    F: FnMut(&Trade) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<&'a Trade>> = BTreeMap::new();
    for trade in trades {
        if let Some(key) = key_fn(trade) {
            groups.entry(key).or_default().push(trade);
        }
    }
    groups
}

/// Reduces a group to its summary. An empty group yields all zeros.
pub fn summarize(group: &[&Trade]) -> GroupSummary {
    if group.is_empty() {
        return GroupSummary::default();
    }

    let profits = profits(group.iter().copied());
    let wins = group.iter().filter(|t| t.is_win()).count();
    let losses = group.iter().filter(|t| t.is_loss()).count();
    let gross_profit: f64 = profits.iter().filter(|p| **p > 0.0).sum();
    let gross_loss: f64 = profits.iter().filter(|p| **p < 0.0).sum::<f64>().abs();
    let total_profit: f64 = profits.iter().sum();

    GroupSummary {
        count: group.len(),
        wins,
        losses,
        win_rate: stats::percentage(wins, group.len()),
        total_profit,
        avg_profit: total_profit / group.len() as f64,
        gross_profit,
        gross_loss,
        volatility: stats::std_dev(&profits),
    }
}

pub fn profits<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Vec<f64> {
    trades.into_iter().map(Trade::profit_f64).collect()
}

/// Frequency table of the given labels.
pub fn tally<K: Ord>(labels: impl IntoIterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

pub fn by_date<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> BTreeMap<String, Vec<&'a Trade>> {
    group_by(trades, |t| Some(t.date.trim().to_string()))
}

/// Groups by entry hour; trades with an unparsable time are skipped.
pub fn by_hour<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> BTreeMap<u32, Vec<&'a Trade>> {
    group_by(trades, Trade::hour)
}

/// Groups by weekday, keyed by days from Monday (0..=6); trades with an
/// unparsable date are skipped.
pub fn by_weekday<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> BTreeMap<u32, Vec<&'a Trade>> {
    group_by(trades, |t| t.parsed_date().map(|d| d.weekday().num_days_from_monday()))
}

pub fn by_session<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> BTreeMap<String, Vec<&'a Trade>> {
    group_by(trades, |t| Some(t.session_name().unwrap_or(UNSPECIFIED).to_string()))
}

pub fn by_strategy<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> BTreeMap<String, Vec<&'a Trade>> {
    group_by(trades, |t| Some(t.strategy_name().unwrap_or(UNSPECIFIED).to_string()))
}

/// Groups by asset category, using `fallback` for trades without one.
pub fn by_asset_category<'a>(
    trades: impl IntoIterator<Item = &'a Trade>,
    fallback: &str,
) -> BTreeMap<String, Vec<&'a Trade>> {
    group_by(trades, |t| {
        Some(t.asset_category.map_or_else(|| fallback.to_string(), |c| c.to_string()))
    })
}

/// Net profit per calendar date, in date order.
pub fn daily_pnl<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Vec<f64> {
    by_date(trades)
        .values()
        .map(|day| day.iter().map(|t| t.profit_f64()).sum())
        .collect()
}

pub fn daily_trade_counts<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> BTreeMap<String, usize> {
    tally(trades.into_iter().map(|t| t.date.trim().to_string()))
}

pub fn weekday_name(days_from_monday: u32) -> &'static str {
    match days_from_monday {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    }
}

/// Trades sorted oldest first by `(date, time)`.
///
/// The sort is stable: trades with identical or unparsable timestamps keep
/// their input order, and unparsable values sort before parsable ones.
pub fn chronological(trades: &[Trade]) -> Vec<&Trade> {
    let mut ordered: Vec<&Trade> = trades.iter().collect();
    ordered.sort_by_key(|t| (t.parsed_date(), t.parsed_time()));
    ordered
}

/// Longest runs of wins and of losses. A breakeven trade ends both runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streaks {
    pub max_wins: usize,
    pub max_losses: usize,
    /// Length of the win run still open at the end of the sequence.
    pub current_wins: usize,
}

/// Scans trades in the given order.
pub fn streaks<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Streaks {
    let mut result = Streaks::default();
    let mut wins = 0;
    let mut losses = 0;

    for trade in trades {
        if trade.is_win() {
            wins += 1;
            losses = 0;
        } else if trade.is_loss() {
            losses += 1;
            wins = 0;
        } else {
            wins = 0;
            losses = 0;
        }
        result.max_wins = result.max_wins.max(wins);
        result.max_losses = result.max_losses.max(losses);
    }
    result.current_wins = wins;
    result
}
