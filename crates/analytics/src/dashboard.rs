// In crates/analytics/src/dashboard.rs

//! Chart-ready aggregates for the journal dashboard.

use core_types::{Session, Strategy, Trade};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::aggregate::{self, GroupSummary};
use crate::stats;
use crate::types::{
    AssetShare, DailyStat, Dashboard, DisciplineSnapshot, EquityPoint, HeadlineStats, HourBucket, MistakeCount,
    SessionEquity, StrategyStat, WeekdayBucket,
};

/// Category assumed for trades recorded without one.
const DEFAULT_ASSET_CATEGORY: &str = "Forex";
const PROPER_RISK_PCT: f64 = 2.0;
const RECENT_MISTAKE_TRADES: usize = 5;
const TOP_MISTAKES: usize = 3;

/// Builds every dashboard section.
///
/// `session_filter` narrows all sections to trades whose session label
/// equals the given name, except `sessions`, which always covers the full
/// journal.
pub fn build_dashboard(
    trades: &[Trade],
    sessions: &[Session],
    strategies: &[Strategy],
    starting_balance: Decimal,
    session_filter: Option<&str>,
) -> Dashboard {
    let ordered = aggregate::chronological(trades);
    let filtered: Vec<&Trade> = ordered
        .iter()
        .copied()
        .filter(|t| session_filter.is_none_or(|name| t.session_name() == Some(name.trim())))
        .collect();

    let equity_curve = equity_curve(&filtered, starting_balance);

    Dashboard {
        headline: headline(&filtered, &equity_curve),
        hourly: hourly(&filtered),
        weekdays: weekdays(&filtered),
        daily: daily(&filtered),
        sessions: session_equity(&ordered, sessions, starting_balance),
        strategies: strategy_stats(&filtered, strategies),
        assets: assets(&filtered),
        discipline: discipline(&filtered),
        equity_curve,
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Net profit of a group. Sums saturate at the `Decimal` bounds.
fn decimal_profit(trades: &[&Trade]) -> Decimal {
    trades.iter().fold(Decimal::ZERO, |total, t| total.saturating_add(t.profit))
}

// --- Headline & Equity ---

fn headline(trades: &[&Trade], equity_curve: &[EquityPoint]) -> HeadlineStats {
    let summary = aggregate::summarize(trades);
    let GroupSummary { gross_profit, gross_loss, wins, losses, win_rate, .. } = summary;

    let rrs: Vec<f64> = trades.iter().filter_map(|t| t.rr_actual.filter(|rr| *rr > 0.0)).collect();
    let expectancy = stats::expectancy(win_rate, gross_profit, wins, gross_loss, losses);
    let avg_loss = if losses > 0 { gross_loss / losses as f64 } else { 1.0 };

    HeadlineStats {
        total_trades: summary.count,
        win_rate,
        total_profit: summary.total_profit,
        best_trade: trades.iter().map(|t| t.profit_f64()).reduce(f64::max).unwrap_or(0.0),
        avg_rr: stats::mean(&rrs),
        profit_factor: stats::profit_factor(gross_profit, gross_loss),
        expectancy,
        reward_risk_ratio: expectancy / avg_loss,
        max_drawdown_pct: equity_curve.iter().map(|p| p.drawdown_pct).fold(0.0, f64::max),
    }
}

/// Running balance from `starting_balance`, one point per trade after a
/// leading "Start" point.
fn equity_curve(trades: &[&Trade], starting_balance: Decimal) -> Vec<EquityPoint> {
    let mut balance = starting_balance;
    let mut peak = starting_balance;
    let mut curve = Vec::with_capacity(trades.len() + 1);
    curve.push(EquityPoint {
        label: "Start".to_string(),
        date: None,
        balance,
        drawdown_pct: 0.0,
    });

    for trade in trades {
        balance = balance.saturating_add(trade.profit);
        peak = peak.max(balance);
        // A non-positive peak has no meaningful percentage drawdown.
        let drawdown_pct = if peak > Decimal::ZERO {
            to_f64(peak.saturating_sub(balance)) / to_f64(peak) * 100.0
        } else {
            0.0
        };
        curve.push(EquityPoint {
            label: trade.date.trim().to_string(),
            date: trade.parsed_date(),
            balance,
            drawdown_pct,
        });
    }
    curve
}

// --- Time Buckets ---

fn hourly(trades: &[&Trade]) -> Vec<HourBucket> {
    let hours = aggregate::by_hour(trades.iter().copied());
    (0..24)
        .map(|h| HourBucket {
            hour: format!("{h:02}:00"),
            count: hours.get(&h).map_or(0, Vec::len),
        })
        .collect()
}

fn weekdays(trades: &[&Trade]) -> Vec<WeekdayBucket> {
    let days = aggregate::by_weekday(trades.iter().copied());
    (0..7)
        .map(|d| {
            let group = days.get(&d).map(Vec::as_slice).unwrap_or_default();
            WeekdayBucket {
                day: aggregate::weekday_name(d).to_string(),
                count: group.len(),
                profit: group.iter().map(|t| t.profit_f64()).sum(),
            }
        })
        .collect()
}

fn daily(trades: &[&Trade]) -> Vec<DailyStat> {
    aggregate::by_date(trades.iter().copied())
        .into_iter()
        .map(|(date, day)| {
            let summary = aggregate::summarize(&day);
            let volume = summary.gross_profit + summary.gross_loss;
            let share = |part: f64| if volume > 0.0 { (part / volume * 100.0).round() } else { 0.0 };
            DailyStat {
                date,
                profit: summary.total_profit,
                win_pct: share(summary.gross_profit),
                loss_pct: share(summary.gross_loss),
            }
        })
        .collect()
}

// --- Sessions, Strategies, Assets ---

fn session_equity(trades: &[&Trade], sessions: &[Session], starting_balance: Decimal) -> Vec<SessionEquity> {
    let entry = |name: String, session_id: Option<String>, group: &[&Trade], start: Decimal| {
        let profit = decimal_profit(group);
        SessionEquity {
            name,
            session_id,
            trade_count: group.len(),
            profit,
            win_rate: aggregate::summarize(group).win_rate,
            starting_capital: start,
            equity: start.saturating_add(profit),
        }
    };

    // 1. One entry per session record.
    let mut stats: Vec<SessionEquity> = sessions
        .iter()
        .map(|session| {
            let group: Vec<&Trade> = trades.iter().copied().filter(|t| session.matches(t)).collect();
            entry(
                session.name.trim().to_string(),
                Some(session.id.clone()),
                &group,
                session.initial_capital.unwrap_or(starting_balance),
            )
        })
        .collect();

    // 2. Labels used on trades that no record claims.
    let orphans = aggregate::by_session(
        trades
            .iter()
            .copied()
            .filter(|t| !sessions.iter().any(|s| s.matches(t))),
    );
    stats.extend(
        orphans
            .into_iter()
            .map(|(name, group)| entry(name, None, &group, starting_balance)),
    );
    stats
}

fn strategy_stats(trades: &[&Trade], strategies: &[Strategy]) -> Vec<StrategyStat> {
    strategies
        .iter()
        .map(|strategy| {
            let group: Vec<&Trade> = trades
                .iter()
                .copied()
                .filter(|t| t.strategy_name().is_some_and(|name| strategy.is_named(name)))
                .collect();
            StrategyStat {
                name: strategy.name.trim().to_string(),
                strategy_id: strategy.id.clone(),
                trade_count: group.len(),
                win_rate: aggregate::summarize(&group).win_rate,
                profit: decimal_profit(&group),
                rule_count: strategy.rules.len(),
            }
        })
        .collect()
}

fn assets(trades: &[&Trade]) -> Vec<AssetShare> {
    aggregate::by_asset_category(trades.iter().copied(), DEFAULT_ASSET_CATEGORY)
        .into_iter()
        .map(|(name, group)| AssetShare { name, value: group.len() })
        .collect()
}

// --- Discipline ---

fn discipline(trades: &[&Trade]) -> DisciplineSnapshot {
    let n = trades.len();
    if n == 0 {
        return DisciplineSnapshot::default();
    }
    let share = |pred: fn(&Trade) -> bool| stats::percentage(trades.iter().filter(|t| pred(t)).count(), n);

    let plan_adherence = share(|t| t.tracked_rr_planned().is_some());
    let emotional_tracking = share(|t| t.emotion_before_label().is_some());
    let strategy_compliance = share(Trade::has_strategy);
    let rules_following = share(|t| !t.rules_used.is_empty());
    let risk_management = share(|t| t.tracked_risk().is_some_and(|r| r <= PROPER_RISK_PCT));

    let decision_quality_score = (plan_adherence * 0.25
        + emotional_tracking * 0.20
        + strategy_compliance * 0.20
        + rules_following * 0.20
        + risk_management * 0.15)
        .round();
    let streaks = aggregate::streaks(trades.iter().copied());

    DisciplineSnapshot {
        decision_quality_score,
        grade: stats::score_to_grade(decision_quality_score),
        plan_adherence,
        emotional_tracking,
        strategy_compliance,
        rules_following,
        risk_management,
        win_rate: aggregate::summarize(trades).win_rate.round(),
        current_streak: streaks.current_wins,
        max_streak: streaks.max_wins,
        top_mistakes: top_mistakes(trades),
    }
}

/// Most repeated mistakes among the latest trades that recorded any.
/// Ties keep alphabetical order.
fn top_mistakes(ordered: &[&Trade]) -> Vec<MistakeCount> {
    let recent = ordered
        .iter()
        .rev()
        .filter(|t| t.mistakes.iter().any(|m| !m.trim().is_empty()))
        .take(RECENT_MISTAKE_TRADES)
        .flat_map(|t| t.mistakes.iter().map(|m| m.trim()).filter(|m| !m.is_empty()));

    let mut counts: Vec<(&str, usize)> = aggregate::tally(recent).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_MISTAKES)
        .map(|(mistake, count)| MistakeCount {
            mistake: mistake.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core_types::AssetCategory;
    use rust_decimal_macros::dec;

    fn trade(date: &str, time: &str, profit: Decimal) -> Trade {
        Trade {
            date: date.to_string(),
            time: time.to_string(),
            profit,
            ..Default::default()
        }
    }

    #[test]
    fn equity_curve_tracks_drawdown_from_peak() {
        // Stored newest first, as the journal keeps them.
        let trades = vec![
            trade("2024-03-03", "10:00", dec!(-55)),
            trade("2024-03-02", "10:00", dec!(-50)),
            trade("2024-03-01", "10:00", dec!(100)),
        ];
        let dashboard = build_dashboard(&trades, &[], &[], dec!(1000), None);
        let curve = &dashboard.equity_curve;

        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].label, "Start");
        assert_eq!(curve[0].balance, dec!(1000));
        assert_eq!(curve[1].balance, dec!(1100));
        assert_eq!(curve[3].balance, dec!(995));
        assert_relative_eq!(curve[3].drawdown_pct, 105.0 / 1100.0 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(dashboard.headline.max_drawdown_pct, curve[3].drawdown_pct);
    }

    #[test]
    fn headline_ratios() {
        let mut trades: Vec<Trade> = (0..6).map(|_| trade("2024-03-01", "10:00", dec!(100))).collect();
        trades.extend((0..4).map(|_| trade("2024-03-02", "10:00", dec!(-50))));
        trades[0].rr_actual = Some(2.0);
        trades[1].rr_actual = Some(3.0);

        let headline = build_dashboard(&trades, &[], &[], dec!(1000), None).headline;
        assert_eq!(headline.total_trades, 10);
        assert_relative_eq!(headline.win_rate, 60.0);
        assert_relative_eq!(headline.profit_factor, 3.0);
        assert_relative_eq!(headline.expectancy, 40.0);
        assert_relative_eq!(headline.reward_risk_ratio, 0.8);
        assert_relative_eq!(headline.avg_rr, 2.5);
        assert_relative_eq!(headline.best_trade, 100.0);
    }

    #[test]
    fn buckets_cover_every_hour_and_weekday() {
        let trades = vec![
            // 2024-03-04 is a Monday.
            trade("2024-03-04", "09:30", dec!(10)),
            trade("2024-03-04", "9:45", dec!(-4)),
            trade("2024-03-05", "bad", dec!(1)),
        ];
        let dashboard = build_dashboard(&trades, &[], &[], dec!(1000), None);

        assert_eq!(dashboard.hourly.len(), 24);
        assert_eq!(dashboard.hourly[9].hour, "09:00");
        assert_eq!(dashboard.hourly[9].count, 2);
        assert_eq!(dashboard.hourly.iter().map(|b| b.count).sum::<usize>(), 2);

        assert_eq!(dashboard.weekdays.len(), 7);
        assert_eq!(dashboard.weekdays[0].day, "Monday");
        assert_eq!(dashboard.weekdays[0].count, 2);
        assert_relative_eq!(dashboard.weekdays[0].profit, 6.0);

        assert_eq!(dashboard.daily[0].date, "2024-03-04");
        assert_eq!(dashboard.daily[0].win_pct, 71.0);
        assert_eq!(dashboard.daily[0].loss_pct, 29.0);
    }

    #[test]
    fn sessions_link_by_name_and_keep_orphans() {
        let mut london = trade("2024-03-04", "09:00", dec!(120));
        london.session = "london".to_string();
        let mut asia = trade("2024-03-04", "02:00", dec!(-20));
        asia.session = "Asia".to_string();
        let blank = trade("2024-03-05", "10:00", dec!(5));

        let sessions = vec![Session {
            id: "s1".to_string(),
            name: "London".to_string(),
            initial_capital: Some(dec!(5000)),
            ..Default::default()
        }];
        let stats = build_dashboard(&[london, asia, blank], &sessions, &[], dec!(1000), Some("Asia")).sessions;

        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].session_id.as_deref(), Some("s1"));
        assert_eq!(stats[0].trade_count, 1);
        assert_eq!(stats[0].equity, dec!(5120));
        assert_eq!(stats[1].name, "Asia");
        assert_eq!(stats[1].session_id, None);
        assert_eq!(stats[1].starting_capital, dec!(1000));
        assert_eq!(stats[1].equity, dec!(980));
        assert_eq!(stats[2].name, aggregate::UNSPECIFIED);
    }

    #[test]
    fn session_filter_narrows_other_sections() {
        let mut a = trade("2024-03-04", "09:00", dec!(10));
        a.session = "NY".to_string();
        a.asset_category = Some(AssetCategory::Crypto);
        let b = trade("2024-03-04", "10:00", dec!(-10));

        let dashboard = build_dashboard(&[a, b], &[], &[], dec!(100), Some("NY"));
        assert_eq!(dashboard.headline.total_trades, 1);
        assert_eq!(dashboard.equity_curve.len(), 2);
        assert_eq!(dashboard.assets, vec![AssetShare { name: "Crypto".to_string(), value: 1 }]);
    }

    #[test]
    fn strategy_and_asset_breakdown() {
        let mut a = trade("2024-03-04", "09:00", dec!(10));
        a.strategy = "Breakout".to_string();
        let mut b = trade("2024-03-04", "10:00", dec!(-4));
        b.strategy = "breakout".to_string();

        let strategies = vec![Strategy {
            id: "x".to_string(),
            name: "Breakout".to_string(),
            rules: vec!["Wait for close".to_string(), "Trade with trend".to_string()],
            ..Default::default()
        }];
        let dashboard = build_dashboard(&[a, b], &[], &strategies, dec!(100), None);

        let stat = &dashboard.strategies[0];
        assert_eq!(stat.trade_count, 1);
        assert_eq!(stat.profit, dec!(10));
        assert_eq!(stat.rule_count, 2);
        assert_eq!(
            dashboard.assets,
            vec![AssetShare { name: DEFAULT_ASSET_CATEGORY.to_string(), value: 2 }]
        );
    }

    #[test]
    fn discipline_snapshot() {
        let mut trades: Vec<Trade> = (1..=7)
            .map(|d| trade(&format!("2024-03-{d:02}"), "10:00", dec!(10)))
            .collect();
        trades[0].profit = dec!(-5);
        for t in trades.iter_mut().take(4) {
            t.rr_planned = Some(2.0);
            t.risk_percent = Some(1.0);
        }
        trades[0].mistakes = vec!["Moved SL".to_string()];
        trades[1].mistakes = vec!["FOMO".to_string(), "Moved SL".to_string()];
        for t in trades.iter_mut().skip(2) {
            t.mistakes = vec!["FOMO".to_string()];
        }

        let snapshot = build_dashboard(&trades, &[], &[], dec!(100), None).discipline;
        assert_relative_eq!(snapshot.plan_adherence, 400.0 / 7.0, epsilon = 1e-9);
        // 57.14 * 0.25 + 57.14 * 0.15
        assert_eq!(snapshot.decision_quality_score, 23.0);
        assert_eq!(snapshot.grade, stats::Grade::F);
        assert_eq!(snapshot.win_rate, 86.0);
        assert_eq!(snapshot.current_streak, 6);
        assert_eq!(snapshot.max_streak, 6);
        // Only the five latest trades with mistakes are counted.
        assert_eq!(
            snapshot.top_mistakes,
            vec![MistakeCount { mistake: "FOMO".to_string(), count: 5 }]
        );
    }

    #[test]
    fn oversized_profits_saturate() {
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let mut trades = vec![
            trade("2024-03-04", "09:00", huge),
            trade("2024-03-05", "09:00", huge),
        ];
        for t in &mut trades {
            t.session = "London".to_string();
            t.strategy = "Breakout".to_string();
        }
        let sessions = vec![Session {
            id: "s1".to_string(),
            name: "London".to_string(),
            ..Default::default()
        }];
        let strategies = vec![Strategy {
            id: "x".to_string(),
            name: "Breakout".to_string(),
            ..Default::default()
        }];

        let dashboard = build_dashboard(&trades, &sessions, &strategies, dec!(1000), None);
        assert_eq!(dashboard.equity_curve.len(), 3);
        assert_eq!(dashboard.equity_curve[2].balance, Decimal::MAX);
        assert_eq!(dashboard.equity_curve[2].drawdown_pct, 0.0);
        assert_eq!(dashboard.sessions[0].profit, Decimal::MAX);
        assert_eq!(dashboard.sessions[0].equity, Decimal::MAX);
        assert_eq!(dashboard.strategies[0].profit, Decimal::MAX);
        assert_eq!(dashboard.headline.total_trades, 2);
    }

    #[test]
    fn empty_journal_has_a_flat_curve() {
        let dashboard = build_dashboard(&[], &[], &[], dec!(1000), None);
        assert_eq!(dashboard.equity_curve.len(), 1);
        assert_eq!(dashboard.headline, HeadlineStats::default());
        assert_eq!(dashboard.discipline.decision_quality_score, 0.0);
        assert_eq!(dashboard.hourly.len(), 24);
    }
}
