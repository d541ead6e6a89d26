// In crates/analytics/src/psychology/weaknesses.rs

use core_types::Trade;
use itertools::Itertools;

use super::profile::{PsychologicalWeakness, WeaknessSeverity, WeaknessType};
use crate::aggregate;
use crate::classify::{CONTRARIAN_CHECK, RELIEF};
use crate::stats;

const OVERCONFIDENT_STREAK: usize = 5;
const HOT_STREAK: usize = 3;
const RAISED_RISK_PCT: f64 = 2.0;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Identifies weaknesses over chronologically ordered trades.
pub fn identify_weaknesses(ordered: &[&Trade]) -> Vec<PsychologicalWeakness> {
    let n = ordered.len();
    let frequency = |count: usize| stats::percentage(count, n).round();
    let mut weaknesses = Vec::new();

    // 1. Loss aversion: winners closed early with relief.
    let early_exits = ordered
        .iter()
        .filter(|t| {
            t.is_win() && RELIEF.matches_opt(t.emotion_after_label()) && t.rr_actual.unwrap_or(0.0) < 1.0
        })
        .count();
    if early_exits > 2 {
        weaknesses.push(PsychologicalWeakness {
            id: "loss_aversion".to_string(),
            weakness_type: WeaknessType::Cognitive,
            name: "Loss Aversion".to_string(),
            description: "Cutting winners short due to fear of giving back profits".to_string(),
            triggers: strings(&["Seeing unrealized profits", "Market reversing slightly", "Previous losses"]),
            manifestations: strings(&[
                "Closing trades too early",
                "Moving stops to breakeven too quickly",
                "Taking partial profits prematurely",
            ]),
            frequency: frequency(early_exits),
            severity: if early_exits > 5 {
                WeaknessSeverity::Severe
            } else {
                WeaknessSeverity::Moderate
            },
            countermeasures: strings(&[
                "Set profit targets before entering",
                "Use trailing stops instead of manual exits",
                "Practice letting winners run",
                "Journal the feeling of regret when exiting early",
            ]),
        });
    }

    // 2. Confirmation bias: planned losers with no contrarian check.
    let unchallenged = ordered
        .iter()
        .filter(|t| t.has_strategy() && !CONTRARIAN_CHECK.matches(&t.notes) && t.is_loss())
        .count();
    if unchallenged > 3 {
        weaknesses.push(PsychologicalWeakness {
            id: "confirmation_bias".to_string(),
            weakness_type: WeaknessType::Cognitive,
            name: "Confirmation Bias".to_string(),
            description: "Only seeking information that confirms your trade idea".to_string(),
            triggers: strings(&[
                "Strong conviction in trade",
                "Previous success with similar setup",
                "Social media reinforcement",
            ]),
            manifestations: strings(&[
                "Ignoring contrary signals",
                "Overweighting supporting evidence",
                "Dismissing risk factors",
            ]),
            frequency: frequency(unchallenged),
            severity: WeaknessSeverity::Moderate,
            countermeasures: strings(&[
                "Force yourself to write 3 reasons why the trade might fail",
                "Seek out contradictory opinions before trading",
                "Set predefined invalidation points",
                "Review losing trades for missed warning signs",
            ]),
        });
    }

    // 3. Overconfidence: a long win streak and raised risk during a run.
    let longest_run = aggregate::streaks(ordered.iter().copied()).max_wins;
    let raised = raised_risk_on_streaks(ordered);
    if longest_run >= OVERCONFIDENT_STREAK && raised > 0 {
        weaknesses.push(PsychologicalWeakness {
            id: "overconfidence".to_string(),
            weakness_type: WeaknessType::Emotional,
            name: "Overconfidence".to_string(),
            description: "Increasing risk after winning streaks, assuming edge is stronger than it is".to_string(),
            triggers: strings(&["Winning streaks", "Recent success", "Positive feedback from others"]),
            manifestations: strings(&[
                "Increasing position size",
                "Taking lower quality setups",
                "Skipping checklist items",
            ]),
            frequency: frequency(raised),
            severity: WeaknessSeverity::Severe,
            countermeasures: strings(&[
                "Maintain fixed position sizing regardless of recent results",
                "Review losing streaks to stay humble",
                "Implement a \"cooling off\" period after large wins",
                "Focus on process, not outcomes",
            ]),
        });
    }

    // 4. Impulsivity: losers missing an emotion, a strategy or a plan.
    let impulsive = ordered
        .iter()
        .filter(|t| {
            let unplanned = t.emotion_before_label().is_none()
                || !t.has_strategy()
                || t.tracked_rr_planned().is_none();
            unplanned && t.is_loss()
        })
        .count();
    if impulsive > 3 {
        weaknesses.push(PsychologicalWeakness {
            id: "impulsivity".to_string(),
            weakness_type: WeaknessType::Behavioral,
            name: "Impulsivity".to_string(),
            description: "Acting on urges without proper planning or emotional awareness".to_string(),
            triggers: strings(&["Market volatility", "Boredom", "News events", "Seeing others trade"]),
            manifestations: strings(&[
                "Trading without plan",
                "Skipping pre-trade routine",
                "No emotion tracking",
                "Chasing moves",
            ]),
            frequency: frequency(impulsive),
            severity: if impulsive > 8 {
                WeaknessSeverity::Severe
            } else {
                WeaknessSeverity::Moderate
            },
            countermeasures: strings(&[
                "Mandatory 5-minute pause before every trade",
                "Complete trade plan worksheet before entry",
                "Set daily trade limit",
                "Use \"trading contract\" with yourself",
            ]),
        });
    }

    weaknesses
}

/// Trades taken at more than 2% risk once the preceding run of wins has
/// reached three.
fn raised_risk_on_streaks(ordered: &[&Trade]) -> usize {
    let mut run = 0;
    let mut count = 0;
    for (prev, curr) in ordered.iter().tuple_windows() {
        if prev.is_win() {
            run += 1;
            if run >= HOT_STREAK && curr.risk_percent.unwrap_or(0.0) > RAISED_RISK_PCT {
                count += 1;
            }
        } else {
            run = 0;
        }
    }
    count
}
