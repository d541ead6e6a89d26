// In crates/analytics/src/quant/emotional_impact.rs

use std::collections::BTreeMap;

use core_types::Trade;

use crate::aggregate;
use crate::classify::{self, BIAS_NEGATIVE};
use crate::stats;
use crate::types::{EmotionStat, EmotionalImpactScore};

/// Entropy treated as fully unstable (about eight distinct emotions).
const MAX_EMOTION_ENTROPY: f64 = 3.0;
const DOMINANT_EMOTION_LIMIT: usize = 5;

pub fn emotional_impact_score(trades: &[Trade]) -> EmotionalImpactScore {
    let n = trades.len();
    if n == 0 {
        return EmotionalImpactScore {
            recommendations: vec!["Start tracking emotions to see analysis".to_string()],
            ..Default::default()
        };
    }

    let tagged: Vec<(&Trade, String)> = trades
        .iter()
        .filter_map(|t| t.emotion_before_label().map(|e| (t, e.to_lowercase())))
        .collect();

    // 1. Awareness
    let emotional_awareness = stats::percentage(tagged.len(), n);

    // 2. Stability
    let histogram = aggregate::tally(tagged.iter().map(|(_, e)| e.as_str()));
    let entropy = stats::shannon_entropy(&histogram);
    let emotional_stability = (1.0 - entropy / MAX_EMOTION_ENTROPY).max(0.0);

    // 3. Bias: how often negative emotions end in a loss, centred on 0.
    let negative: Vec<&Trade> = tagged
        .iter()
        .filter(|(_, e)| BIAS_NEGATIVE.matches(e))
        .map(|(t, _)| *t)
        .collect();
    let emotional_bias_index = if negative.is_empty() {
        0.0
    } else {
        negative.iter().filter(|t| t.is_loss()).count() as f64 / negative.len() as f64 - 0.5
    };

    // 4. Correlation between emotion polarity and profit
    let polarity: Vec<f64> = tagged.iter().map(|(_, e)| classify::emotion_polarity(e)).collect();
    let profits: Vec<f64> = tagged.iter().map(|(t, _)| t.profit_f64()).collect();
    let emotion_performance_correlation = stats::pearson_correlation(&polarity, &profits);

    // 5. Dominant emotions
    let dominant_emotions = dominant_emotions(&tagged);

    let score = (emotional_awareness * 0.4
        + emotional_stability * 100.0 * 0.3
        + (1.0 - emotional_bias_index.abs()) * 100.0 * 0.3)
        .round();

    let recommendations = recommendations(
        emotional_awareness,
        emotional_stability,
        emotional_bias_index,
        &dominant_emotions,
    );

    EmotionalImpactScore {
        score: stats::clamp_score(score),
        emotional_awareness,
        emotional_stability,
        emotional_bias_index,
        emotion_performance_correlation,
        dominant_emotions,
        recommendations,
    }
}

fn dominant_emotions(tagged: &[(&Trade, String)]) -> Vec<EmotionStat> {
    let mut by_emotion: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
    for (trade, emotion) in tagged {
        by_emotion.entry(emotion.as_str()).or_default().push(*trade);
    }

    let mut emotions: Vec<EmotionStat> = by_emotion
        .iter()
        .map(|(emotion, group)| {
            let summary = aggregate::summarize(group);
            EmotionStat {
                emotion: classify::capitalize(emotion),
                frequency: stats::percentage(group.len(), tagged.len()).round(),
                avg_profit: summary.avg_profit,
                win_rate: summary.win_rate,
            }
        })
        .collect();

    // Stable sort keeps the alphabetical order among equal frequencies.
    emotions.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
    emotions.truncate(DOMINANT_EMOTION_LIMIT);
    emotions
}

fn recommendations(awareness: f64, stability: f64, bias: f64, dominant: &[EmotionStat]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if awareness < 50.0 {
        recommendations.push("Increase emotional tracking: Document emotions before every trade".to_string());
    }
    if stability < 0.5 {
        recommendations.push("Work on emotional consistency: Your emotional state varies significantly".to_string());
    }
    if bias > 0.3 {
        recommendations.push("Address emotional bias: Negative emotions correlate with losses".to_string());
    }
    if let Some(poor) = dominant.iter().find(|e| e.win_rate < 40.0) {
        recommendations.push(format!(
            "Avoid trading when feeling {}: {:.0}% win rate",
            poor.emotion, poor.win_rate
        ));
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal::Decimal;

    fn trade(emotion: Option<&str>, profit: i64) -> Trade {
        Trade {
            emotion_before: emotion.map(str::to_string),
            profit: Decimal::from(profit),
            ..Default::default()
        }
    }

    #[test]
    fn untracked_journal_recommends_tracking() {
        let trades = vec![trade(None, 10), trade(None, -10)];
        let eis = emotional_impact_score(&trades);

        assert_eq!(eis.emotional_awareness, 0.0);
        assert_eq!(eis.emotional_stability, 1.0);
        assert_eq!(eis.emotion_performance_correlation, 0.0);
        assert!(eis.dominant_emotions.is_empty());
        assert_eq!(eis.score, 60.0);
        assert_eq!(
            eis.recommendations,
            vec!["Increase emotional tracking: Document emotions before every trade".to_string()]
        );
    }

    #[test]
    fn fearful_losses_raise_bias() {
        let trades = vec![
            trade(Some("Fear"), -50),
            trade(Some("fear"), -20),
            trade(Some("FOMO"), -10),
            trade(Some("Calm"), 40),
        ];
        let eis = emotional_impact_score(&trades);

        assert_relative_eq!(eis.emotional_awareness, 100.0);
        assert_relative_eq!(eis.emotional_bias_index, 0.5);
        assert!(eis.emotion_performance_correlation > 0.8);
        assert_relative_eq!(eis.emotional_stability, 0.5);
        assert_eq!(eis.score, 70.0);

        let top = &eis.dominant_emotions[0];
        assert_eq!(top.emotion, "Fear");
        assert_eq!(top.frequency, 50.0);
        assert_eq!(top.win_rate, 0.0);
        assert_relative_eq!(top.avg_profit, -35.0);

        assert!(eis.recommendations.contains(&"Address emotional bias: Negative emotions correlate with losses".to_string()));
        assert!(eis.recommendations.contains(&"Avoid trading when feeling Fear: 0% win rate".to_string()));
    }

    #[test]
    fn ties_are_ordered_by_label() {
        let trades = vec![trade(Some("patient"), 1), trade(Some("calm"), 1)];
        let eis = emotional_impact_score(&trades);
        let labels: Vec<&str> = eis.dominant_emotions.iter().map(|e| e.emotion.as_str()).collect();
        assert_eq!(labels, vec!["Calm", "Patient"]);
    }
}
