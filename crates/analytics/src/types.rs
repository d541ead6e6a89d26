// In crates/analytics/src/types.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stats::Grade;

// --- Quantitative Metrics ---

/// Per-trade process scores averaged over the trade set, each 0-100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionQualityComponents {
    pub plan_quality: f64,
    pub risk_management: f64,
    pub execution_precision: f64,
    pub emotional_control: f64,
    pub documentation: f64,
}

/// Decision Quality Index: process quality independent of outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionQualityIndex {
    pub score: f64,
    /// Graded from the rounded `score`, so the two always agree.
    pub grade: Grade,
    pub components: DecisionQualityComponents,
    pub violations: Vec<String>,
    /// 95% interval around the score.
    pub confidence_interval: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionStat {
    pub emotion: String,
    /// Share of emotion-tagged trades, in percent.
    pub frequency: f64,
    pub avg_profit: f64,
    pub win_rate: f64,
}

/// Emotional Impact Score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalImpactScore {
    pub score: f64,
    /// Percent of trades with a pre-trade emotion.
    pub emotional_awareness: f64,
    /// 0-1, one minus the scaled entropy of pre-trade emotions.
    pub emotional_stability: f64,
    /// -0.5 to 0.5; positive when negative emotions lead to losses.
    pub emotional_bias_index: f64,
    /// -1 to 1.
    pub emotion_performance_correlation: f64,
    pub dominant_emotions: Vec<EmotionStat>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    High,
    Medium,
    Low,
    #[default]
    Untested,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyScore {
    pub strategy: String,
    pub coefficient: f64,
    pub reliability: Reliability,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub sample_size: usize,
    pub expectancy: f64,
    pub max_consecutive_losses: usize,
    pub confidence_interval: (f64, f64),
}

/// Strategy Reliability Coefficient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReliabilityCoefficient {
    pub overall_coefficient: f64,
    /// Sorted by coefficient, best first.
    pub strategy_scores: Vec<StrategyScore>,
    pub best_strategy: Option<String>,
    pub worst_strategy: Option<String>,
    pub diversification_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBreakdown {
    pub session: String,
    pub trades: usize,
    pub total_profit: f64,
    pub win_rate: f64,
    pub avg_trade: f64,
    pub volatility: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedPatterns {
    pub best_hour: Option<u32>,
    pub worst_hour: Option<u32>,
    pub best_day: Option<String>,
    pub worst_day: Option<String>,
}

/// Session Performance Stability.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPerformanceStability {
    pub stability_score: f64,
    pub session_breakdown: Vec<SessionBreakdown>,
    pub most_stable_session: Option<String>,
    pub most_volatile_session: Option<String>,
    pub session_consistency_index: f64,
    pub time_based_patterns: TimeBasedPatterns,
}

/// The full quantitative report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeMetrics {
    // Primary metrics
    pub decision_quality_index: DecisionQualityIndex,
    pub emotional_impact_score: EmotionalImpactScore,
    pub strategy_reliability_coefficient: StrategyReliabilityCoefficient,
    pub session_performance_stability: SessionPerformanceStability,

    // Secondary metrics
    pub edge_consistency_ratio: f64,
    pub risk_adjusted_discipline: f64,
    pub behavioral_entropy: f64,
    pub market_adaptability_index: f64,

    // Composite
    pub overall_quantitative_grade: Grade,
    pub composite_score: f64,
}

impl QuantitativeMetrics {
    /// The report for an empty journal: every score zero, grade F.
    pub fn empty() -> Self {
        Self {
            decision_quality_index: DecisionQualityIndex {
                violations: vec!["Insufficient data".to_string()],
                ..Default::default()
            },
            emotional_impact_score: EmotionalImpactScore {
                recommendations: vec!["Start tracking emotions to see analysis".to_string()],
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// --- Dashboard ---

/// A point on the account equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    pub label: String,
    pub date: Option<NaiveDate>,
    pub balance: Decimal,
    /// Distance below the running peak, in percent (0 or positive).
    pub drawdown_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineStats {
    pub total_trades: usize,
    pub win_rate: f64,
    pub total_profit: f64,
    pub best_trade: f64,
    /// Average achieved R:R over trades that track it.
    pub avg_rr: f64,
    pub profit_factor: f64,
    pub expectancy: f64,
    /// Expectancy divided by the average loss.
    pub reward_risk_ratio: f64,
    pub max_drawdown_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    pub hour: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayBucket {
    pub day: String,
    pub count: usize,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: String,
    pub profit: f64,
    /// Share of the day's traded volume that was won, in percent.
    pub win_pct: f64,
    pub loss_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEquity {
    pub name: String,
    /// `None` for session labels found on trades with no session record.
    pub session_id: Option<String>,
    pub trade_count: usize,
    pub profit: Decimal,
    pub win_rate: f64,
    pub starting_capital: Decimal,
    pub equity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyStat {
    pub name: String,
    pub strategy_id: String,
    pub trade_count: usize,
    pub win_rate: f64,
    pub profit: Decimal,
    pub rule_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetShare {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeCount {
    pub mistake: String,
    pub count: usize,
}

/// Process-discipline snapshot shown next to the headline numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineSnapshot {
    pub decision_quality_score: f64,
    pub grade: Grade,
    pub plan_adherence: f64,
    pub emotional_tracking: f64,
    pub strategy_compliance: f64,
    pub rules_following: f64,
    pub risk_management: f64,
    pub win_rate: f64,
    pub current_streak: usize,
    pub max_streak: usize,
    pub top_mistakes: Vec<MistakeCount>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub headline: HeadlineStats,
    pub equity_curve: Vec<EquityPoint>,
    pub hourly: Vec<HourBucket>,
    pub weekdays: Vec<WeekdayBucket>,
    pub daily: Vec<DailyStat>,
    pub sessions: Vec<SessionEquity>,
    pub strategies: Vec<StrategyStat>,
    pub assets: Vec<AssetShare>,
    pub discipline: DisciplineSnapshot,
}

// --- Settings ---

/// Tunables for the engine facade, read from the `[analytics]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Profiles are refused below this many trades.
    pub min_profile_trades: usize,
    /// Equity-curve start used when the journal balance is zero.
    pub starting_balance: Decimal,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            min_profile_trades: 5,
            starting_balance: Decimal::new(1000, 0),
        }
    }
}
