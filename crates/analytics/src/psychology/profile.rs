// In crates/analytics/src/psychology/profile.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stats::Grade;

// --- Behavioral Patterns ---

/// How often a pattern shows up. The detectors currently emit `Rare`,
/// `Occasional` and `Frequent`; `Persistent` is accepted when reading
/// stored profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternFrequency {
    Rare,
    Occasional,
    Frequent,
    Persistent,
}

/// Ordered from least to most severe. No detector rates a pattern `Low`
/// today; the variant keeps the scale complete for stored profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralPattern {
    pub id: String,
    pub name: String,
    pub description: String,
    pub frequency: PatternFrequency,
    pub impact: Impact,
    pub evidence: Vec<String>,
    pub trades_affected: usize,
}

// --- Risk ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    OversizedPosition,
    NoStopLoss,
    Martingale,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::OversizedPosition => "oversized_position",
            ViolationKind::NoStopLoss => "no_stop_loss",
            ViolationKind::Martingale => "martingale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskViolation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub severity: Severity,
    pub occurrences: usize,
    /// At most three sample descriptions.
    pub examples: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub overall_score: f64,
    pub position_sizing_grade: Grade,
    pub risk_reward_grade: Grade,
    /// Percent of trades placed with a stop loss.
    pub max_drawdown_respect: f64,
    pub average_risk_per_trade: f64,
    pub average_planned_rr: f64,
    pub risk_violations: Vec<RiskViolation>,
    pub capital_preservation_score: f64,
}

// --- Weaknesses ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaknessType {
    Emotional,
    Cognitive,
    Behavioral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaknessSeverity {
    Mild,
    Moderate,
    Severe,
}

impl WeaknessSeverity {
    /// Points removed from the overall score per 100% frequency.
    pub fn weight(&self) -> f64 {
        match self {
            WeaknessSeverity::Mild => 5.0,
            WeaknessSeverity::Moderate => 10.0,
            WeaknessSeverity::Severe => 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologicalWeakness {
    pub id: String,
    #[serde(rename = "type")]
    pub weakness_type: WeaknessType,
    pub name: String,
    pub description: String,
    pub triggers: Vec<String>,
    pub manifestations: Vec<String>,
    /// Share of all trades showing the weakness, in percent.
    pub frequency: f64,
    pub severity: WeaknessSeverity,
    pub countermeasures: Vec<String>,
}

// --- Execution & Consistency ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationImpact {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDeviation {
    pub rule: String,
    pub violation_rate: f64,
    pub impact: DeviationImpact,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyExecutionScore {
    pub overall_score: f64,
    pub plan_adherence: f64,
    pub entry_timing: f64,
    pub exit_timing: f64,
    pub strategy_consistency: f64,
    pub rule_following: f64,
    pub common_deviations: Vec<StrategyDeviation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyMetrics {
    pub win_rate: f64,
    pub profit_factor: f64,
    pub expectancy: f64,
    pub consecutive_wins: usize,
    pub consecutive_losses: usize,
    pub volatility_of_returns: f64,
    pub trading_frequency_consistency: f64,
    /// Percent of trades with a pre-trade emotion recorded.
    pub emotional_consistency: f64,
}

// --- Improvement Plan ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Risk,
    Psychology,
    Strategy,
    Discipline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub category: ActionCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub expected_outcome: String,
    pub timeframe: String,
    pub measurable_target: String,
    pub success_criteria: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    PreMarket,
    DuringMarket,
    PostMarket,
    Daily,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub time_of_day: TimeOfDay,
    pub activity: String,
    pub duration: String,
    pub purpose: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Mindfulness,
    Journaling,
    Visualization,
    Review,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub frequency: String,
    pub instructions: Vec<String>,
    pub expected_benefit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementPlan {
    pub immediate_actions: Vec<ActionItem>,
    /// 2-4 weeks.
    pub short_term_goals: Vec<ActionItem>,
    /// 1-2 months.
    pub medium_term_goals: Vec<ActionItem>,
    /// 3-6 months.
    pub long_term_goals: Vec<ActionItem>,
    pub daily_routines: Vec<Routine>,
    pub psychological_exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlag {
    pub id: String,
    pub severity: Severity,
    pub issue: String,
    pub description: String,
    pub consequence: String,
    pub urgent_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strength {
    pub id: String,
    pub area: String,
    pub description: String,
    pub evidence: Vec<String>,
    pub leverage_opportunity: String,
}

// --- Profile ---

/// The complete psychological profile. Every value is final: nothing needs
/// to be recomputed to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologicalProfile {
    pub overall_score: f64,
    pub grade: Grade,
    pub behavioral_patterns: Vec<BehavioralPattern>,
    pub risk_management: RiskAnalysis,
    pub psychological_weaknesses: Vec<PsychologicalWeakness>,
    pub strategy_execution: StrategyExecutionScore,
    pub consistency_metrics: ConsistencyMetrics,
    pub improvement_plan: ImprovementPlan,
    pub red_flags: Vec<RedFlag>,
    pub strengths: Vec<Strength>,
}

/// A profile stamped with an identifier and the time it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub trader_id: Uuid,
    pub analysis_date: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: PsychologicalProfile,
}

impl ProfileReport {
    pub fn new(profile: PsychologicalProfile) -> Self {
        Self {
            trader_id: Uuid::new_v4(),
            analysis_date: Utc::now(),
            profile,
        }
    }
}
