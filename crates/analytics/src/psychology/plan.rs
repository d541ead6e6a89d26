// In crates/analytics/src/psychology/plan.rs

//! Turns the analysis into red flags, strengths and an improvement plan.

use super::profile::{
    ActionCategory, ActionItem, BehavioralPattern, ConsistencyMetrics, Exercise, ExerciseType,
    Impact, ImprovementPlan, Priority, PsychologicalWeakness, RedFlag, RiskAnalysis, Routine,
    Severity, Strength, StrategyExecutionScore, TimeOfDay, ViolationKind, WeaknessSeverity,
};

const PLAN_ADHERENCE_TARGET: f64 = 80.0;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// --- Improvement Plan ---

pub fn improvement_plan(
    patterns: &[BehavioralPattern],
    risk: &RiskAnalysis,
    weaknesses: &[PsychologicalWeakness],
    execution: &StrategyExecutionScore,
) -> ImprovementPlan {
    // Critical risk violations need fixing now.
    let immediate_actions = risk
        .risk_violations
        .iter()
        .filter(|v| v.severity == Severity::Critical)
        .map(|v| ActionItem {
            id: format!("risk-{}", v.kind.as_str()),
            category: ActionCategory::Risk,
            priority: Priority::Critical,
            title: format!("Fix {}", v.kind.as_str().replace('_', " ")),
            description: v.recommendation.clone(),
            expected_outcome: "Reduce account volatility and prevent large losses".to_string(),
            timeframe: "Starting immediately".to_string(),
            measurable_target: "Zero violations in next 10 trades".to_string(),
            success_criteria: strings(&[
                "No oversized positions",
                "All trades have stop loss",
                "Fixed position sizing",
            ]),
        })
        .collect();

    let short_term_goals = weaknesses
        .iter()
        .map(|w| ActionItem {
            id: format!("psych-{}", w.id),
            category: ActionCategory::Psychology,
            priority: if w.severity == WeaknessSeverity::Severe {
                Priority::High
            } else {
                Priority::Medium
            },
            title: format!("Address {}", w.name),
            description: w.description.clone(),
            expected_outcome: "Reduced emotional interference in trading".to_string(),
            timeframe: "2-4 weeks".to_string(),
            measurable_target: format!("Reduce {} occurrences by 50%", w.name.to_lowercase()),
            success_criteria: w.countermeasures.iter().take(3).cloned().collect(),
        })
        .collect();

    let mut medium_term_goals = Vec::new();
    if execution.plan_adherence < PLAN_ADHERENCE_TARGET {
        medium_term_goals.push(ActionItem {
            id: "exec-plan".to_string(),
            category: ActionCategory::Discipline,
            priority: Priority::High,
            title: "Improve Plan Adherence".to_string(),
            description: format!("Currently only planning {:.0}% of trades", execution.plan_adherence),
            expected_outcome: "Every trade has a clear plan before entry".to_string(),
            timeframe: "1-2 months".to_string(),
            measurable_target: "90% plan adherence rate".to_string(),
            success_criteria: strings(&[
                "Document R:R before every trade",
                "Define entry/exit criteria",
                "Note emotional state",
            ]),
        });
    }

    let long_term_goals = patterns
        .iter()
        .filter(|p| p.impact >= Impact::High)
        .map(|p| ActionItem {
            id: format!("behavior-{}", p.id),
            category: ActionCategory::Discipline,
            priority: if p.impact == Impact::Critical {
                Priority::Critical
            } else {
                Priority::High
            },
            title: format!("Eliminate {}", p.name),
            description: p.description.clone(),
            expected_outcome: "Sustainable trading behavior".to_string(),
            timeframe: "3-6 months".to_string(),
            measurable_target: format!("Reduce {} by 80%", p.name.to_lowercase()),
            success_criteria: strings(&[
                "Awareness of triggers",
                "Implementation of interventions",
                "Consistent improvement over time",
            ]),
        })
        .collect();

    ImprovementPlan {
        immediate_actions,
        short_term_goals,
        medium_term_goals,
        long_term_goals,
        daily_routines: daily_routines(),
        psychological_exercises: psychological_exercises(),
    }
}

fn daily_routines() -> Vec<Routine> {
    let routine = |time_of_day, activity: &str, duration: &str, purpose: &str| Routine {
        time_of_day,
        activity: activity.to_string(),
        duration: duration.to_string(),
        purpose: purpose.to_string(),
    };

    vec![
        routine(
            TimeOfDay::PreMarket,
            "Meditation & Market Review",
            "15 minutes",
            "Clear mind and identify key levels",
        ),
        routine(
            TimeOfDay::PreMarket,
            "Trade Plan Creation",
            "10 minutes",
            "Define setups to watch and rules",
        ),
        routine(
            TimeOfDay::DuringMarket,
            "Pre-Trade Checklist",
            "2 minutes",
            "Ensure all criteria met before entry",
        ),
        routine(
            TimeOfDay::PostMarket,
            "Trade Review & Journaling",
            "20 minutes",
            "Document emotions, mistakes, and lessons",
        ),
    ]
}

fn psychological_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            name: "The 5-Minute Pause".to_string(),
            exercise_type: ExerciseType::Mindfulness,
            frequency: "Before every trade".to_string(),
            instructions: strings(&[
                "Step away from screens",
                "Take 5 deep breaths",
                "Ask: \"Am I trading my plan or my emotions?\"",
                "Only proceed if plan is clear",
            ]),
            expected_benefit: "Reduces impulsive trades by creating space between urge and action".to_string(),
        },
        Exercise {
            name: "Devil's Advocate".to_string(),
            exercise_type: ExerciseType::Journaling,
            frequency: "Before every trade".to_string(),
            instructions: strings(&[
                "Write down your trade thesis",
                "List 3 reasons why this trade could fail",
                "Identify what would invalidate your idea",
                "Decide if you still want to proceed",
            ]),
            expected_benefit: "Combats confirmation bias and improves decision quality".to_string(),
        },
        Exercise {
            name: "Win/Loss Visualization".to_string(),
            exercise_type: ExerciseType::Visualization,
            frequency: "Daily".to_string(),
            instructions: strings(&[
                "Visualize a successful trade step-by-step",
                "Visualize handling a losing trade calmly",
                "Feel the emotions of both scenarios",
                "Commit to process over outcome",
            ]),
            expected_benefit: "Prepares mind for both outcomes, reduces emotional volatility".to_string(),
        },
    ]
}

// --- Red Flags ---

const NO_STOP_LOSS_FLAG_THRESHOLD: usize = 3;

pub fn red_flags(risk: &RiskAnalysis, weaknesses: &[PsychologicalWeakness]) -> Vec<RedFlag> {
    let mut flags = Vec::new();
    let violation = |kind: ViolationKind| risk.risk_violations.iter().find(|v| v.kind == kind);

    if violation(ViolationKind::NoStopLoss).is_some_and(|v| v.occurrences > NO_STOP_LOSS_FLAG_THRESHOLD) {
        flags.push(RedFlag {
            id: "no-sl".to_string(),
            severity: Severity::Critical,
            issue: "Trading Without Stop Losses".to_string(),
            description: "Multiple trades executed without defined stop losses".to_string(),
            consequence: "Catastrophic losses can wipe out account".to_string(),
            urgent_action: "Implement mandatory stop loss rule immediately".to_string(),
        });
    }

    if violation(ViolationKind::Martingale).is_some() {
        flags.push(RedFlag {
            id: "martingale".to_string(),
            severity: Severity::Critical,
            issue: "Martingale Behavior Detected".to_string(),
            description: "Increasing position size after losses".to_string(),
            consequence: "Account destruction through exponential risk".to_string(),
            urgent_action: "Use fixed fractional position sizing only".to_string(),
        });
    }

    let severe = weaknesses
        .iter()
        .filter(|w| w.severity == WeaknessSeverity::Severe)
        .count();
    if severe >= 2 {
        flags.push(RedFlag {
            id: "multiple-weaknesses".to_string(),
            severity: Severity::Warning,
            issue: "Multiple Severe Psychological Weaknesses".to_string(),
            description: format!("{severe} severe behavioral patterns identified"),
            consequence: "Consistent losses due to unmanaged psychology".to_string(),
            urgent_action: "Consider working with trading psychologist".to_string(),
        });
    }

    flags
}

// --- Strengths ---

pub fn strengths(patterns: &[BehavioralPattern], consistency: &ConsistencyMetrics) -> Vec<Strength> {
    let mut strengths = Vec::new();

    if consistency.emotional_consistency > 80.0 {
        strengths.push(Strength {
            id: "emotional-awareness".to_string(),
            area: "Emotional Awareness".to_string(),
            description: "Consistently tracks emotions before and after trades".to_string(),
            evidence: vec![format!(
                "{:.0}% of trades have emotion documented",
                consistency.emotional_consistency
            )],
            leverage_opportunity: "Use this awareness to identify your optimal trading mindset".to_string(),
        });
    }

    if consistency.win_rate > 55.0 && consistency.profit_factor > 1.5 {
        strengths.push(Strength {
            id: "edge-recognition".to_string(),
            area: "Strategy Edge".to_string(),
            description: "Demonstrates positive expectancy in trading".to_string(),
            evidence: vec![
                format!("{:.0}% win rate", consistency.win_rate),
                format!("{:.2} profit factor", consistency.profit_factor),
            ],
            leverage_opportunity: "Focus on your winning setups and eliminate marginal trades".to_string(),
        });
    }

    if patterns.is_empty() {
        strengths.push(Strength {
            id: "discipline".to_string(),
            area: "Trading Discipline".to_string(),
            description: "No significant behavioral patterns detected".to_string(),
            evidence: strings(&["Consistent execution without overtrading or revenge trading"]),
            leverage_opportunity: "Maintain current routines and focus on incremental improvements".to_string(),
        });
    }

    strengths
}
