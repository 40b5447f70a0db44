//! Trajectory grading.
//!
//! [`grade`] is a pure function: the same trajectory, profile, and
//! configuration always produce the same report. Randomized mentor items
//! (praise, theory tips) never enter the trajectory, so nothing here
//! needs to filter them out.

use criticality_types::{
    FeedbackKind, LearningProfile, LetterGrade, ScoreBreakdown, SessionReport, SkillLevel,
    Trajectory,
};

use crate::config::ScoringConfig;
use crate::stats;

/// Grade a completed session's trajectory into a report.
///
/// Invoked exactly once, at session finalization. The optional profile
/// supplies the prior skill level used for the expectation adjustment.
pub fn grade(
    trajectory: &Trajectory,
    profile: Option<&LearningProfile>,
    config: &ScoringConfig,
) -> SessionReport {
    let safety = safety_score(trajectory, config);
    let efficiency = efficiency_score(trajectory, config);
    let knowledge = knowledge_score(trajectory, profile, safety, config);

    let weighted = safety * config.safety_weight
        + efficiency * config.efficiency_weight
        + knowledge * config.knowledge_weight;
    let final_score = round_one_decimal(weighted);

    SessionReport {
        final_score,
        letter_grade: LetterGrade::from_score(final_score),
        breakdown: ScoreBreakdown {
            safety: round_one_decimal(safety),
            efficiency: round_one_decimal(efficiency),
            knowledge: round_one_decimal(knowledge),
        },
        strengths: strengths(safety, efficiency, knowledge),
        improvements: improvements(safety, efficiency, knowledge),
    }
}

/// Safety: start at 100, deduct per critical item and per temperature
/// excursion sample, floor at 0.
fn safety_score(trajectory: &Trajectory, config: &ScoringConfig) -> f64 {
    let critical_count = critical_items(trajectory).count();
    let excursions = trajectory
        .states
        .iter()
        .filter(|state| state.temperature > config.temp_excursion_threshold)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let deductions = critical_count as f64 * config.critical_penalty
        + excursions as f64 * config.temp_excursion_penalty;
    (100.0 - deductions).max(0.0)
}

/// Efficiency: start at 100, deduct for power fluctuation and for missing
/// the scenario's power target, floor at 0.
fn efficiency_score(trajectory: &Trajectory, config: &ScoringConfig) -> f64 {
    let mut score = 100.0;

    let power: Vec<f64> = trajectory
        .states
        .iter()
        .map(|state| state.power_level)
        .collect();
    let power_std = stats::std_dev(&power);

    if power_std > config.power_std_high {
        score -= config.power_std_high_penalty;
    } else if power_std > config.power_std_moderate {
        score -= config.power_std_moderate_penalty;
    }

    if let Some(target) = trajectory.target_power {
        let avg_power = stats::mean(&power);
        if avg_power > 0.0 && target > 0.0 {
            let error_pct = (avg_power - target).abs() / target * 100.0;
            score -= error_pct.min(config.target_error_cap);
        }
    }

    score.max(0.0)
}

/// Knowledge: start at 100; reward correcting after the last critical
/// item and penalize ignoring it; adjust for prior skill level against
/// the safety outcome; clamp to 0--100.
fn knowledge_score(
    trajectory: &Trajectory,
    profile: Option<&LearningProfile>,
    safety: f64,
    config: &ScoringConfig,
) -> f64 {
    let mut score = 100.0;

    let last_critical_time = critical_items(trajectory)
        .map(|record| record.simulation_time)
        .fold(None, |acc: Option<f64>, time| {
            Some(acc.map_or(time, |current| current.max(time)))
        });

    if let Some(last_critical) = last_critical_time {
        let corrected = trajectory.actions.iter().any(|action| {
            action.simulation_time > last_critical && action.kind.is_control_adjustment()
        });
        if corrected {
            score += config.correction_bonus;
        } else {
            score -= config.ignored_critical_penalty;
        }
    }

    if let Some(profile) = profile {
        match profile.skill_level {
            SkillLevel::Beginner if safety > config.beginner_safety_threshold => {
                score += config.beginner_bonus;
            }
            SkillLevel::Advanced if safety < config.advanced_safety_threshold => {
                score -= config.advanced_penalty;
            }
            _ => {}
        }
    }

    score.clamp(0.0, 100.0)
}

/// Iterator over the critical feedback records in a trajectory.
fn critical_items(
    trajectory: &Trajectory,
) -> impl Iterator<Item = &criticality_types::FeedbackRecord> {
    trajectory
        .feedback
        .iter()
        .filter(|record| record.item.kind == FeedbackKind::Critical)
}

/// Strength summary lines from sub-score thresholds.
fn strengths(safety: f64, efficiency: f64, knowledge: f64) -> Vec<String> {
    let mut lines = Vec::new();
    if safety >= 85.0 {
        lines.push(String::from("Strong safety awareness"));
    }
    if efficiency >= 80.0 {
        lines.push(String::from("Good operational efficiency"));
    }
    if knowledge >= 75.0 {
        lines.push(String::from("Good theoretical application"));
    }
    lines
}

/// Improvement summary lines from sub-score thresholds.
fn improvements(safety: f64, efficiency: f64, knowledge: f64) -> Vec<String> {
    let mut lines = Vec::new();
    if safety < 70.0 {
        lines.push(String::from("Safety procedures need more attention"));
    }
    if efficiency < 65.0 {
        lines.push(String::from("Work on operational stability"));
    }
    if knowledge < 60.0 {
        lines.push(String::from("Focus on applying reactor theory"));
    }
    lines
}

/// Round to one decimal place for display.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
