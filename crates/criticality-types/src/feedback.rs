//! Mentor feedback items and the student learning profile.
//!
//! Feedback items are produced fresh on every evaluation call and never
//! mutated afterwards. Whether a student acted on an item is caller-side
//! state, inferred from subsequent action timestamps -- the core does not
//! track it.

use serde::{Deserialize, Serialize};

use crate::enums::{FeedbackCategory, FeedbackKind, LearningStyle, ScenarioKind, SkillLevel};

/// One discrete piece of rule-triggered guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Severity/intent classification.
    pub kind: FeedbackKind,
    /// Short headline shown to the student.
    pub message: String,
    /// Concrete recommended next step.
    pub suggestion: String,
    /// Ordering priority. 1 is the highest severity; the evaluation
    /// output is sorted ascending by this field.
    pub priority: u8,
    /// Topic area.
    pub category: FeedbackCategory,
}

/// A feedback item as recorded into a session's trajectory.
///
/// Only deterministic, severity-bearing items (critical and warning) are
/// recorded; probabilistic praise and theory tips are excluded so that
/// scoring stays a pure function of the trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Simulation time at which the item was delivered (seconds).
    pub simulation_time: f64,
    /// The delivered item.
    pub item: FeedbackItem,
}

/// Per-student learning profile supplied by the caller for personalized
/// feedback and grade adjustment.
///
/// The profile is caller-owned persistent state; the core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningProfile {
    /// Scenario categories the student has historically struggled with.
    pub weaknesses: Vec<ScenarioKind>,
    /// Observed decision-making style.
    pub learning_style: LearningStyle,
    /// Experience level, used for grade expectations.
    pub skill_level: SkillLevel,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_neutral() {
        let profile = LearningProfile::default();
        assert!(profile.weaknesses.is_empty());
        assert_eq!(profile.learning_style, LearningStyle::Balanced);
        assert_eq!(profile.skill_level, SkillLevel::Beginner);
    }

    #[test]
    fn feedback_item_serializes_round_trip() {
        let item = FeedbackItem {
            kind: FeedbackKind::Warning,
            message: String::from("Core temperature high"),
            suggestion: String::from("Increase coolant flow"),
            priority: 2,
            category: FeedbackCategory::Safety,
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: FeedbackItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
