//! The declarative safety/operational rule table.
//!
//! Rules are data: a tagged condition plus the item template it produces.
//! The evaluation loop is a single pass over the table; each rule
//! contributes zero or one item. Table order carries no meaning -- every
//! item has its own priority and the mentor sorts the combined output.

use criticality_types::{
    EmergencyLevel, FeedbackCategory, FeedbackItem, FeedbackKind, ReactorState,
};

use crate::config::MentorConfig;

/// A condition evaluated against the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Temperature above the given fraction of its configured limit.
    TemperatureAbove {
        /// Fraction of the temperature limit.
        fraction_of_limit: f64,
    },
    /// Power above the given fraction of its configured limit.
    PowerAbove {
        /// Fraction of the power limit.
        fraction_of_limit: f64,
    },
    /// Coolant flow below an absolute percentage.
    CoolantBelow {
        /// Flow threshold in percent of nominal.
        pct: f64,
    },
    /// Emergency level at or above the given severity.
    EmergencyAtLeast {
        /// Minimum severity that triggers the rule.
        level: EmergencyLevel,
    },
}

impl Condition {
    /// Whether the condition holds for the given state.
    pub fn holds(self, state: &ReactorState) -> bool {
        match self {
            Self::TemperatureAbove { fraction_of_limit } => {
                state.temperature > state.limits.temperature * fraction_of_limit
            }
            Self::PowerAbove { fraction_of_limit } => {
                state.power_level > state.limits.power * fraction_of_limit
            }
            Self::CoolantBelow { pct } => state.coolant_flow_rate < pct,
            Self::EmergencyAtLeast { level } => state.emergency_level >= level,
        }
    }
}

/// One condition-to-item mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// When the rule fires.
    pub condition: Condition,
    /// Severity classification of the produced item.
    pub kind: FeedbackKind,
    /// Priority of the produced item (1 = highest).
    pub priority: u8,
    /// Topic area of the produced item.
    pub category: FeedbackCategory,
    /// Headline text.
    pub message: &'static str,
    /// Recommended next step. Empty for the emergency rule, whose
    /// suggestion is the level-specific procedure.
    pub suggestion: &'static str,
}

/// Build the default rule table from mentor configuration.
pub fn default_rules(config: &MentorConfig) -> Vec<Rule> {
    vec![
        Rule {
            condition: Condition::EmergencyAtLeast {
                level: EmergencyLevel::Caution,
            },
            kind: FeedbackKind::Critical,
            priority: 1,
            category: FeedbackCategory::Safety,
            message: "",
            suggestion: "",
        },
        Rule {
            condition: Condition::TemperatureAbove {
                fraction_of_limit: config.temp_warning_fraction,
            },
            kind: FeedbackKind::Warning,
            priority: 2,
            category: FeedbackCategory::Safety,
            message: "Core temperature approaching its limit",
            suggestion: "Increase coolant flow or insert control rods",
        },
        Rule {
            condition: Condition::PowerAbove {
                fraction_of_limit: config.power_warning_fraction,
            },
            kind: FeedbackKind::Warning,
            priority: 2,
            category: FeedbackCategory::Operation,
            message: "Power level approaching the licensed limit",
            suggestion: "Insert control rods to bring power down",
        },
        Rule {
            condition: Condition::CoolantBelow {
                pct: config.coolant_low_pct,
            },
            kind: FeedbackKind::Warning,
            priority: 2,
            category: FeedbackCategory::Operation,
            message: "Coolant flow rate is low",
            suggestion: "Restore coolant flow toward the nominal rate",
        },
    ]
}

/// Evaluate the rule table against a state in one pass.
pub fn evaluate(rules: &[Rule], state: &ReactorState) -> Vec<FeedbackItem> {
    rules
        .iter()
        .filter(|rule| rule.condition.holds(state))
        .map(|rule| render(rule, state))
        .collect()
}

/// Render a fired rule into a feedback item.
fn render(rule: &Rule, state: &ReactorState) -> FeedbackItem {
    if let Condition::EmergencyAtLeast { .. } = rule.condition {
        let level = state.emergency_level;
        return FeedbackItem {
            kind: rule.kind,
            message: format!("Emergency level {}! Immediate action required.", level.as_u8()),
            suggestion: emergency_procedure(level).to_owned(),
            priority: rule.priority,
            category: rule.category,
        };
    }
    FeedbackItem {
        kind: rule.kind,
        message: rule.message.to_owned(),
        suggestion: rule.suggestion.to_owned(),
        priority: rule.priority,
        category: rule.category,
    }
}

/// The procedure recommendation for each emergency level.
pub const fn emergency_procedure(level: EmergencyLevel) -> &'static str {
    match level {
        EmergencyLevel::Normal => "No action required.",
        EmergencyLevel::Caution => "Monitor closely. Parameters approaching limits.",
        EmergencyLevel::Elevated => "Prepare for action. Consider reducing power.",
        EmergencyLevel::Severe => {
            "Take corrective action. Increase coolant flow, consider rod insertion."
        }
        EmergencyLevel::Critical => "EMERGENCY! Initiate SCRAM immediately. Activate emergency cooling.",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use criticality_types::ReactorState;

    use super::*;

    fn rules() -> Vec<Rule> {
        default_rules(&MentorConfig::default())
    }

    #[test]
    fn quiet_state_fires_no_rules() {
        let state = ReactorState::default();
        let items = evaluate(&rules(), &state);
        assert!(items.is_empty());
    }

    #[test]
    fn each_rule_fires_at_most_once() {
        let state = ReactorState {
            temperature: 340.0,
            power_level: 95.0,
            coolant_flow_rate: 10.0,
            emergency_level: EmergencyLevel::Severe,
            ..ReactorState::default()
        };
        let items = evaluate(&rules(), &state);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn emergency_rule_renders_level_and_procedure() {
        let state = ReactorState {
            emergency_level: EmergencyLevel::Severe,
            ..ReactorState::default()
        };
        let items = evaluate(&rules(), &state);
        let emergency = items
            .iter()
            .find(|item| item.kind == FeedbackKind::Critical)
            .unwrap();
        assert!(emergency.message.contains("level 3"));
        assert_eq!(emergency.suggestion, emergency_procedure(EmergencyLevel::Severe));
        assert_eq!(emergency.priority, 1);
    }

    #[test]
    fn temperature_rule_respects_configured_limit() {
        let mut state = ReactorState::default();
        state.limits.temperature = 500.0;
        state.temperature = 340.0; // 68% of 500: below the 85% threshold
        let items = evaluate(&rules(), &state);
        assert!(items.is_empty());
    }

    #[test]
    fn coolant_rule_fires_below_threshold() {
        let state = ReactorState {
            coolant_flow_rate: 20.0,
            ..ReactorState::default()
        };
        let items = evaluate(&rules(), &state);
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().kind, FeedbackKind::Warning);
    }
}
