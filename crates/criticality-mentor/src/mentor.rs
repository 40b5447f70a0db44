//! The mentor evaluation pass.
//!
//! [`Mentor::evaluate`] is a pure function of the state snapshot, the
//! recent action history, the optional learning profile, and an injected
//! random source. It never mutates its inputs and owns no per-student
//! state -- implementation tracking belongs to the caller.
//!
//! Output contract: items are sorted by ascending priority (1 = highest
//! severity) and truncated to the configured cap. The randomized branches
//! (praise, theory tips) are the only non-determinism, and both are fully
//! controlled by the injected [`Rng`].

use criticality_types::{
    ActionRecord, FeedbackCategory, FeedbackItem, FeedbackKind, LearningProfile, LearningStyle,
    ReactorState, ScenarioKind,
};
use rand::Rng;

use crate::config::MentorConfig;
use crate::knowledge;
use crate::patterns;
use crate::rules::{self, Rule};

/// The rule-based feedback engine.
#[derive(Debug, Clone)]
pub struct Mentor {
    config: MentorConfig,
    rules: Vec<Rule>,
}

impl Mentor {
    /// Create a mentor with the default rule table for a configuration.
    pub fn new(config: MentorConfig) -> Self {
        let rules = rules::default_rules(&config);
        Self { config, rules }
    }

    /// Create a mentor with a caller-supplied rule table.
    pub const fn with_rules(config: MentorConfig, rules: Vec<Rule>) -> Self {
        Self { config, rules }
    }

    /// Access the active configuration.
    pub const fn config(&self) -> &MentorConfig {
        &self.config
    }

    /// Produce prioritized feedback for a state snapshot.
    ///
    /// `actions` is the session's full action history (the analysis only
    /// reads the most recent window). A learning profile adds the
    /// personalized items on top of the base rule set.
    pub fn evaluate(
        &self,
        state: &ReactorState,
        actions: &[ActionRecord],
        profile: Option<&LearningProfile>,
        rng: &mut impl Rng,
    ) -> Vec<FeedbackItem> {
        let mut items = rules::evaluate(&self.rules, state);

        if let Some(item) = self.balance_check(state) {
            items.push(item);
        }
        if let Some(item) = self.oscillation_check(actions) {
            items.push(item);
        }
        if let Some(profile) = profile {
            items.extend(self.personalized(state, actions, profile));
        }
        if let Some(item) = self.praise(state, rng) {
            items.push(item);
        }
        if let Some(item) = self.theory_tip(rng) {
            items.push(item);
        }

        // Stable sort: ties keep their evaluation order, so output is
        // deterministic for a fixed rule table and RNG.
        items.sort_by_key(|item| item.priority);
        items.truncate(self.config.max_items);
        items
    }

    /// Power/coolant balance: high power needs proportionate flow.
    fn balance_check(&self, state: &ReactorState) -> Option<FeedbackItem> {
        let expected_flow = state.power_level * self.config.balance_expected_ratio;
        if state.power_level > self.config.balance_power_threshold
            && state.coolant_flow_rate < expected_flow
        {
            let suggested =
                (state.power_level * self.config.balance_suggested_ratio).min(150.0);
            return Some(FeedbackItem {
                kind: FeedbackKind::Warning,
                message: String::from("Coolant flow is low for the current power level"),
                suggestion: format!("Raise coolant flow to about {suggested:.0}% of nominal"),
                priority: 2,
                category: FeedbackCategory::Operation,
            });
        }
        None
    }

    /// Oscillatory rod movement caution.
    fn oscillation_check(&self, actions: &[ActionRecord]) -> Option<FeedbackItem> {
        if patterns::rod_oscillation(
            actions,
            self.config.action_window,
            self.config.oscillation_min_rod_actions,
            self.config.oscillation_rate_threshold,
        ) {
            return Some(FeedbackItem {
                kind: FeedbackKind::Warning,
                message: String::from("Oscillating rod movements detected"),
                suggestion: String::from(
                    "Make one adjustment and wait for the plant response before the next",
                ),
                priority: 3,
                category: FeedbackCategory::Technique,
            });
        }
        None
    }

    /// Profile-driven items: weak-category coaching and style cautions.
    fn personalized(
        &self,
        state: &ReactorState,
        actions: &[ActionRecord],
        profile: &LearningProfile,
    ) -> Vec<FeedbackItem> {
        let mut items = Vec::new();

        for weakness in &profile.weaknesses {
            match weakness {
                ScenarioKind::Startup if state.power_level < self.config.startup_focus_power => {
                    items.push(FeedbackItem {
                        kind: FeedbackKind::Educational,
                        message: String::from("Focus area: reactor startup"),
                        suggestion: String::from(
                            "Withdraw rods gradually and watch the temperature response",
                        ),
                        priority: 2,
                        category: FeedbackCategory::Operation,
                    });
                }
                ScenarioKind::Transient
                    if (state.power_level - self.config.transient_band_center).abs()
                        > self.config.transient_band_halfwidth =>
                {
                    items.push(FeedbackItem {
                        kind: FeedbackKind::Suggestion,
                        message: String::from("Power stability needs improvement"),
                        suggestion: String::from(
                            "Try smaller adjustments and wait for the system response",
                        ),
                        priority: 2,
                        category: FeedbackCategory::Operation,
                    });
                }
                ScenarioKind::Emergency if state.emergency_level.is_active() => {
                    items.push(FeedbackItem {
                        kind: FeedbackKind::Educational,
                        message: String::from("Focus area: emergency response"),
                        suggestion: String::from(
                            "Trip first when in doubt, then manage cooling and pressure",
                        ),
                        priority: 2,
                        category: FeedbackCategory::Safety,
                    });
                }
                _ => {}
            }
        }

        match profile.learning_style {
            LearningStyle::RapidExperimental
                if patterns::rod_action_count(actions, self.config.action_window)
                    >= self.config.rapid_style_rod_actions =>
            {
                items.push(FeedbackItem {
                    kind: FeedbackKind::Warning,
                    message: String::from("Frequent control adjustments detected"),
                    suggestion: String::from(
                        "Plan your actions; reactors respond over seconds to minutes",
                    ),
                    priority: 3,
                    category: FeedbackCategory::Technique,
                });
            }
            LearningStyle::DeliberateCalculative
                if actions.len() < self.config.deliberate_style_max_actions =>
            {
                items.push(FeedbackItem {
                    kind: FeedbackKind::Encouragement,
                    message: String::from("Good caution, but don't be afraid to act"),
                    suggestion: String::from(
                        "The plant has multiple safety systems; try small changes and observe",
                    ),
                    priority: 3,
                    category: FeedbackCategory::Technique,
                });
            }
            _ => {}
        }

        items
    }

    /// Probabilistic positive reinforcement inside the optimal band.
    fn praise(&self, state: &ReactorState, rng: &mut impl Rng) -> Option<FeedbackItem> {
        if !self.in_optimal_band(state) {
            return None;
        }
        let probability = self.config.praise_probability.clamp(0.0, 1.0);
        if !rng.random_bool(probability) {
            return None;
        }
        Some(FeedbackItem {
            kind: FeedbackKind::Praise,
            message: String::from("All parameters in the optimal band"),
            suggestion: String::from("Keep your control inputs steady"),
            priority: 5,
            category: FeedbackCategory::Operation,
        })
    }

    /// Whether every monitored parameter sits in the optimal band.
    fn in_optimal_band(&self, state: &ReactorState) -> bool {
        !state.emergency_level.is_active()
            && !state.scram_status
            && state.power_level >= self.config.optimal_power_min
            && state.power_level <= self.config.optimal_power_max
            && state.temperature < state.limits.temperature * self.config.optimal_temp_fraction
            && state.coolant_flow_rate >= self.config.optimal_coolant_min
    }

    /// Probabilistic theory tip from the knowledge base.
    fn theory_tip(&self, rng: &mut impl Rng) -> Option<FeedbackItem> {
        let probability = self.config.theory_tip_probability.clamp(0.0, 1.0);
        if !rng.random_bool(probability) {
            return None;
        }
        let topic = knowledge::TOPICS.get(rng.random_range(0..knowledge::TOPICS.len()))?;
        let tip = topic.tips.get(rng.random_range(0..topic.tips.len()))?;
        Some(FeedbackItem {
            kind: FeedbackKind::Educational,
            message: format!("Reactor theory: {}", topic.name),
            suggestion: (*tip).to_owned(),
            priority: 4,
            category: FeedbackCategory::Theory,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use criticality_types::{ActionKind, EmergencyLevel, SkillLevel};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    /// Mentor with both probabilistic branches suppressed.
    fn quiet_mentor() -> Mentor {
        Mentor::new(MentorConfig {
            praise_probability: 0.0,
            theory_tip_probability: 0.0,
            ..MentorConfig::default()
        })
    }

    /// Mentor with both probabilistic branches forced on.
    fn chatty_mentor() -> Mentor {
        Mentor::new(MentorConfig {
            praise_probability: 1.0,
            theory_tip_probability: 1.0,
            ..MentorConfig::default()
        })
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn rod_action(time: f64, value: f64) -> ActionRecord {
        ActionRecord {
            simulation_time: time,
            kind: ActionKind::ControlRod,
            value,
            state_before: Box::new(ReactorState::default()),
        }
    }

    #[test]
    fn output_is_sorted_and_capped() {
        let mentor = chatty_mentor();
        let state = ReactorState {
            temperature: 345.0,
            power_level: 95.0,
            coolant_flow_rate: 10.0,
            emergency_level: EmergencyLevel::Severe,
            ..ReactorState::default()
        };
        let actions = vec![
            rod_action(0.0, 30.0),
            rod_action(0.2, 80.0),
            rod_action(0.4, 20.0),
        ];
        let profile = LearningProfile {
            weaknesses: vec![ScenarioKind::Emergency],
            learning_style: LearningStyle::RapidExperimental,
            skill_level: SkillLevel::Beginner,
        };
        let items = mentor.evaluate(&state, &actions, Some(&profile), &mut rng());
        assert!(items.len() <= 5);
        for pair in items.windows(2) {
            if let [a, b] = pair {
                assert!(a.priority <= b.priority);
            }
        }
        // The emergency item must survive truncation: it is priority 1.
        assert_eq!(items.first().unwrap().kind, FeedbackKind::Critical);
    }

    #[test]
    fn quiet_state_with_no_profile_is_silent() {
        let mentor = quiet_mentor();
        let state = ReactorState::default();
        let items = mentor.evaluate(&state, &[], None, &mut rng());
        assert!(items.is_empty());
    }

    #[test]
    fn balance_check_suggests_concrete_flow() {
        let mentor = quiet_mentor();
        let state = ReactorState {
            power_level: 90.0,
            coolant_flow_rate: 40.0,
            ..ReactorState::default()
        };
        let items = mentor.evaluate(&state, &[], None, &mut rng());
        let balance = items
            .iter()
            .find(|item| item.message.contains("Coolant flow is low"))
            .unwrap();
        assert!(balance.suggestion.contains("108%"), "90 MW * 1.2 = 108");
    }

    #[test]
    fn praise_requires_optimal_band() {
        let mentor = chatty_mentor();
        // Optimal: mid power, cool core, good flow, no emergency.
        let good = ReactorState {
            power_level: 50.0,
            temperature: 270.0,
            coolant_flow_rate: 100.0,
            ..ReactorState::default()
        };
        let items = mentor.evaluate(&good, &[], None, &mut rng());
        assert!(items.iter().any(|item| item.kind == FeedbackKind::Praise));

        // Tripped plant never gets praise, whatever the dice say.
        let tripped = ReactorState {
            scram_status: true,
            ..good
        };
        let items = mentor.evaluate(&tripped, &[], None, &mut rng());
        assert!(!items.iter().any(|item| item.kind == FeedbackKind::Praise));
    }

    #[test]
    fn praise_probability_zero_suppresses_praise() {
        let mentor = quiet_mentor();
        let good = ReactorState {
            power_level: 50.0,
            temperature: 270.0,
            coolant_flow_rate: 100.0,
            ..ReactorState::default()
        };
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let items = mentor.evaluate(&good, &[], None, &mut rng);
            assert!(!items.iter().any(|item| item.kind == FeedbackKind::Praise));
        }
    }

    #[test]
    fn startup_weakness_fires_at_low_power() {
        let mentor = quiet_mentor();
        let state = ReactorState {
            power_level: 5.0,
            temperature: 150.0,
            ..ReactorState::default()
        };
        let profile = LearningProfile {
            weaknesses: vec![ScenarioKind::Startup],
            ..LearningProfile::default()
        };
        let items = mentor.evaluate(&state, &[], Some(&profile), &mut rng());
        assert!(items.iter().any(|item| item.message.contains("reactor startup")));
    }

    #[test]
    fn transient_weakness_fires_outside_band() {
        let mentor = quiet_mentor();
        let state = ReactorState {
            power_level: 85.0,
            ..ReactorState::default()
        };
        let profile = LearningProfile {
            weaknesses: vec![ScenarioKind::Transient],
            ..LearningProfile::default()
        };
        let items = mentor.evaluate(&state, &[], Some(&profile), &mut rng());
        assert!(items.iter().any(|item| item.message.contains("Power stability")));

        // Inside the band the item is absent.
        let steady = ReactorState {
            power_level: 55.0,
            ..ReactorState::default()
        };
        let items = mentor.evaluate(&steady, &[], Some(&profile), &mut rng());
        assert!(!items.iter().any(|item| item.message.contains("Power stability")));
    }

    #[test]
    fn deliberate_style_gets_encouragement_when_idle() {
        let mentor = quiet_mentor();
        let state = ReactorState::default();
        let profile = LearningProfile {
            learning_style: LearningStyle::DeliberateCalculative,
            ..LearningProfile::default()
        };
        let items = mentor.evaluate(&state, &[], Some(&profile), &mut rng());
        assert!(items.iter().any(|item| item.kind == FeedbackKind::Encouragement));
    }

    #[test]
    fn rapid_style_flags_burst_of_rod_actions() {
        let mentor = quiet_mentor();
        let state = ReactorState::default();
        let profile = LearningProfile {
            learning_style: LearningStyle::RapidExperimental,
            ..LearningProfile::default()
        };
        let actions = vec![
            rod_action(0.0, 50.0),
            rod_action(0.1, 52.0),
            rod_action(0.2, 54.0),
        ];
        let items = mentor.evaluate(&state, &actions, Some(&profile), &mut rng());
        assert!(
            items
                .iter()
                .any(|item| item.message.contains("Frequent control adjustments"))
        );
    }

    #[test]
    fn evaluation_does_not_mutate_inputs() {
        let mentor = chatty_mentor();
        let state = ReactorState::default();
        let actions = vec![rod_action(0.0, 50.0)];
        let before_state = state.clone();
        let before_actions = actions.clone();
        let _ = mentor.evaluate(&state, &actions, None, &mut rng());
        assert_eq!(state, before_state);
        assert_eq!(actions, before_actions);
    }

    #[test]
    fn same_seed_same_output() {
        let mentor = chatty_mentor();
        let state = ReactorState {
            power_level: 50.0,
            temperature: 270.0,
            coolant_flow_rate: 100.0,
            ..ReactorState::default()
        };
        let mut rng_a = SmallRng::seed_from_u64(99);
        let mut rng_b = SmallRng::seed_from_u64(99);
        let a = mentor.evaluate(&state, &[], None, &mut rng_a);
        let b = mentor.evaluate(&state, &[], None, &mut rng_b);
        assert_eq!(a, b);
    }
}
