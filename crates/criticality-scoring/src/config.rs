//! Scoring rubric constants.
//!
//! Every penalty, bonus, threshold, and weight used by the grader lives
//! here. The rubric weights safety at 40% and efficiency and knowledge
//! at 30% each; letter-grade cutoffs are fixed in the grade type itself.

use serde::{Deserialize, Serialize};

/// Configuration for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Safety points lost per critical feedback item (default: 20).
    #[serde(default = "default_critical_penalty")]
    pub critical_penalty: f64,

    /// Safety points lost per temperature excursion sample (default: 5).
    #[serde(default = "default_temp_excursion_penalty")]
    pub temp_excursion_penalty: f64,

    /// Temperature (deg C) above which a state sample counts as an
    /// excursion (default: 320).
    #[serde(default = "default_temp_excursion_threshold")]
    pub temp_excursion_threshold: f64,

    /// Power standard deviation that marks heavy fluctuation (default: 15).
    #[serde(default = "default_power_std_high")]
    pub power_std_high: f64,

    /// Efficiency points lost for heavy fluctuation (default: 30).
    #[serde(default = "default_power_std_high_penalty")]
    pub power_std_high_penalty: f64,

    /// Power standard deviation that marks moderate fluctuation
    /// (default: 10).
    #[serde(default = "default_power_std_moderate")]
    pub power_std_moderate: f64,

    /// Efficiency points lost for moderate fluctuation (default: 15).
    #[serde(default = "default_power_std_moderate_penalty")]
    pub power_std_moderate_penalty: f64,

    /// Cap on the target-power error deduction (default: 40).
    #[serde(default = "default_target_error_cap")]
    pub target_error_cap: f64,

    /// Knowledge bonus for correcting after critical feedback (default: 20).
    #[serde(default = "default_correction_bonus")]
    pub correction_bonus: f64,

    /// Knowledge penalty for ignoring critical feedback (default: 30).
    #[serde(default = "default_ignored_critical_penalty")]
    pub ignored_critical_penalty: f64,

    /// Encouragement bonus for beginners (default: 10).
    #[serde(default = "default_beginner_bonus")]
    pub beginner_bonus: f64,

    /// Safety sub-score a beginner must clear for the bonus (default: 70).
    #[serde(default = "default_beginner_safety_threshold")]
    pub beginner_safety_threshold: f64,

    /// Stricter penalty for advanced students (default: 10).
    #[serde(default = "default_advanced_penalty")]
    pub advanced_penalty: f64,

    /// Safety sub-score below which an advanced student is penalized
    /// (default: 90).
    #[serde(default = "default_advanced_safety_threshold")]
    pub advanced_safety_threshold: f64,

    /// Weight of the safety sub-score in the final score (default: 0.4).
    #[serde(default = "default_safety_weight")]
    pub safety_weight: f64,

    /// Weight of the efficiency sub-score (default: 0.3).
    #[serde(default = "default_efficiency_weight")]
    pub efficiency_weight: f64,

    /// Weight of the knowledge sub-score (default: 0.3).
    #[serde(default = "default_knowledge_weight")]
    pub knowledge_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            critical_penalty: default_critical_penalty(),
            temp_excursion_penalty: default_temp_excursion_penalty(),
            temp_excursion_threshold: default_temp_excursion_threshold(),
            power_std_high: default_power_std_high(),
            power_std_high_penalty: default_power_std_high_penalty(),
            power_std_moderate: default_power_std_moderate(),
            power_std_moderate_penalty: default_power_std_moderate_penalty(),
            target_error_cap: default_target_error_cap(),
            correction_bonus: default_correction_bonus(),
            ignored_critical_penalty: default_ignored_critical_penalty(),
            beginner_bonus: default_beginner_bonus(),
            beginner_safety_threshold: default_beginner_safety_threshold(),
            advanced_penalty: default_advanced_penalty(),
            advanced_safety_threshold: default_advanced_safety_threshold(),
            safety_weight: default_safety_weight(),
            efficiency_weight: default_efficiency_weight(),
            knowledge_weight: default_knowledge_weight(),
        }
    }
}

const fn default_critical_penalty() -> f64 {
    20.0
}

const fn default_temp_excursion_penalty() -> f64 {
    5.0
}

const fn default_temp_excursion_threshold() -> f64 {
    320.0
}

const fn default_power_std_high() -> f64 {
    15.0
}

const fn default_power_std_high_penalty() -> f64 {
    30.0
}

const fn default_power_std_moderate() -> f64 {
    10.0
}

const fn default_power_std_moderate_penalty() -> f64 {
    15.0
}

const fn default_target_error_cap() -> f64 {
    40.0
}

const fn default_correction_bonus() -> f64 {
    20.0
}

const fn default_ignored_critical_penalty() -> f64 {
    30.0
}

const fn default_beginner_bonus() -> f64 {
    10.0
}

const fn default_beginner_safety_threshold() -> f64 {
    70.0
}

const fn default_advanced_penalty() -> f64 {
    10.0
}

const fn default_advanced_safety_threshold() -> f64 {
    90.0
}

const fn default_safety_weight() -> f64 {
    0.4
}

const fn default_efficiency_weight() -> f64 {
    0.3
}

const fn default_knowledge_weight() -> f64 {
    0.3
}
