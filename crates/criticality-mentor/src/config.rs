//! Tunables for the mentor's rule thresholds and pacing.
//!
//! Thresholds expressed as fractions apply against the limits configured
//! on the state being evaluated, so a plant with custom limits gets
//! proportionate feedback without a parallel mentor configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the mentor feedback engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorConfig {
    /// Temperature fraction of its limit that triggers the temperature
    /// rule (default: 0.85).
    #[serde(default = "default_temp_warning_fraction")]
    pub temp_warning_fraction: f64,

    /// Power fraction of its limit that triggers the power rule
    /// (default: 0.9).
    #[serde(default = "default_power_warning_fraction")]
    pub power_warning_fraction: f64,

    /// Coolant flow (percent) below which the coolant rule triggers
    /// (default: 30).
    #[serde(default = "default_coolant_low_pct")]
    pub coolant_low_pct: f64,

    /// Power (MW) above which the power/coolant balance check applies
    /// (default: 70).
    #[serde(default = "default_balance_power_threshold")]
    pub balance_power_threshold: f64,

    /// Expected coolant flow per unit power for the balance check
    /// (default: 1.0 -- flow percent should at least match power MW).
    #[serde(default = "default_balance_expected_ratio")]
    pub balance_expected_ratio: f64,

    /// Suggested corrective flow per unit power when the balance check
    /// fires (default: 1.2).
    #[serde(default = "default_balance_suggested_ratio")]
    pub balance_suggested_ratio: f64,

    /// How many recent actions the pattern analysis inspects (default: 5).
    #[serde(default = "default_action_window")]
    pub action_window: usize,

    /// Minimum rod actions inside the window before oscillation detection
    /// applies (default: 2).
    #[serde(default = "default_oscillation_min_rod_actions")]
    pub oscillation_min_rod_actions: usize,

    /// Average rod movement rate (percent per second) above which the
    /// oscillation caution fires (default: 20).
    #[serde(default = "default_oscillation_rate_threshold")]
    pub oscillation_rate_threshold: f64,

    /// Rod actions inside the window that mark a rapid-experimental
    /// student as over-hasty (default: 3).
    #[serde(default = "default_rapid_style_rod_actions")]
    pub rapid_style_rod_actions: usize,

    /// Total actions below which a deliberate-calculative student gets an
    /// encouragement nudge (default: 2).
    #[serde(default = "default_deliberate_style_max_actions")]
    pub deliberate_style_max_actions: usize,

    /// Power (MW) below which the startup weakness item applies
    /// (default: 30).
    #[serde(default = "default_startup_focus_power")]
    pub startup_focus_power: f64,

    /// Center of the transient power band (MW, default: 50).
    #[serde(default = "default_transient_band_center")]
    pub transient_band_center: f64,

    /// Half-width of the transient power band (MW, default: 20).
    #[serde(default = "default_transient_band_halfwidth")]
    pub transient_band_halfwidth: f64,

    /// Probability of a praise item when everything is in the optimal
    /// band (default: 0.3). Pacing choice: praise on every poll would
    /// drown the signal.
    #[serde(default = "default_praise_probability")]
    pub praise_probability: f64,

    /// Probability of a theory tip per evaluation (default: 0.3).
    #[serde(default = "default_theory_tip_probability")]
    pub theory_tip_probability: f64,

    /// Optimal-band lower power bound (MW, default: 10).
    #[serde(default = "default_optimal_power_min")]
    pub optimal_power_min: f64,

    /// Optimal-band upper power bound (MW, default: 85).
    #[serde(default = "default_optimal_power_max")]
    pub optimal_power_max: f64,

    /// Optimal-band temperature ceiling as a fraction of the limit
    /// (default: 0.8).
    #[serde(default = "default_optimal_temp_fraction")]
    pub optimal_temp_fraction: f64,

    /// Optimal-band minimum coolant flow (percent, default: 50).
    #[serde(default = "default_optimal_coolant_min")]
    pub optimal_coolant_min: f64,

    /// Maximum feedback items returned per evaluation (default: 5).
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            temp_warning_fraction: default_temp_warning_fraction(),
            power_warning_fraction: default_power_warning_fraction(),
            coolant_low_pct: default_coolant_low_pct(),
            balance_power_threshold: default_balance_power_threshold(),
            balance_expected_ratio: default_balance_expected_ratio(),
            balance_suggested_ratio: default_balance_suggested_ratio(),
            action_window: default_action_window(),
            oscillation_min_rod_actions: default_oscillation_min_rod_actions(),
            oscillation_rate_threshold: default_oscillation_rate_threshold(),
            rapid_style_rod_actions: default_rapid_style_rod_actions(),
            deliberate_style_max_actions: default_deliberate_style_max_actions(),
            startup_focus_power: default_startup_focus_power(),
            transient_band_center: default_transient_band_center(),
            transient_band_halfwidth: default_transient_band_halfwidth(),
            praise_probability: default_praise_probability(),
            theory_tip_probability: default_theory_tip_probability(),
            optimal_power_min: default_optimal_power_min(),
            optimal_power_max: default_optimal_power_max(),
            optimal_temp_fraction: default_optimal_temp_fraction(),
            optimal_coolant_min: default_optimal_coolant_min(),
            max_items: default_max_items(),
        }
    }
}

const fn default_temp_warning_fraction() -> f64 {
    0.85
}

const fn default_power_warning_fraction() -> f64 {
    0.9
}

const fn default_coolant_low_pct() -> f64 {
    30.0
}

const fn default_balance_power_threshold() -> f64 {
    70.0
}

const fn default_balance_expected_ratio() -> f64 {
    1.0
}

const fn default_balance_suggested_ratio() -> f64 {
    1.2
}

const fn default_action_window() -> usize {
    5
}

const fn default_oscillation_min_rod_actions() -> usize {
    2
}

const fn default_oscillation_rate_threshold() -> f64 {
    20.0
}

const fn default_rapid_style_rod_actions() -> usize {
    3
}

const fn default_deliberate_style_max_actions() -> usize {
    2
}

const fn default_startup_focus_power() -> f64 {
    30.0
}

const fn default_transient_band_center() -> f64 {
    50.0
}

const fn default_transient_band_halfwidth() -> f64 {
    20.0
}

const fn default_praise_probability() -> f64 {
    0.3
}

const fn default_theory_tip_probability() -> f64 {
    0.3
}

const fn default_optimal_power_min() -> f64 {
    10.0
}

const fn default_optimal_power_max() -> f64 {
    85.0
}

const fn default_optimal_temp_fraction() -> f64 {
    0.8
}

const fn default_optimal_coolant_min() -> f64 {
    50.0
}

const fn default_max_items() -> usize {
    5
}
