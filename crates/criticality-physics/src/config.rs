//! Physics constants and defaults for the reactor model.
//!
//! The model is a simplified lumped-parameter approximation, not a
//! validated neutronics code. Every tunable lives in [`PhysicsConfig`] so
//! that callers (the session manager, tests) can override defaults, and
//! so the update equations themselves stay free of magic numbers.

use serde::{Deserialize, Serialize};

/// Configuration for the physics engine's update equations.
///
/// Defaults describe a small pressurized-water training plant with a
/// 100 MW licensed power limit. The step stays numerically tame for any
/// in-range control input at the default `time_step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Simulation time advanced per step (seconds, default: 0.1).
    #[serde(default = "default_time_step")]
    pub time_step: f64,

    /// Total reactivity span of the rod bank across its full travel
    /// (default: 0.02). The rod term is linear in the deviation of
    /// withdrawal from [`Self::rod_neutral_pct`].
    #[serde(default = "default_rod_worth")]
    pub rod_worth: f64,

    /// Rod withdrawal percentage contributing zero rod reactivity
    /// (default: 50).
    #[serde(default = "default_rod_neutral_pct")]
    pub rod_neutral_pct: f64,

    /// Temperature reactivity coefficient per deg C (default: -0.0005).
    ///
    /// Negative: rising temperature reduces reactivity. This is the
    /// model's inherent-feedback safety property.
    #[serde(default = "default_temp_coeff")]
    pub temp_coeff: f64,

    /// Temperature at which the feedback term is zero (deg C, default: 300).
    #[serde(default = "default_temp_reference")]
    pub temp_reference: f64,

    /// Effective neutron lifetime (seconds, default: 0.02).
    #[serde(default = "default_neutron_lifetime")]
    pub neutron_lifetime: f64,

    /// Neutron flux corresponding to full nominal power (n/cm^2/s,
    /// default: 1e13).
    #[serde(default = "default_nominal_flux")]
    pub nominal_flux: f64,

    /// Power output at nominal flux (MW, default: 100).
    #[serde(default = "default_nominal_power")]
    pub nominal_power: f64,

    /// Heat generation per unit power (deg C per second per MW at full
    /// time step, default: 0.15).
    #[serde(default = "default_power_to_temp")]
    pub power_to_temp: f64,

    /// Cooling effectiveness of nominal coolant flow (default: 0.3).
    #[serde(default = "default_coolant_effect")]
    pub coolant_effect: f64,

    /// Pressure at reference temperature and power (bar, default: 150).
    #[serde(default = "default_pressure_base")]
    pub pressure_base: f64,

    /// Temperature deviation slope of the pressure correlation
    /// (bar per deg C, default: 0.35).
    #[serde(default = "default_pressure_temp_slope")]
    pub pressure_temp_slope: f64,

    /// Reference power for the pressure correlation (MW, default: 50).
    #[serde(default = "default_pressure_power_ref")]
    pub pressure_power_ref: f64,

    /// Power deviation slope of the pressure correlation
    /// (bar per MW, default: 0.1).
    #[serde(default = "default_pressure_power_slope")]
    pub pressure_power_slope: f64,

    /// Fraction of nominal flux below which the chain reaction is
    /// considered shut down (default: 0.005).
    #[serde(default = "default_criticality_flux_fraction")]
    pub criticality_flux_fraction: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            time_step: default_time_step(),
            rod_worth: default_rod_worth(),
            rod_neutral_pct: default_rod_neutral_pct(),
            temp_coeff: default_temp_coeff(),
            temp_reference: default_temp_reference(),
            neutron_lifetime: default_neutron_lifetime(),
            nominal_flux: default_nominal_flux(),
            nominal_power: default_nominal_power(),
            power_to_temp: default_power_to_temp(),
            coolant_effect: default_coolant_effect(),
            pressure_base: default_pressure_base(),
            pressure_temp_slope: default_pressure_temp_slope(),
            pressure_power_ref: default_pressure_power_ref(),
            pressure_power_slope: default_pressure_power_slope(),
            criticality_flux_fraction: default_criticality_flux_fraction(),
        }
    }
}

const fn default_time_step() -> f64 {
    0.1
}

const fn default_rod_worth() -> f64 {
    0.02
}

const fn default_rod_neutral_pct() -> f64 {
    50.0
}

const fn default_temp_coeff() -> f64 {
    -0.0005
}

const fn default_temp_reference() -> f64 {
    300.0
}

const fn default_neutron_lifetime() -> f64 {
    0.02
}

const fn default_nominal_flux() -> f64 {
    1.0e13
}

const fn default_nominal_power() -> f64 {
    100.0
}

const fn default_power_to_temp() -> f64 {
    0.15
}

const fn default_coolant_effect() -> f64 {
    0.3
}

const fn default_pressure_base() -> f64 {
    150.0
}

const fn default_pressure_temp_slope() -> f64 {
    0.35
}

const fn default_pressure_power_ref() -> f64 {
    50.0
}

const fn default_pressure_power_slope() -> f64 {
    0.1
}

const fn default_criticality_flux_fraction() -> f64 {
    0.005
}

/// Control input clamp ranges.
///
/// Out-of-range control values are clamped at the point an action is
/// applied; clamping is the specified policy, not an error path.
pub mod clamp {
    /// Minimum rod withdrawal (percent).
    pub const ROD_MIN: f64 = 0.0;
    /// Maximum rod withdrawal (percent).
    pub const ROD_MAX: f64 = 100.0;
    /// Minimum coolant flow (percent of nominal).
    pub const COOLANT_MIN: f64 = 0.0;
    /// Maximum coolant flow (percent of nominal).
    pub const COOLANT_MAX: f64 = 150.0;
}
