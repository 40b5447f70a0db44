//! Scenario initial-condition presets and caller overrides.
//!
//! Each scenario category maps to a preset bundle of initial conditions.
//! The preset's neutron flux is derived from its power level so the state
//! is internally coherent from the first step, and safety is evaluated
//! once at construction so the emergency level reflects the starting
//! values rather than defaulting to normal.

use criticality_types::{ReactorState, ScenarioKind};
use serde::{Deserialize, Serialize};

use crate::config::{PhysicsConfig, clamp};
use crate::safety;

/// Optional caller-supplied overrides applied on top of a preset.
///
/// Control positions are clamped to their valid ranges; the optional
/// power target is not part of the physical state and is carried through
/// to scoring by the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    /// Starting power level (MW). Flux is re-derived to match.
    #[serde(default)]
    pub power_level: Option<f64>,
    /// Starting core temperature (deg C).
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Starting pressure (bar).
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Starting rod withdrawal (percent, clamped 0--100).
    #[serde(default)]
    pub control_rod_position: Option<f64>,
    /// Starting coolant flow (percent, clamped 0--150).
    #[serde(default)]
    pub coolant_flow_rate: Option<f64>,
    /// Target power for the scenario (MW), consumed by scoring.
    #[serde(default)]
    pub target_power: Option<f64>,
}

/// Build the initial state for a scenario category.
pub fn initial_state(kind: ScenarioKind, config: &PhysicsConfig) -> ReactorState {
    let mut state = ReactorState::default();

    match kind {
        ScenarioKind::Startup => {
            state.power_level = 1.0;
            state.temperature = 100.0;
            state.control_rod_position = 30.0;
            state.coolant_flow_rate = 50.0;
        }
        ScenarioKind::Transient => {
            state.power_level = 50.0;
            state.temperature = 300.0;
            state.control_rod_position = 60.0;
            state.coolant_flow_rate = 80.0;
        }
        ScenarioKind::Emergency => {
            state.power_level = 80.0;
            state.temperature = 320.0;
            state.control_rod_position = 40.0;
            state.coolant_flow_rate = 60.0;
            state.pressure = 165.0;
        }
    }

    state.neutron_flux = flux_for_power(state.power_level, config);
    safety::evaluate(&mut state, config);
    state
}

/// Build the initial state for a scenario with caller overrides applied.
pub fn initial_state_with_overrides(
    kind: ScenarioKind,
    overrides: &ScenarioOverrides,
    config: &PhysicsConfig,
) -> ReactorState {
    let mut state = initial_state(kind, config);

    if let Some(power) = overrides.power_level {
        state.power_level = power.max(0.0);
        state.neutron_flux = flux_for_power(state.power_level, config);
    }
    if let Some(temperature) = overrides.temperature {
        state.temperature = temperature.max(0.0);
    }
    if let Some(pressure) = overrides.pressure {
        state.pressure = pressure.max(0.0);
    }
    if let Some(rods) = overrides.control_rod_position {
        state.control_rod_position = rods.clamp(clamp::ROD_MIN, clamp::ROD_MAX);
    }
    if let Some(flow) = overrides.coolant_flow_rate {
        state.coolant_flow_rate = flow.clamp(clamp::COOLANT_MIN, clamp::COOLANT_MAX);
    }

    safety::evaluate(&mut state, config);
    state
}

/// Neutron flux consistent with a given power level.
fn flux_for_power(power: f64, config: &PhysicsConfig) -> f64 {
    power / config.nominal_power * config.nominal_flux
}
