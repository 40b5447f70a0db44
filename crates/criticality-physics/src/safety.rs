//! Safety-limit evaluation and automatic trip logic.
//!
//! The emergency level is recomputed from scratch on every evaluation --
//! it reflects instantaneous risk against the configured limits, not a
//! trend. Severity bands, in ascending order:
//!
//! - power above 90% of its limit: at least level 1
//! - temperature above 85% of its limit: at least level 2
//! - pressure above 90% of its limit: at least level 2
//! - temperature or pressure above 95% of its limit: level 3
//! - temperature or pressure beyond the hard limit: level 4 and
//!   automatic SCRAM (rods driven fully in, trip flag latched)
//!
//! While the trip flag is set, rods are held fully inserted on every
//! evaluation. The latch releases only through an explicit trip reset.

use criticality_types::{EmergencyLevel, ReactorState};
use tracing::warn;

use crate::config::PhysicsConfig;

/// Fraction of a limit that counts as "approaching" it.
const APPROACH_FRACTION: f64 = 0.9;

/// Fraction of the temperature limit that raises an elevated alert.
const TEMP_ELEVATED_FRACTION: f64 = 0.85;

/// Fraction of a limit that counts as severe.
const SEVERE_FRACTION: f64 = 0.95;

/// Recompute the emergency level and trip state from current values.
///
/// Also derives the `is_critical` (chain reaction self-sustaining) and
/// `is_stable` (away from limits, not tripped) status flags.
pub fn evaluate(state: &mut ReactorState, config: &PhysicsConfig) {
    let mut level = EmergencyLevel::Normal;

    if state.power_level > state.limits.power * APPROACH_FRACTION {
        level = level.max(EmergencyLevel::Caution);
    }
    if state.temperature > state.limits.temperature * TEMP_ELEVATED_FRACTION {
        level = level.max(EmergencyLevel::Elevated);
    }
    if state.pressure > state.limits.pressure * APPROACH_FRACTION {
        level = level.max(EmergencyLevel::Elevated);
    }

    if state.temperature > state.limits.temperature * SEVERE_FRACTION
        || state.pressure > state.limits.pressure * SEVERE_FRACTION
    {
        level = level.max(EmergencyLevel::Severe);
    }

    if state.temperature > state.limits.temperature || state.pressure > state.limits.pressure {
        level = EmergencyLevel::Critical;
        if !state.scram_status {
            warn!(
                temperature = state.temperature,
                pressure = state.pressure,
                simulation_time = state.simulation_time,
                "hard limit exceeded, automatic SCRAM"
            );
        }
        state.scram_status = true;
    }

    // Trip latch: rods stay fully inserted while the trip flag is set,
    // whether the trip was automatic or a manual SCRAM.
    if state.scram_status {
        state.control_rod_position = 0.0;
    }

    state.emergency_level = level;
    state.is_critical =
        state.neutron_flux > config.nominal_flux * config.criticality_flux_fraction;
    state.is_stable = level <= EmergencyLevel::Caution && !state.scram_status;
}

/// Force a deterministic trip on a state that cannot be evaluated.
///
/// Non-finite physical quantities are zeroed so downstream consumers see
/// a well-formed (if fully shut down) record. Used when a step encounters
/// a malformed state: the safety outcome must stay available even when
/// the physics cannot run.
pub fn force_trip(state: &mut ReactorState) {
    for value in [
        &mut state.power_level,
        &mut state.temperature,
        &mut state.pressure,
        &mut state.neutron_flux,
        &mut state.coolant_flow_rate,
        &mut state.coolant_temperature_in,
        &mut state.coolant_temperature_out,
    ] {
        if !value.is_finite() {
            *value = 0.0;
        }
    }
    state.control_rod_position = 0.0;
    state.scram_status = true;
    state.emergency_level = EmergencyLevel::Critical;
    state.is_critical = false;
    state.is_stable = false;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn state() -> ReactorState {
        ReactorState::default()
    }

    #[test]
    fn nominal_state_is_normal() {
        let mut s = state();
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.emergency_level, EmergencyLevel::Normal);
        assert!(s.is_stable);
        assert!(!s.scram_status);
    }

    #[test]
    fn power_above_ninety_percent_is_caution() {
        let mut s = state();
        s.power_level = 95.0;
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.emergency_level, EmergencyLevel::Caution);
    }

    #[test]
    fn elevated_temperature_is_level_two() {
        let mut s = state();
        s.temperature = 300.0; // 85.7% of 350
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.emergency_level, EmergencyLevel::Elevated);
    }

    #[test]
    fn severe_temperature_is_level_three() {
        let mut s = state();
        s.temperature = 340.0; // 97% of 350
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.emergency_level, EmergencyLevel::Severe);
        assert!(!s.scram_status);
    }

    #[test]
    fn hard_limit_breach_trips_and_inserts_rods() {
        let mut s = state();
        s.temperature = 351.0;
        s.control_rod_position = 70.0;
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.emergency_level, EmergencyLevel::Critical);
        assert!(s.scram_status);
        assert_eq!(s.control_rod_position, 0.0);
        assert!(!s.is_stable);
    }

    #[test]
    fn pressure_breach_also_trips() {
        let mut s = state();
        s.pressure = 171.0;
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.emergency_level, EmergencyLevel::Critical);
        assert!(s.scram_status);
    }

    #[test]
    fn trip_latch_holds_rods_in() {
        let mut s = state();
        s.scram_status = true;
        s.control_rod_position = 40.0;
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.control_rod_position, 0.0);
    }

    #[test]
    fn level_reflects_instantaneous_values_not_history() {
        let mut s = state();
        s.temperature = 351.0;
        evaluate(&mut s, &PhysicsConfig::default());
        assert_eq!(s.emergency_level, EmergencyLevel::Critical);

        // Cooling back down drops the level, though the trip stays latched.
        s.temperature = 280.0;
        s.pressure = 155.0;
        evaluate(&mut s, &PhysicsConfig::default());
        assert!(s.emergency_level < EmergencyLevel::Critical);
        assert!(s.scram_status);
    }

    #[test]
    fn force_trip_sanitizes_non_finite_values() {
        let mut s = state();
        s.temperature = f64::NAN;
        s.neutron_flux = f64::INFINITY;
        force_trip(&mut s);
        assert!(s.is_well_formed());
        assert_eq!(s.temperature, 0.0);
        assert_eq!(s.neutron_flux, 0.0);
        assert!(s.scram_status);
        assert_eq!(s.emergency_level, EmergencyLevel::Critical);
    }
}
