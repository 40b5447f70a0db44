//! The forward-Euler state update.
//!
//! One call to [`step`] advances a [`ReactorState`] by exactly one
//! configured time step:
//!
//! 1. Reactivity from rod position (linear in deviation from the neutral
//!    point) plus temperature feedback (negative coefficient).
//! 2. Neutron flux scaled by `1 + reactivity * dt / neutron_lifetime`
//!    (simplified point kinetics); power derived proportionally.
//! 3. Temperature integrates heat generation minus cooling, where cooling
//!    scales with the flow fraction and the margin over coolant inlet
//!    temperature.
//! 4. Coolant outlet temperature from heat transfer at the current flow.
//! 5. Pressure from a linear correlation in temperature and power
//!    deviation (simplified equation of state, not a mass/energy balance).
//! 6. Safety re-evaluation and simulation-time advance.
//!
//! Temperature and pressure are deliberately not clamped from above --
//! exceeding a limit is the very signal the safety evaluation consumes.
//! All quantities are floored at zero: a lumped model this coarse can
//! otherwise overshoot into negative flux or temperature at extreme
//! control inputs, and negative physical quantities are meaningless.
//!
//! Stepping never fails. A malformed (non-finite) state produces a
//! deterministic forced trip instead of propagating NaN: availability of
//! the safety outcome is itself a safety property.

use criticality_types::ReactorState;

use crate::config::PhysicsConfig;
use crate::safety;

/// Advance the state by one time step and re-evaluate safety.
pub fn step(state: &mut ReactorState, config: &PhysicsConfig) {
    let dt = config.time_step;

    if !state.is_well_formed() {
        safety::force_trip(state);
        state.simulation_time += dt;
        return;
    }

    // 1. Reactivity: rod bank position plus temperature feedback.
    let rod_reactivity =
        (state.control_rod_position - config.rod_neutral_pct) / 100.0 * config.rod_worth;
    let temp_reactivity = (state.temperature - config.temp_reference) * config.temp_coeff;
    let reactivity = rod_reactivity + temp_reactivity;

    // 2. Point kinetics: flux responds on the neutron-lifetime scale.
    state.neutron_flux *= 1.0 + reactivity * dt / config.neutron_lifetime;
    state.neutron_flux = state.neutron_flux.max(0.0);

    // Power is proportional to flux.
    state.power_level =
        (state.neutron_flux / config.nominal_flux * config.nominal_power).max(0.0);

    // 3. Thermal balance: generation against coolant removal.
    let heat_generation = state.power_level * config.power_to_temp;
    let flow_fraction = state.coolant_flow_rate / 100.0;
    let cooling =
        flow_fraction * config.coolant_effect * (state.temperature - state.coolant_temperature_in);

    state.temperature += (heat_generation - cooling) * dt;
    state.temperature = state.temperature.max(0.0);

    // 4. Outlet temperature rises with the heat carried off per unit flow.
    // The 0.1 offset keeps the transfer finite as flow approaches zero.
    if state.coolant_flow_rate > 0.0 {
        let heat_transfer = heat_generation / (flow_fraction + 0.1);
        state.coolant_temperature_out = state.coolant_temperature_in + heat_transfer;
    }

    // 5. Pressure correlation.
    state.pressure = (config.pressure_base
        + (state.temperature - config.temp_reference) * config.pressure_temp_slope
        + (state.power_level - config.pressure_power_ref) * config.pressure_power_slope)
        .max(0.0);

    // 6. Safety evaluation and time advance.
    safety::evaluate(state, config);
    state.simulation_time += dt;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use criticality_types::EmergencyLevel;

    use super::*;

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    /// A state in rough thermal equilibrium at mid power.
    fn balanced_state() -> ReactorState {
        let cfg = config();
        ReactorState {
            power_level: 50.0,
            neutron_flux: 50.0 / cfg.nominal_power * cfg.nominal_flux,
            temperature: 300.0,
            control_rod_position: 50.0,
            coolant_flow_rate: 80.0,
            ..ReactorState::default()
        }
    }

    #[test]
    fn step_advances_simulation_time() {
        let cfg = config();
        let mut s = balanced_state();
        step(&mut s, &cfg);
        assert_eq!(s.simulation_time, cfg.time_step);
        step(&mut s, &cfg);
        assert!((s.simulation_time - 2.0 * cfg.time_step).abs() < 1e-12);
    }

    #[test]
    fn neutral_rods_at_reference_temperature_hold_power() {
        let cfg = config();
        let mut s = balanced_state();
        let before = s.power_level;
        step(&mut s, &cfg);
        // Zero reactivity: flux (and so power) unchanged.
        assert!((s.power_level - before).abs() < 1e-9);
    }

    #[test]
    fn withdrawn_rods_raise_power() {
        let cfg = config();
        let mut s = balanced_state();
        s.control_rod_position = 60.0;
        let before = s.power_level;
        step(&mut s, &cfg);
        assert!(s.power_level > before);
    }

    #[test]
    fn inserted_rods_lower_power() {
        let cfg = config();
        let mut s = balanced_state();
        s.control_rod_position = 30.0;
        let before = s.power_level;
        step(&mut s, &cfg);
        assert!(s.power_level < before);
    }

    #[test]
    fn temperature_feedback_is_negative() {
        let cfg = config();
        let mut hot = balanced_state();
        hot.temperature = 320.0;
        let mut cold = balanced_state();
        cold.temperature = 300.0;
        step(&mut hot, &cfg);
        step(&mut cold, &cfg);
        // Same rods, hotter core: less reactivity, lower resulting power.
        assert!(hot.power_level < cold.power_level);
    }

    #[test]
    fn no_negative_quantities_across_control_range() {
        let cfg = config();
        for rods in [0.0, 25.0, 50.0, 75.0, 100.0] {
            for coolant in [0.0, 50.0, 100.0, 150.0] {
                let mut s = balanced_state();
                s.control_rod_position = rods;
                s.coolant_flow_rate = coolant;
                for _ in 0..50 {
                    step(&mut s, &cfg);
                    assert!(s.temperature >= 0.0);
                    assert!(s.pressure >= 0.0);
                    assert!(s.neutron_flux >= 0.0);
                    assert!(s.power_level >= 0.0);
                }
            }
        }
    }

    #[test]
    fn hard_limit_breach_trips_on_next_step() {
        let cfg = config();
        let mut s = balanced_state();
        s.temperature = 400.0;
        step(&mut s, &cfg);
        assert_eq!(s.emergency_level, EmergencyLevel::Critical);
        assert!(s.scram_status);
        assert_eq!(s.control_rod_position, 0.0);
    }

    #[test]
    fn trip_is_idempotent_across_steps() {
        let cfg = config();
        let mut s = balanced_state();
        s.temperature = 400.0;
        step(&mut s, &cfg);
        assert!(s.scram_status);
        for _ in 0..10 {
            step(&mut s, &cfg);
            assert!(s.scram_status);
            assert_eq!(s.control_rod_position, 0.0);
        }
    }

    #[test]
    fn tripped_reactor_power_decays() {
        let cfg = config();
        let mut s = balanced_state();
        s.temperature = 400.0;
        step(&mut s, &cfg);
        let after_trip = s.power_level;
        for _ in 0..100 {
            step(&mut s, &cfg);
        }
        assert!(s.power_level < after_trip);
    }

    #[test]
    fn malformed_state_yields_forced_trip_not_nan() {
        let cfg = config();
        let mut s = balanced_state();
        s.neutron_flux = f64::NAN;
        step(&mut s, &cfg);
        assert!(s.is_well_formed());
        assert!(s.scram_status);
        assert_eq!(s.emergency_level, EmergencyLevel::Critical);
        assert_eq!(s.simulation_time, cfg.time_step);
    }

    #[test]
    fn outlet_temperature_tracks_heat_at_flow() {
        let cfg = config();
        let mut s = balanced_state();
        step(&mut s, &cfg);
        assert!(s.coolant_temperature_out > s.coolant_temperature_in);
    }

    #[test]
    fn zero_flow_leaves_outlet_temperature_untouched() {
        let cfg = config();
        let mut s = balanced_state();
        s.coolant_flow_rate = 0.0;
        let before = s.coolant_temperature_out;
        step(&mut s, &cfg);
        assert_eq!(s.coolant_temperature_out, before);
    }
}
