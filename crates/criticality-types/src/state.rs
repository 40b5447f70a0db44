//! The reactor digital-twin state record.
//!
//! [`ReactorState`] is a fixed-shape snapshot of one simulated reactor's
//! physical and safety condition. It is owned exclusively by its session:
//! only that session's stepping logic and action application mutate it,
//! and every caller-visible copy is a clone taken under the session lock.
//!
//! Physical quantities are plain `f64` in engineering units. No upper
//! clamping is applied to temperature or pressure -- exceeding a limit is
//! exactly the data the safety evaluation inspects.

use serde::{Deserialize, Serialize};

use crate::enums::EmergencyLevel;

// ---------------------------------------------------------------------------
// Safety systems
// ---------------------------------------------------------------------------

/// Availability flags for the auxiliary safety systems.
///
/// The core tracks availability only; engaging these systems is outside
/// the simplified model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySystems {
    /// Emergency core cooling available.
    pub emergency_cooling: bool,
    /// Pressure relief valves available.
    pub pressure_relief: bool,
    /// Backup diesel power available.
    pub backup_power: bool,
    /// Radiation monitoring instrumentation online.
    pub radiation_monitoring: bool,
}

impl Default for SafetySystems {
    fn default() -> Self {
        Self {
            emergency_cooling: true,
            pressure_relief: true,
            backup_power: true,
            radiation_monitoring: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Operational limits
// ---------------------------------------------------------------------------

/// Configured hard limits the safety evaluation checks against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationalLimits {
    /// Maximum licensed power output (MW).
    pub power: f64,
    /// Core temperature hard limit (deg C).
    pub temperature: f64,
    /// Primary loop pressure hard limit (bar).
    pub pressure: f64,
}

impl Default for OperationalLimits {
    fn default() -> Self {
        Self {
            power: 100.0,
            temperature: 350.0,
            pressure: 170.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Reactor state
// ---------------------------------------------------------------------------

/// Instantaneous state of one simulated reactor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorState {
    // --- Core parameters ---
    /// Thermal power output (MW).
    pub power_level: f64,
    /// Average core temperature (deg C).
    pub temperature: f64,
    /// Primary loop pressure (bar).
    pub pressure: f64,
    /// Neutron flux (n/cm^2/s).
    pub neutron_flux: f64,

    // --- Control systems ---
    /// Control rod withdrawal (percent, 0 = fully inserted, 100 = fully out).
    pub control_rod_position: f64,
    /// Coolant flow rate (percent of nominal, 0--150).
    pub coolant_flow_rate: f64,
    /// Coolant temperature entering the core (deg C).
    pub coolant_temperature_in: f64,
    /// Coolant temperature leaving the core (deg C).
    pub coolant_temperature_out: f64,

    // --- Safety systems ---
    /// Emergency shutdown flag. Set manually (SCRAM action) or
    /// automatically when a hard limit is exceeded.
    pub scram_status: bool,
    /// Auxiliary safety-system availability.
    pub safety_systems: SafetySystems,

    // --- Operational limits ---
    /// Hard limits the safety evaluation checks against.
    pub limits: OperationalLimits,

    // --- Status flags ---
    /// Whether the chain reaction is self-sustaining.
    pub is_critical: bool,
    /// Whether the plant is operating steadily away from its limits.
    pub is_stable: bool,
    /// Severity classification recomputed every step.
    pub emergency_level: EmergencyLevel,

    // --- Simulation time ---
    /// Elapsed simulation time (seconds). Monotonically increasing.
    pub simulation_time: f64,
}

impl Default for ReactorState {
    fn default() -> Self {
        Self {
            power_level: 20.0,
            temperature: 280.0,
            pressure: 150.0,
            neutron_flux: 2.0e12,
            control_rod_position: 70.0,
            coolant_flow_rate: 100.0,
            coolant_temperature_in: 265.0,
            coolant_temperature_out: 285.0,
            scram_status: false,
            safety_systems: SafetySystems::default(),
            limits: OperationalLimits::default(),
            is_critical: true,
            is_stable: true,
            emergency_level: EmergencyLevel::Normal,
            simulation_time: 0.0,
        }
    }
}

impl ReactorState {
    /// Whether every physical quantity is a finite number.
    ///
    /// A state that fails this check cannot be stepped meaningfully; the
    /// physics engine forces a deterministic trip instead of propagating
    /// NaN or infinity through the update equations.
    pub fn is_well_formed(&self) -> bool {
        self.power_level.is_finite()
            && self.temperature.is_finite()
            && self.pressure.is_finite()
            && self.neutron_flux.is_finite()
            && self.control_rod_position.is_finite()
            && self.coolant_flow_rate.is_finite()
            && self.coolant_temperature_in.is_finite()
            && self.coolant_temperature_out.is_finite()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_well_formed() {
        let state = ReactorState::default();
        assert!(state.is_well_formed());
        assert!(state.is_critical);
        assert!(!state.scram_status);
        assert_eq!(state.emergency_level, EmergencyLevel::Normal);
        assert_eq!(state.simulation_time, 0.0);
    }

    #[test]
    fn nan_state_is_malformed() {
        let state = ReactorState {
            temperature: f64::NAN,
            ..ReactorState::default()
        };
        assert!(!state.is_well_formed());
    }

    #[test]
    fn infinite_flux_is_malformed() {
        let state = ReactorState {
            neutron_flux: f64::INFINITY,
            ..ReactorState::default()
        };
        assert!(!state.is_well_formed());
    }

    #[test]
    fn state_serializes_round_trip() {
        let state = ReactorState::default();
        let json = serde_json::to_string(&state).unwrap();
        let back: ReactorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
