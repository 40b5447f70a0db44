//! Control input application.
//!
//! Applying an action mutates the state directly and returns the value as
//! applied. Out-of-range rod and coolant settings are clamped rather than
//! rejected -- clamping is the specified policy for control inputs. The
//! power-demand setpoint is a simplified autopilot that nudges the rod
//! bank toward the target output band rather than solving for it.

use criticality_types::{ActionKind, ReactorState};

use crate::config::clamp;

/// Rod step size used by the power-demand autopilot (percent).
const DEMAND_ROD_STEP: f64 = 5.0;

/// Fractional dead band around the power-demand target.
const DEMAND_DEAD_BAND: f64 = 0.05;

/// Apply one control action to the state. Returns the applied value.
pub fn apply(state: &mut ReactorState, kind: ActionKind, value: f64) -> f64 {
    match kind {
        ActionKind::ControlRod => {
            state.control_rod_position = value.clamp(clamp::ROD_MIN, clamp::ROD_MAX);
            state.control_rod_position
        }
        ActionKind::CoolantFlow => {
            state.coolant_flow_rate = value.clamp(clamp::COOLANT_MIN, clamp::COOLANT_MAX);
            state.coolant_flow_rate
        }
        ActionKind::Scram => {
            state.scram_status = true;
            state.control_rod_position = 0.0;
            value
        }
        ActionKind::ResetScram => {
            state.scram_status = false;
            value
        }
        ActionKind::PowerDemand => {
            let target = value.max(0.0);
            if state.power_level < target * (1.0 - DEMAND_DEAD_BAND) {
                state.control_rod_position =
                    (state.control_rod_position + DEMAND_ROD_STEP).min(clamp::ROD_MAX);
            } else if state.power_level > target * (1.0 + DEMAND_DEAD_BAND) {
                state.control_rod_position =
                    (state.control_rod_position - DEMAND_ROD_STEP).max(clamp::ROD_MIN);
            }
            target
        }
    }
}
