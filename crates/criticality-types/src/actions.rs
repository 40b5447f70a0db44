//! Operator action records.
//!
//! Every applied control input is recorded as an immutable [`ActionRecord`]
//! in the owning session's append-only action history, ordered by
//! simulation time. The record captures the state as it was immediately
//! before the action took effect, which is what the mentor's pattern
//! analysis and the scoring engine's corrective-action check consume.

use serde::{Deserialize, Serialize};

use crate::enums::ActionKind;
use crate::state::ReactorState;

/// One applied control action, recorded at the moment it took effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Simulation time at which the action was applied (seconds).
    pub simulation_time: f64,
    /// Which control was exercised.
    pub kind: ActionKind,
    /// The value as applied, after clamping. For [`ActionKind::Scram`] and
    /// [`ActionKind::ResetScram`] this carries the raw caller value and has
    /// no physical meaning.
    pub value: f64,
    /// Snapshot of the reactor state immediately before the action.
    pub state_before: Box<ReactorState>,
}
