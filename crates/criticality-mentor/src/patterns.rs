//! Behavioral pattern analysis over recent action history.
//!
//! The mentor looks at a fixed-size window of the most recent actions to
//! spot control habits the instantaneous state cannot show: oscillatory
//! rod movement and the pacing signatures used for style-specific
//! feedback.

use criticality_types::{ActionKind, ActionRecord};

/// Guard against a zero time span when actions land on the same step.
const MIN_SPAN_SECONDS: f64 = 1e-9;

/// The most recent `window` actions, oldest first.
pub fn recent_window(actions: &[ActionRecord], window: usize) -> &[ActionRecord] {
    let start = actions.len().saturating_sub(window);
    actions.get(start..).unwrap_or_default()
}

/// Count rod-position actions inside the window.
pub fn rod_action_count(actions: &[ActionRecord], window: usize) -> usize {
    recent_window(actions, window)
        .iter()
        .filter(|record| record.kind == ActionKind::ControlRod)
        .count()
}

/// Detect rapid oscillatory rod movement.
///
/// Requires at least `min_rod_actions` rod actions inside the window
/// (otherwise there is no movement to rate and the check is skipped).
/// The movement rate is the total absolute position change across
/// consecutive rod actions divided by the time they spanned; a rate
/// above `rate_threshold` (percent per second) counts as oscillation.
pub fn rod_oscillation(
    actions: &[ActionRecord],
    window: usize,
    min_rod_actions: usize,
    rate_threshold: f64,
) -> bool {
    let rod_actions: Vec<&ActionRecord> = recent_window(actions, window)
        .iter()
        .filter(|record| record.kind == ActionKind::ControlRod)
        .collect();

    if rod_actions.len() < min_rod_actions.max(2) {
        return false;
    }

    let mut total_change = 0.0;
    for pair in rod_actions.windows(2) {
        if let [previous, current] = pair {
            total_change += (current.value - previous.value).abs();
        }
    }

    let span = match (rod_actions.first(), rod_actions.last()) {
        (Some(first), Some(last)) => {
            (last.simulation_time - first.simulation_time).max(MIN_SPAN_SECONDS)
        }
        _ => return false,
    };

    total_change / span > rate_threshold
}
