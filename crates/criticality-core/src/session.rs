//! One training session: a reactor state, its histories, and the
//! background stepping task that drives it.
//!
//! # Concurrency contract
//!
//! The stepping task and caller-driven writes (action application)
//! mutate the same state and are serialized by the session's write lock.
//! The unit of atomicity is one physics step or one action application,
//! never a sub-field write: readers always observe a fully-formed state.
//! Reads (state polls, safety status) share the read lock and proceed
//! concurrently with each other.
//!
//! # Stop protocol
//!
//! Stopping sets an atomic flag and notifies the task, then joins it
//! under a bounded timeout. The flag alone would leave a race between
//! "flag observed false" and "step already in flight" -- the join is
//! what guarantees no step executes after `stop` returns. A task that
//! somehow overruns the bound is aborted; abort points exist only
//! between steps (a step is synchronous under the write lock), so even
//! that path cannot tear a state in half.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use criticality_mentor::Mentor;
use criticality_physics::engine;
use criticality_physics::{PhysicsConfig, control};
use criticality_types::{
    ActionKind, ActionRecord, EmergencyLevel, FeedbackItem, FeedbackKind, FeedbackRecord,
    LearningProfile, ReactorState, SafetySystems, ScenarioKind, SessionId, Trajectory,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Safety status bundle
// ---------------------------------------------------------------------------

/// One monitored parameter against its configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterStatus {
    /// Current value.
    pub current: f64,
    /// Configured hard limit.
    pub limit: f64,
}

/// The safety display bundle returned by a status poll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyStatus {
    /// Severity classification from the latest evaluation.
    pub emergency_level: EmergencyLevel,
    /// Whether the trip flag is set.
    pub scram_active: bool,
    /// Whether the chain reaction is self-sustaining.
    pub is_critical: bool,
    /// Whether the plant is operating steadily away from its limits.
    pub is_stable: bool,
    /// Power against its limit.
    pub power: ParameterStatus,
    /// Temperature against its limit.
    pub temperature: ParameterStatus,
    /// Pressure against its limit.
    pub pressure: ParameterStatus,
    /// Auxiliary safety-system availability.
    pub safety_systems: SafetySystems,
}

// ---------------------------------------------------------------------------
// Session internals
// ---------------------------------------------------------------------------

/// State and histories, guarded by the session lock.
#[derive(Debug)]
struct SessionInner {
    /// The live reactor state.
    state: ReactorState,
    /// Per-step state snapshots, oldest first. Seeded with the initial
    /// state so trajectories include the starting point.
    state_history: Vec<ReactorState>,
    /// Applied actions, append-only, ordered by simulation time.
    action_history: Vec<ActionRecord>,
    /// Critical/warning feedback delivered to the student.
    feedback_log: Vec<FeedbackRecord>,
}

/// Stop signal shared with the stepping task.
#[derive(Debug)]
struct StepControl {
    /// Set once when the session is being stopped.
    stop: AtomicBool,
    /// Wakes the task out of its tick wait so stop is prompt.
    notify: Notify,
}

/// One active training session.
///
/// Owns exactly one [`ReactorState`], its append-only histories, and the
/// background task stepping the physics at the configured cadence.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    scenario: ScenarioKind,
    target_power: Option<f64>,
    started_at: DateTime<Utc>,
    inner: Arc<RwLock<SessionInner>>,
    control: Arc<StepControl>,
    handle: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl Session {
    /// Create a session around an initial state and start its stepping
    /// task. Must be called from within a tokio runtime.
    pub fn spawn(
        id: SessionId,
        scenario: ScenarioKind,
        target_power: Option<f64>,
        initial_state: ReactorState,
        physics: PhysicsConfig,
        step_period: Duration,
    ) -> Self {
        let inner = Arc::new(RwLock::new(SessionInner {
            state_history: vec![initial_state.clone()],
            state: initial_state,
            action_history: Vec::new(),
            feedback_log: Vec::new(),
        }));
        let control = Arc::new(StepControl {
            stop: AtomicBool::new(false),
            notify: Notify::new(),
        });

        let task_inner = Arc::clone(&inner);
        let task_control = Arc::clone(&control);
        let handle = tokio::spawn(async move {
            step_loop(task_inner, task_control, physics, step_period).await;
        });

        info!(session_id = %id, scenario = %scenario, "session stepping started");

        Self {
            id,
            scenario,
            target_power,
            started_at: Utc::now(),
            inner,
            control,
            handle: std::sync::Mutex::new(Some(handle)),
        }
    }

    /// The session's identifier.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// The scenario category the session was created from.
    pub const fn scenario(&self) -> ScenarioKind {
        self.scenario
    }

    /// Wall-clock time the session was created.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether the stepping task is still running.
    pub fn is_running(&self) -> bool {
        !self.control.stop.load(Ordering::Acquire)
    }

    /// Snapshot of the current state.
    pub async fn current_state(&self) -> ReactorState {
        self.inner.read().await.state.clone()
    }

    /// The safety display bundle for the current state.
    pub async fn safety_status(&self) -> SafetyStatus {
        let inner = self.inner.read().await;
        let state = &inner.state;
        SafetyStatus {
            emergency_level: state.emergency_level,
            scram_active: state.scram_status,
            is_critical: state.is_critical,
            is_stable: state.is_stable,
            power: ParameterStatus {
                current: state.power_level,
                limit: state.limits.power,
            },
            temperature: ParameterStatus {
                current: state.temperature,
                limit: state.limits.temperature,
            },
            pressure: ParameterStatus {
                current: state.pressure,
                limit: state.limits.pressure,
            },
            safety_systems: state.safety_systems,
        }
    }

    /// Apply one control action and return the updated state.
    ///
    /// The action is recorded (with the pre-action state) before it
    /// mutates anything; record and mutation happen atomically under the
    /// write lock, so no step interleaves with a half-applied action.
    pub async fn apply_action(&self, kind: ActionKind, value: f64) -> ReactorState {
        let mut inner = self.inner.write().await;
        let state_before = Box::new(inner.state.clone());
        let simulation_time = inner.state.simulation_time;

        let applied = control::apply(&mut inner.state, kind, value);
        inner.action_history.push(ActionRecord {
            simulation_time,
            kind,
            value: applied,
            state_before,
        });

        debug!(session_id = %self.id, action = %kind, value = applied, "action applied");
        inner.state.clone()
    }

    /// Evaluate mentor feedback against the current state and recent
    /// actions, recording critical/warning items into the trajectory.
    pub async fn evaluate_feedback<R: Rng>(
        &self,
        mentor: &Mentor,
        profile: Option<&LearningProfile>,
        rng: &mut R,
    ) -> Vec<FeedbackItem> {
        let mut inner = self.inner.write().await;
        let items = mentor.evaluate(&inner.state, &inner.action_history, profile, rng);

        let simulation_time = inner.state.simulation_time;
        for item in &items {
            if matches!(item.kind, FeedbackKind::Critical | FeedbackKind::Warning) {
                inner.feedback_log.push(FeedbackRecord {
                    simulation_time,
                    item: item.clone(),
                });
            }
        }
        items
    }

    /// The most recent `count` actions, oldest first.
    pub async fn recent_actions(&self, count: usize) -> Vec<ActionRecord> {
        let inner = self.inner.read().await;
        let start = inner.action_history.len().saturating_sub(count);
        inner
            .action_history
            .get(start..)
            .unwrap_or_default()
            .to_vec()
    }

    /// Assemble the full trajectory for scoring.
    pub async fn trajectory(&self) -> Trajectory {
        let inner = self.inner.read().await;
        Trajectory {
            scenario: self.scenario,
            states: inner.state_history.clone(),
            actions: inner.action_history.clone(),
            feedback: inner.feedback_log.clone(),
            target_power: self.target_power,
        }
    }

    /// Stop the stepping task, waiting (bounded) for any in-flight step.
    ///
    /// After this returns, no further step executes. Idempotent: a
    /// second call finds no handle and returns immediately.
    pub async fn stop(&self, timeout: Duration) {
        self.control.stop.store(true, Ordering::Release);
        self.control.notify.notify_one();

        let handle = self.handle.lock().ok().and_then(|mut guard| guard.take());
        let Some(mut handle) = handle else {
            return;
        };

        if tokio::time::timeout(timeout, &mut handle).await.is_err() {
            warn!(session_id = %self.id, "stepping task overran stop timeout, aborting");
            handle.abort();
        }
        info!(session_id = %self.id, "session stepping stopped");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // A leaked session must not leave its task running forever.
        self.control.stop.store(true, Ordering::Release);
        if let Ok(mut guard) = self.handle.lock()
            && let Some(handle) = guard.take()
        {
            handle.abort();
        }
    }
}

/// The background stepping loop: one physics step per wall-clock period.
async fn step_loop(
    inner: Arc<RwLock<SessionInner>>,
    control: Arc<StepControl>,
    physics: PhysicsConfig,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    // A loaded host slows the twin down; it never replays missed steps
    // in a burst.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately; consume
    // it so the first step lands one full period after spawn.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if control.stop.load(Ordering::Acquire) {
                    break;
                }
                let mut guard = inner.write().await;
                engine::step(&mut guard.state, &physics);
                let snapshot = guard.state.clone();
                guard.state_history.push(snapshot);
            }
            () = control.notify.notified() => {
                break;
            }
        }
    }
}
