//! The process-wide session registry and external operation surface.
//!
//! A [`SessionManager`] is an owned, injectable instance -- not ambient
//! process state -- so tests and embedders can run several independent
//! managers side by side. The registry map is the one resource shared
//! between arbitrarily many caller tasks and every session's stepping
//! activity; a read/write lock serializes registry mutation against
//! lookups, while per-session state has its own lock inside [`Session`].
//!
//! Teardown ordering: a session's stepping is fully halted (bounded
//! wait) *before* its registry entry is removed, so no step ever writes
//! into a state that no caller can reach any more.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use criticality_mentor::Mentor;
use criticality_physics::{ScenarioOverrides, presets};
use criticality_scoring as scoring;
use criticality_types::{
    ActionKind, ActionRecord, FeedbackItem, LearningProfile, ReactorState, ScenarioKind,
    SessionId, SessionReport,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::SimulatorConfig;
use crate::error::SessionError;
use crate::session::{SafetyStatus, Session};

/// Registry and lifecycle manager for training sessions.
#[derive(Debug)]
pub struct SessionManager {
    config: SimulatorConfig,
    mentor: Mentor,
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
}

impl SessionManager {
    /// Create a manager from a configuration.
    pub fn new(config: SimulatorConfig) -> Self {
        let mentor = Mentor::new(config.mentor.clone());
        Self {
            config,
            mentor,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a manager with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SimulatorConfig::default())
    }

    /// Access the active configuration.
    pub const fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Create a new session from a scenario preset and start stepping.
    ///
    /// Returns the opaque session id (required for every later call) and
    /// the initial state.
    pub async fn create_session(
        &self,
        scenario: ScenarioKind,
        overrides: Option<ScenarioOverrides>,
    ) -> (SessionId, ReactorState) {
        let id = SessionId::new();
        let overrides = overrides.unwrap_or_default();
        let initial_state =
            presets::initial_state_with_overrides(scenario, &overrides, &self.config.physics);

        let session = Arc::new(Session::spawn(
            id,
            scenario,
            overrides.target_power,
            initial_state.clone(),
            self.config.physics.clone(),
            self.config.step_period(),
        ));

        self.sessions.write().await.insert(id, session);
        info!(session_id = %id, scenario = %scenario, "session created");
        (id, initial_state)
    }

    /// Current state of a session.
    pub async fn get_state(&self, id: SessionId) -> Result<ReactorState, SessionError> {
        let session = self.session(id).await?;
        Ok(session.current_state().await)
    }

    /// Safety display bundle for a session.
    pub async fn safety_status(&self, id: SessionId) -> Result<SafetyStatus, SessionError> {
        let session = self.session(id).await?;
        Ok(session.safety_status().await)
    }

    /// Apply a typed control action; returns the updated state.
    pub async fn apply_action(
        &self,
        id: SessionId,
        kind: ActionKind,
        value: f64,
    ) -> Result<ReactorState, SessionError> {
        let session = self.session(id).await?;
        Ok(session.apply_action(kind, value).await)
    }

    /// Apply an action named on the wire (`control_rod`, `coolant_flow`,
    /// `scram`, `reset_scram`, `power_demand`).
    ///
    /// An unrecognized name is rejected without mutating state.
    pub async fn apply_named_action(
        &self,
        id: SessionId,
        name: &str,
        value: f64,
    ) -> Result<ReactorState, SessionError> {
        let kind = ActionKind::from_str(name)?;
        self.apply_action(id, kind, value).await
    }

    /// Evaluate mentor feedback for a session.
    ///
    /// Critical and warning items are recorded into the session's
    /// trajectory; probabilistic praise and theory tips are returned to
    /// the caller but never recorded, keeping scoring deterministic.
    pub async fn evaluate_feedback(
        &self,
        id: SessionId,
        profile: Option<&LearningProfile>,
    ) -> Result<Vec<FeedbackItem>, SessionError> {
        let session = self.session(id).await?;
        let mut rng = SmallRng::from_os_rng();
        Ok(session.evaluate_feedback(&self.mentor, profile, &mut rng).await)
    }

    /// The most recent `count` actions of a session, oldest first.
    pub async fn recent_actions(
        &self,
        id: SessionId,
        count: usize,
    ) -> Result<Vec<ActionRecord>, SessionError> {
        let session = self.session(id).await?;
        Ok(session.recent_actions(count).await)
    }

    /// Finalize a session: stop stepping, grade the trajectory, release
    /// the entry, and return the report.
    ///
    /// The optional profile supplies the prior skill level for the
    /// knowledge-score adjustment.
    pub async fn end_session(
        &self,
        id: SessionId,
        profile: Option<&LearningProfile>,
    ) -> Result<SessionReport, SessionError> {
        let session = self.session(id).await?;
        session.stop(self.config.session.stop_timeout()).await;

        // Remove only after stepping is fully halted. A concurrent
        // finalize may have won the race; the loser reports not-found.
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_none() {
            return Err(SessionError::SessionNotFound(id));
        }

        let trajectory = session.trajectory().await;
        let report = scoring::grade(&trajectory, profile, &self.config.scoring);
        let wall_seconds = (chrono::Utc::now() - session.started_at()).num_seconds();
        info!(
            session_id = %id,
            final_score = report.final_score,
            letter_grade = %report.letter_grade,
            wall_seconds,
            "session finalized"
        );
        Ok(report)
    }

    /// Forcibly release a session without producing a report.
    ///
    /// For aborted sessions. Releasing an unknown id is a no-op.
    pub async fn destroy_session(&self, id: SessionId) {
        let session = self.sessions.read().await.get(&id).cloned();
        let Some(session) = session else {
            debug!(session_id = %id, "destroy of unknown session ignored");
            return;
        };
        session.stop(self.config.session.stop_timeout()).await;
        self.sessions.write().await.remove(&id);
        info!(session_id = %id, "session destroyed");
    }

    /// Ids of all active sessions.
    pub async fn list_sessions(&self) -> Vec<SessionId> {
        self.sessions.read().await.keys().copied().collect()
    }

    /// Number of active sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Registry lookup. Absence is a normal outcome, not an exception.
    async fn session(&self, id: SessionId) -> Result<Arc<Session>, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::SessionNotFound(id))
    }
}
