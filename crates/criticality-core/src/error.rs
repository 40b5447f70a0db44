//! Error types for the session layer.
//!
//! The taxonomy is deliberately small. A missing session is a normal,
//! recoverable outcome callers must handle -- ids expire the moment a
//! session is finalized or destroyed. An unrecognized action name is
//! rejected without touching state. Out-of-range control values are not
//! errors at all: clamping is the specified policy for those.

use criticality_types::{ParseActionError, SessionId};

/// Errors surfaced by the session manager.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session with the given id exists (never created, already
    /// finalized, or destroyed).
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The action name is outside the closed action set. State is not
    /// mutated.
    #[error("invalid action: {source}")]
    InvalidAction {
        /// The underlying parse error carrying the rejected name.
        #[from]
        source: ParseActionError,
    },
}
