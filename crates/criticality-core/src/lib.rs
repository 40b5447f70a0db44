//! Session lifecycle and concurrency layer for the Criticality reactor
//! training core.
//!
//! This crate ties the workspace together: it owns per-session
//! background stepping, the lock-protected session registry, and the
//! external operation surface callers use to drive training sessions
//! (create, poll, act, evaluate feedback, finalize, destroy).
//!
//! Sessions are volatile: they live in this process's memory and are
//! lost on restart. Persistence of reports, feedback, and profiles is
//! the caller's responsibility.
//!
//! # Modules
//!
//! - [`config`] -- Aggregate configuration with YAML loader
//! - [`error`] -- The session error taxonomy
//! - [`session`] -- One session: state, histories, stepping task
//! - [`manager`] -- The registry and external operations

pub mod config;
pub mod error;
pub mod manager;
pub mod session;

pub use config::{ConfigError, SessionConfig, SimulatorConfig};
pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{ParameterStatus, SafetyStatus, Session};
