//! Rule-based mentor ("AI mentor") for the Criticality training core.
//!
//! The mentor inspects a state snapshot plus recent action history
//! against a declarative rule table and, optionally, a per-student
//! learning profile, and emits a prioritized list of feedback items.
//! It is called on demand, holds no per-student state, and its only
//! non-determinism (praise pacing, theory tips) flows through an
//! injected random source.
//!
//! # Modules
//!
//! - [`config`] -- Thresholds, window sizes, and probabilities
//! - [`rules`] -- The declarative condition-to-item rule table
//! - [`patterns`] -- Action-history pattern analysis
//! - [`knowledge`] -- Static reactor theory tip library
//! - [`mentor`] -- The evaluation pass tying it together

pub mod config;
pub mod knowledge;
pub mod mentor;
pub mod patterns;
pub mod rules;

pub use config::MentorConfig;
pub use mentor::Mentor;
pub use rules::{Condition, Rule};
