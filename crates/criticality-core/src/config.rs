//! Aggregate configuration for the training core.
//!
//! [`SimulatorConfig`] bundles the per-crate configuration structs and
//! provides a YAML loader. Every field has a default, so an empty file
//! (or no file at all) yields a fully working configuration.

use std::path::Path;
use std::time::Duration;

use criticality_mentor::MentorConfig;
use criticality_physics::PhysicsConfig;
use criticality_scoring::ScoringConfig;
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Session scheduling and teardown settings.
///
/// The stepping cadence itself is not configured here: simulation time
/// and wall time are coupled 1:1, so the cadence is the physics
/// `time_step`. Under host load, missed steps are delayed rather than
/// replayed in a burst -- the twin slows down instead of jolting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on waiting for an in-flight step when stopping a
    /// session (milliseconds, default: 2000). Stop never blocks
    /// indefinitely; a task that overruns this bound is aborted between
    /// steps.
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl SessionConfig {
    /// The stop timeout as a [`Duration`].
    pub const fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stop_timeout_ms: default_stop_timeout_ms(),
        }
    }
}

const fn default_stop_timeout_ms() -> u64 {
    2000
}

/// Top-level configuration for the training core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Physics engine constants.
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Mentor thresholds and pacing.
    #[serde(default)]
    pub mentor: MentorConfig,

    /// Scoring rubric constants.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Session scheduling and teardown.
    #[serde(default)]
    pub session: SessionConfig,
}

impl SimulatorConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the content does not parse.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(content)?;
        Ok(config)
    }

    /// The stepping cadence: one physics time step of wall time.
    pub fn step_period(&self) -> Duration {
        Duration::from_secs_f64(self.physics.time_step.max(0.001))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = SimulatorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SimulatorConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = "
physics:
  time_step: 0.05
session:
  stop_timeout_ms: 500
";
        let config = SimulatorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.physics.time_step, 0.05);
        assert_eq!(config.session.stop_timeout_ms, 500);
        // Untouched sections keep their defaults.
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.mentor, MentorConfig::default());
    }

    #[test]
    fn step_period_tracks_time_step() {
        let config = SimulatorConfig::default();
        assert_eq!(config.step_period(), Duration::from_millis(100));
    }

    #[test]
    fn step_period_has_a_floor() {
        let mut config = SimulatorConfig::default();
        config.physics.time_step = 0.0;
        assert!(config.step_period() >= Duration::from_millis(1));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = SimulatorConfig::from_yaml_str("physics: [not, a, map]");
        assert!(result.is_err());
    }
}
