//! Enumeration types for the reactor training core.
//!
//! Every closed set in the data model lives here: scenario categories,
//! control action kinds, feedback classification, emergency severity,
//! letter grades, and the learning-profile enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scenario categories
// ---------------------------------------------------------------------------

/// Training scenario category selecting an initial-condition preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Cold reactor brought up from near-zero power.
    Startup,
    /// Mid-power load-following exercise.
    Transient,
    /// Reactor already running hot, close to its limits.
    Emergency,
}

/// Error returned when parsing an unknown scenario name.
#[derive(Debug, thiserror::Error)]
#[error("unknown scenario: {0}")]
pub struct ParseScenarioError(pub String);

impl FromStr for ScenarioKind {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startup" => Ok(Self::Startup),
            "transient" => Ok(Self::Transient),
            "emergency" => Ok(Self::Emergency),
            other => Err(ParseScenarioError(other.to_owned())),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Startup => "startup",
            Self::Transient => "transient",
            Self::Emergency => "emergency",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Control actions
// ---------------------------------------------------------------------------

/// A control input an operator can apply to the reactor.
///
/// The set is closed: anything outside it is rejected at the parse
/// boundary, never silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Set the control rod withdrawal position (percent, clamped 0--100).
    ControlRod,
    /// Set the coolant flow rate (percent of nominal, clamped 0--150).
    CoolantFlow,
    /// Manual emergency shutdown: rods fully inserted, trip flag set.
    Scram,
    /// Clear the trip flag after a shutdown.
    ResetScram,
    /// Power-demand setpoint: rods are nudged toward the target output.
    PowerDemand,
}

impl ActionKind {
    /// Whether this action adjusts a continuously-valued control.
    ///
    /// Corrective-action detection in scoring and oscillation detection in
    /// the mentor only consider these kinds.
    pub const fn is_control_adjustment(self) -> bool {
        matches!(self, Self::ControlRod | Self::CoolantFlow)
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct ParseActionError(pub String);

impl FromStr for ActionKind {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "control_rod" => Ok(Self::ControlRod),
            "coolant_flow" => Ok(Self::CoolantFlow),
            "scram" => Ok(Self::Scram),
            "reset_scram" => Ok(Self::ResetScram),
            "power_demand" => Ok(Self::PowerDemand),
            other => Err(ParseActionError(other.to_owned())),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ControlRod => "control_rod",
            Self::CoolantFlow => "coolant_flow",
            Self::Scram => "scram",
            Self::ResetScram => "reset_scram",
            Self::PowerDemand => "power_demand",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Emergency severity
// ---------------------------------------------------------------------------

/// Instantaneous emergency severity, recomputed from scratch every step.
///
/// The ordering is total: a safety evaluation takes the maximum severity
/// implied by any monitored parameter. [`EmergencyLevel::Critical`] always
/// coincides with an automatic trip.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EmergencyLevel {
    /// All monitored parameters within normal bands.
    #[default]
    Normal,
    /// A parameter is approaching its limit; monitor closely.
    Caution,
    /// Temperature or pressure elevated; prepare for action.
    Elevated,
    /// A parameter is at 95% of its limit; corrective action required.
    Severe,
    /// A hard limit was exceeded; the reactor has tripped automatically.
    Critical,
}

impl EmergencyLevel {
    /// Numeric severity on the 0--4 scale.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Caution => 1,
            Self::Elevated => 2,
            Self::Severe => 3,
            Self::Critical => 4,
        }
    }

    /// Build a level from a numeric severity, saturating above 4.
    pub const fn from_severity(level: u8) -> Self {
        match level {
            0 => Self::Normal,
            1 => Self::Caution,
            2 => Self::Elevated,
            3 => Self::Severe,
            _ => Self::Critical,
        }
    }

    /// Whether any emergency condition is active.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

// ---------------------------------------------------------------------------
// Feedback classification
// ---------------------------------------------------------------------------

/// Severity/intent classification of one feedback item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    /// Immediate safety problem requiring operator action.
    Critical,
    /// A developing problem the operator should correct soon.
    Warning,
    /// A concrete operational improvement.
    Suggestion,
    /// Background knowledge relevant to the current situation.
    Educational,
    /// Supportive nudge for an over-cautious operator.
    Encouragement,
    /// Positive reinforcement for operating in the optimal band.
    Praise,
}

/// Topic area a feedback item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackCategory {
    /// Safety limits and emergency response.
    Safety,
    /// Day-to-day reactor operation.
    Operation,
    /// Operator technique and control habits.
    Technique,
    /// Reactor theory background.
    Theory,
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// Letter grade assigned to a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// Final score of 90 or above.
    A,
    /// Final score of 80 or above.
    B,
    /// Final score of 70 or above.
    C,
    /// Final score of 60 or above.
    D,
    /// Final score below 60.
    F,
}

impl LetterGrade {
    /// Map a final score to a letter grade using the fixed cutoffs.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::A
        } else if score >= 80.0 {
            Self::B
        } else if score >= 70.0 {
            Self::C
        } else if score >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Learning profile enumerations
// ---------------------------------------------------------------------------

/// Self-reported or inferred operator experience level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    /// New to reactor operation.
    #[default]
    Beginner,
    /// Comfortable with routine operation.
    Intermediate,
    /// Expected to perform near-flawlessly.
    Advanced,
}

/// Observed decision-making style, inferred from action pacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    /// No strong pattern either way.
    #[default]
    Balanced,
    /// Many rapid adjustments; tends to act before the plant responds.
    RapidExperimental,
    /// Long pauses between actions; tends to hesitate.
    DeliberateCalculative,
}
