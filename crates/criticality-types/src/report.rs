//! Session trajectory and final report types.
//!
//! A [`Trajectory`] is the complete record a finished session hands to the
//! scoring engine: the ordered state history, the action history, the
//! severity-bearing feedback the student received, and the optional power
//! target. A [`SessionReport`] is produced from it exactly once, at
//! finalization, and is immutable thereafter.

use serde::{Deserialize, Serialize};

use crate::actions::ActionRecord;
use crate::enums::{LetterGrade, ScenarioKind};
use crate::feedback::FeedbackRecord;
use crate::state::ReactorState;

/// The complete record of one session, the sole input to scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Scenario category the session was created from.
    pub scenario: ScenarioKind,
    /// Per-step state snapshots, in simulation-time order.
    pub states: Vec<ReactorState>,
    /// Applied actions, in simulation-time order.
    pub actions: Vec<ActionRecord>,
    /// Critical/warning feedback delivered during the session.
    pub feedback: Vec<FeedbackRecord>,
    /// Target power level for the scenario (MW), if one was specified.
    pub target_power: Option<f64>,
}

/// Sub-score breakdown of a session report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Safety sub-score (0--100), weighted 40%.
    pub safety: f64,
    /// Efficiency sub-score (0--100), weighted 30%.
    pub efficiency: f64,
    /// Knowledge-application sub-score (0--100), weighted 30%.
    pub knowledge: f64,
}

/// Final report for a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Weighted final score, rounded to one decimal place.
    pub final_score: f64,
    /// Letter grade derived from the final score.
    pub letter_grade: LetterGrade,
    /// Per-dimension sub-scores.
    pub breakdown: ScoreBreakdown,
    /// What the student did well, derived from sub-score thresholds.
    pub strengths: Vec<String>,
    /// Where the student should focus next, derived from sub-score
    /// thresholds.
    pub improvements: Vec<String>,
}
