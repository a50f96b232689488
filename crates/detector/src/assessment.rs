//! Per-frame assessment results

use crate::state::GuardState;
use serde::{Deserialize, Serialize};

/// Outcome of scoring one face frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueAssessment {
    /// Averaged eye aspect ratio for the frame
    pub ear: f32,

    /// Fatigue score after this frame
    pub score: f32,

    /// Consecutive closed-eye frames including this one
    pub closed_frames: u32,

    /// Fatigue alert condition: debounce path OR accumulator path
    pub alert: bool,
}

/// Outcome of one no-face frame in guard mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuardAssessment {
    /// Seconds since a face was last seen
    pub seconds_since_face: f64,

    /// Guard state after this frame
    pub state: GuardState,

    /// A previously active absence alert cleared on this frame
    pub cleared: bool,

    /// True only on the frame the state first escalates
    pub escalated_edge: bool,
}

impl GuardAssessment {
    /// Whether the absence alert is active on this frame
    pub fn alerting(&self) -> bool {
        self.state.is_alerting()
    }
}
