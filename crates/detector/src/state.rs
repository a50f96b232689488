//! Detector state tracking

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Guard presence state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuardState {
    /// Face seen recently, no absence alert
    #[default]
    Quiet,

    /// Absence past the timeout, alert active
    Alerting,

    /// Absence past the escalation window
    Escalated,
}

impl GuardState {
    /// Whether a no-face alert episode is in progress
    pub fn is_alerting(&self) -> bool {
        matches!(self, GuardState::Alerting | GuardState::Escalated)
    }
}

/// Per-run detector state, mutated once per processed frame.
///
/// Single long-lived instance with a single writer (the frame loop); lives
/// for the process lifetime and carries nothing across runs.
#[derive(Debug, Clone)]
pub struct MonitorState {
    /// Consecutive frames with EAR below the threshold
    pub closed_eye_frames: u32,

    /// Leaky-integrator fatigue score, clamped to [0, 100]
    pub fatigue_score: f32,

    /// Last frame on which a face was detected
    pub last_face_seen: Instant,

    /// Guard presence state
    pub guard: GuardState,
}

impl MonitorState {
    /// Fresh state at process start; the operator counts as just seen
    pub fn new(now: Instant) -> Self {
        Self {
            closed_eye_frames: 0,
            fatigue_score: 0.0,
            last_face_seen: now,
            guard: GuardState::Quiet,
        }
    }
}
