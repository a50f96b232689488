//! Operator Vigilance Detection
//!
//! Converts per-frame eye-openness measurements (or "no face detected") into
//! debounced alert decisions:
//! - Leaky-integrator fatigue score with a frame-count debounce
//! - Wall-clock guard monitor with absence timeout and escalation
//!
//! The state machine is pure: callers pass `Instant` timestamps in, and side
//! effects (audio, overlay, event log) stay with the orchestrator.

pub mod assessment;
pub mod config;
pub mod fatigue;
pub mod guard;
pub mod state;

pub use assessment::{FatigueAssessment, GuardAssessment};
pub use config::DetectorConfig;
pub use state::{GuardState, MonitorState};

use std::time::Instant;

/// Alert state machine facade wiring fatigue scoring and guard monitoring
/// over one [`MonitorState`].
pub struct Detector {
    config: DetectorConfig,
    state: MonitorState,
}

impl Detector {
    /// Create a detector; the operator counts as present at `now`
    pub fn new(config: DetectorConfig, now: Instant) -> Self {
        Self {
            config,
            state: MonitorState::new(now),
        }
    }

    /// Record a detected face. Returns true when an absence alert episode
    /// ends on this frame.
    pub fn mark_presence(&mut self, now: Instant) -> bool {
        guard::on_presence(&mut self.state, now)
    }

    /// Score one face frame's EAR measurement
    pub fn score_fatigue(&mut self, ear: f32) -> FatigueAssessment {
        fatigue::update(&mut self.state, &self.config, ear)
    }

    /// Advance the guard monitor on a no-face frame
    pub fn observe_absence(&mut self, now: Instant) -> GuardAssessment {
        guard::on_absence(&mut self.state, &self.config, now)
    }

    /// Current detector state
    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Reset per-run state (new operator session)
    pub fn reset(&mut self, now: Instant) {
        self.state = MonitorState::new(now);
    }
}
