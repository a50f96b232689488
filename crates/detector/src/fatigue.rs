//! Leaky-integrator fatigue scoring
//!
//! Two trigger paths share one alert condition: a fast frame-count debounce
//! that catches a single sustained closure, and a slow accumulator that
//! catches many short partial closures. Either path fires independently.

use crate::assessment::FatigueAssessment;
use crate::config::DetectorConfig;
use crate::state::MonitorState;

/// Fatigue score ceiling
pub const SCORE_CEILING: f32 = 100.0;

/// Apply one face frame's EAR measurement to the detector state.
pub fn update(state: &mut MonitorState, config: &DetectorConfig, ear: f32) -> FatigueAssessment {
    if ear < config.ear_threshold {
        state.closed_eye_frames += 1;
        state.fatigue_score =
            (state.fatigue_score + config.fatigue_increase_per_frame).min(SCORE_CEILING);
    } else {
        state.closed_eye_frames = 0;
        state.fatigue_score = (state.fatigue_score - config.fatigue_decay_per_frame).max(0.0);
    }

    let alert = state.closed_eye_frames >= config.closed_frame_debounce
        || state.fatigue_score >= config.fatigue_alert_threshold;

    FatigueAssessment {
        ear,
        score: state.fatigue_score,
        closed_frames: state.closed_eye_frames,
        alert,
    }
}
