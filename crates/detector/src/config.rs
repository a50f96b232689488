//! Detector configuration

use serde::{Deserialize, Serialize};

/// Alert state machine thresholds, immutable for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// EAR below this counts the frame as eyes-closed
    pub ear_threshold: f32,

    /// Consecutive closed frames before the fast alert path fires
    pub closed_frame_debounce: u32,

    /// Fatigue score added per closed frame
    pub fatigue_increase_per_frame: f32,

    /// Fatigue score removed per open frame
    pub fatigue_decay_per_frame: f32,

    /// Fatigue score at which the slow alert path fires
    pub fatigue_alert_threshold: f32,

    /// Seconds without a detected face before the guard alert begins
    pub no_face_timeout_seconds: f64,

    /// Additional seconds of absence before the alert escalates
    pub escalation_seconds: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            closed_frame_debounce: 20,
            fatigue_increase_per_frame: 2.0,
            fatigue_decay_per_frame: 1.0,
            fatigue_alert_threshold: 60.0,
            no_face_timeout_seconds: 10.0,
            escalation_seconds: 60.0,
        }
    }
}

impl DetectorConfig {
    /// Strict config (faster alerts, shorter absence windows)
    pub fn strict() -> Self {
        Self {
            closed_frame_debounce: 12,
            fatigue_alert_threshold: 45.0,
            no_face_timeout_seconds: 5.0,
            escalation_seconds: 30.0,
            ..Default::default()
        }
    }

    /// Lenient config (more tolerance before alerting)
    pub fn lenient() -> Self {
        Self {
            closed_frame_debounce: 30,
            fatigue_alert_threshold: 75.0,
            no_face_timeout_seconds: 20.0,
            escalation_seconds: 120.0,
            ..Default::default()
        }
    }
}
