//! Alert tone definitions
//!
//! Two fixed tones. Distinctness and cadence are the contract; exact timbre
//! is not, so a fallback sink may substitute platform notification sounds.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Alert tone selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// Short mid-pitch beep while an alert is active
    Normal,

    /// Longer, higher-pitch, louder tone once an alert has escalated
    Escalation,
}

impl Tone {
    /// Sine frequency in Hz
    pub fn frequency_hz(&self) -> f32 {
        match self {
            Tone::Normal => 880.0,
            Tone::Escalation => 1320.0,
        }
    }

    /// Tone length
    pub fn duration(&self) -> Duration {
        match self {
            Tone::Normal => Duration::from_millis(250),
            Tone::Escalation => Duration::from_millis(500),
        }
    }

    /// Linear amplitude in [0, 1]
    pub fn amplitude(&self) -> f32 {
        match self {
            Tone::Normal => 0.2,
            Tone::Escalation => 0.3,
        }
    }
}
