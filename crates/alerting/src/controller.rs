//! Edge-triggered alert cadence controller

use crate::sink::AudioSink;
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Audio cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Seconds between beeps while an alert is active
    pub beep_interval_seconds: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            beep_interval_seconds: 1.0,
        }
    }
}

impl AudioConfig {
    /// Cadence while escalated: twice as fast, floored at half a second
    pub fn escalation_interval_seconds(&self) -> f64 {
        (self.beep_interval_seconds / 2.0).max(0.5)
    }
}

/// Edge-triggered wrapper around an audio sink.
///
/// A rising edge arms the beep throttle, a falling edge issues one stop, and
/// the sustained level emits one tone per elapsed cadence window. Escalation
/// substitutes the tone and shortens the cadence. At most one tone plays per
/// frame; the throttle is shared between the two cadences.
pub struct AlertController {
    config: AudioConfig,
    sink: Box<dyn AudioSink>,
    active: bool,
    last_beep: Option<Instant>,
}

impl AlertController {
    pub fn new(config: AudioConfig, sink: Box<dyn AudioSink>) -> Self {
        Self {
            config,
            sink,
            active: false,
            last_beep: None,
        }
    }

    /// Drive the controller with this frame's alert level.
    pub fn update(&mut self, active: bool, escalated: bool, now: Instant) {
        if active && !self.active {
            self.active = true;
            // Arm the throttle; the next active frame beeps immediately
            self.last_beep = None;
            debug!("audio alert raised");
            return;
        }

        if !active {
            if self.active {
                self.active = false;
                self.last_beep = None;
                debug!("audio alert stopped");
                self.sink.stop();
            }
            return;
        }

        let interval = if escalated {
            self.config.escalation_interval_seconds()
        } else {
            self.config.beep_interval_seconds
        };
        let due = match self.last_beep {
            None => true,
            Some(at) => now.duration_since(at) >= Duration::from_secs_f64(interval),
        };
        if due {
            let tone = if escalated {
                Tone::Escalation
            } else {
                Tone::Normal
            };
            self.sink.play(tone);
            self.last_beep = Some(now);
        }
    }

    /// Whether the beep cadence is currently running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop any in-flight playback regardless of level (run teardown)
    pub fn shutdown(&mut self) {
        self.active = false;
        self.last_beep = None;
        self.sink.stop();
    }
}
