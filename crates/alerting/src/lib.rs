//! Audio Alerting
//!
//! Edge-triggered beep cadence over a best-effort playback capability.
//! Backends never throw into the frame loop: a missing audio device degrades
//! to a platform notification sound, and failing that, to silence.

pub mod controller;
pub mod sink;
pub mod tone;

pub use controller::{AlertController, AudioConfig};
pub use sink::{default_sink, AudioSink, CommandSink, NullSink, RodioSink};
pub use tone::Tone;

use thiserror::Error;

/// Audio error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// Output device or backend could not be opened
    #[error("Audio backend unavailable: {0}")]
    Backend(String),
}
