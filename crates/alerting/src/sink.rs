//! Audio sink capability variants
//!
//! Playback is best-effort: every variant satisfies the same no-throw
//! play/stop contract. Backend selection happens once at startup; a failure
//! at alert time degrades to silence while visual and log alerting continue.

use crate::tone::Tone;
use crate::AudioError;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Non-blocking tone playback. Implementations must never block the frame
/// loop or propagate a failure; they degrade to silence instead.
pub trait AudioSink {
    /// Queue a tone for immediate playback, fire-and-forget
    fn play(&mut self, tone: Tone);

    /// Best-effort stop of any in-flight playback
    fn stop(&mut self);
}

/// Synthesized sine tones through the default rodio output device
pub struct RodioSink {
    // The stream must outlive the sink for audio to keep flowing
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioSink {
    /// Open the default output device
    pub fn try_default() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Backend(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, tone: Tone) {
        if self.sink.is_none() {
            match Sink::try_new(&self.handle) {
                Ok(sink) => self.sink = Some(sink),
                Err(e) => {
                    debug!("audio sink unavailable, tone dropped: {e}");
                    return;
                }
            }
        }
        if let Some(sink) = &self.sink {
            let source = SineWave::new(tone.frequency_hz())
                .take_duration(tone.duration())
                .amplify(tone.amplitude());
            sink.append(source);
        }
    }

    fn stop(&mut self) {
        // Dropping the sink cuts playback without touching the stream
        self.sink.take();
    }
}

/// Platform notification sounds via a spawned system player
#[derive(Debug, Clone, Copy)]
pub struct CommandSink {
    player: &'static str,
    normal_sound: &'static str,
    escalation_sound: &'static str,
}

impl CommandSink {
    /// Locate a usable system player and sound files for this platform
    pub fn detect() -> Option<Self> {
        let candidates: &[CommandSink] = &[
            #[cfg(target_os = "macos")]
            CommandSink {
                player: "afplay",
                normal_sound: "/System/Library/Sounds/Ping.aiff",
                escalation_sound: "/System/Library/Sounds/Sosumi.aiff",
            },
            #[cfg(target_os = "linux")]
            CommandSink {
                player: "paplay",
                normal_sound: "/usr/share/sounds/freedesktop/stereo/bell.oga",
                escalation_sound: "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
            },
            #[cfg(target_os = "linux")]
            CommandSink {
                player: "aplay",
                normal_sound: "/usr/share/sounds/alsa/Front_Center.wav",
                escalation_sound: "/usr/share/sounds/alsa/Front_Center.wav",
            },
        ];

        candidates
            .iter()
            .find(|c| {
                Path::new(c.normal_sound).exists()
                    && Command::new(c.player)
                        .arg("--help")
                        .stdout(Stdio::null())
                        .stderr(Stdio::null())
                        .status()
                        .is_ok()
            })
            .map(|c| {
                debug!(player = c.player, "using system player for alert tones");
                *c
            })
    }
}

impl AudioSink for CommandSink {
    fn play(&mut self, tone: Tone) {
        let sound = match tone {
            Tone::Normal => self.normal_sound,
            Tone::Escalation => self.escalation_sound,
        };
        // Fire-and-forget; the clip is short and owns its own lifetime
        if let Err(e) = Command::new(self.player)
            .arg(sound)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            debug!("system player failed, tone dropped: {e}");
        }
    }

    fn stop(&mut self) {
        // Spawned players run their short clip to completion
    }
}

/// Silence; visual and log alerting continue unaffected
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _tone: Tone) {}
    fn stop(&mut self) {}
}

/// Pick the best available sink: rodio output, then a system player, then
/// silence.
pub fn default_sink() -> Box<dyn AudioSink> {
    match RodioSink::try_default() {
        Ok(sink) => {
            debug!("audio backend: rodio output device");
            return Box::new(sink);
        }
        Err(e) => warn!("audio device unavailable, trying system player: {e}"),
    }
    if let Some(sink) = CommandSink::detect() {
        return Box::new(sink);
    }
    warn!("no audio backend available, alerts will be silent");
    Box::new(NullSink)
}
