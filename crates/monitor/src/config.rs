//! Layered run configuration
//!
//! Defaults → optional TOML file → `VIGIL_*` environment → CLI flags. The
//! surface selects behavior (guard mode, headless, log path) and carries no
//! algorithmic logic.

use crate::MonitorError;
use alerting::AudioConfig;
use detector::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Full monitor configuration, immutable for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Alert state machine thresholds
    pub detector: DetectorConfig,

    /// Beep cadence
    pub audio: AudioConfig,

    /// Alert on sustained face absence
    pub guard_mode: bool,

    /// Run without a display window (audio alerts + logging only)
    pub headless: bool,

    /// Open the display fullscreen (renderer hint)
    pub fullscreen: bool,

    /// CSV event log path; `None` disables persistence
    pub log_path: Option<PathBuf>,
}

impl MonitorConfig {
    /// Load configuration, layering an optional TOML file and `VIGIL_*`
    /// environment variables over the defaults.
    pub fn load(file: Option<&Path>) -> Result<Self, MonitorError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        builder
            .add_source(
                config::Environment::with_prefix("VIGIL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| MonitorError::Config(e.to_string()))
    }
}
