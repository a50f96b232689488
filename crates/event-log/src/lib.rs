//! Alert Event Log
//!
//! Append-only CSV rows of `(timestamp, event)` recording alert lifecycle
//! transitions. Writes are best-effort and at-least-once: the monitoring
//! loop never stops because history could not be persisted. No dedup happens
//! here; callers decide emission cadence.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Timestamp format for log rows
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header written once when a log file is created
const HEADER: &str = "timestamp,event";

/// Event log error types
#[derive(Error, Debug)]
pub enum LogError {
    /// Row could not be appended
    #[error("Failed to append event row: {0}")]
    Write(#[from] std::io::Error),
}

/// Alert lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Drowsiness alert condition held on a frame
    FatigueAlert,

    /// Guard-mode absence alert held on a frame
    NoFaceAlert,

    /// An active alert episode ended
    AlertCleared,

    /// An absence alert persisted past the escalation window
    AlertEscalated,
}

impl EventKind {
    /// Stable identifier used in log rows
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FatigueAlert => "FATIGUE_ALERT",
            EventKind::NoFaceAlert => "NO_FACE_ALERT",
            EventKind::AlertCleared => "ALERT_CLEARED",
            EventKind::AlertEscalated => "ALERT_ESCALATED",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only CSV sink for alert events
pub struct EventLogger {
    path: Option<PathBuf>,
    /// Rows dropped to I/O failures; the first failure is reported
    failures: u64,
}

impl EventLogger {
    /// Log to the given CSV path, creating it (with header) on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            failures: 0,
        }
    }

    /// A logger that drops every event
    pub fn disabled() -> Self {
        Self {
            path: None,
            failures: 0,
        }
    }

    /// Append one event row stamped with the current local time. Failures
    /// are swallowed; detection continues without history for that event.
    pub fn record(&mut self, kind: EventKind) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.record_at(kind, &timestamp);
    }

    fn record_at(&mut self, kind: EventKind, timestamp: &str) {
        let Some(path) = &self.path else { return };
        if let Err(e) = append_row(path, kind, timestamp) {
            if self.failures == 0 {
                warn!("event log write failed, continuing without history: {e}");
            }
            self.failures += 1;
        }
    }

    /// Rows dropped due to I/O failures
    pub fn dropped(&self) -> u64 {
        self.failures
    }

    /// Whether this logger persists anything at all
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }
}

fn append_row(path: &Path, kind: EventKind, timestamp: &str) -> Result<(), LogError> {
    let new_file = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if new_file {
        writeln!(file, "{HEADER}")?;
    }
    writeln!(file, "{timestamp},{}", kind.as_str())?;
    Ok(())
}
