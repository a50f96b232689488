//! Operator Vigilance Monitor
//!
//! Frame orchestration for drowsiness and guard-mode presence alerting:
//! - Observation sources (JSON lines from an external landmark extractor)
//! - Per-frame dispatch into the detector state machine
//! - Audio, overlay, and event-log side channels
//!
//! Single-threaded, frame-driven: one observation is fully processed before
//! the next is fetched, and no collaborator failure may abort the loop.

pub mod config;
pub mod pipeline;
pub mod render;
pub mod source;

pub use config::MonitorConfig;
pub use pipeline::FrameMonitor;
pub use render::{Label, LogRenderer, NullRenderer, OverlayRenderer};
pub use source::{FrameObservation, FrameSource, JsonLinesSource};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Monitor error types. Source failures are fatal and distinguishable from
/// "no face detected", which is a normal observation.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Observation feed failed mid-run
    #[error("Observation source failed: {0}")]
    Source(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Initialize tracing output for the monitor process
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
