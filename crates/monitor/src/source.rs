//! Frame observation sources
//!
//! The monitor makes no assumption about how landmarks are produced. An
//! external extractor feeds one observation per frame across this seam; the
//! binary reads them as JSON lines on stdin.

use crate::MonitorError;
use eye_metrics::EyePair;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::warn;

/// One frame's landmark extraction result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameObservation {
    /// Eye contours for the detected face, `None` when no face was found
    pub eyes: Option<EyePair>,
}

impl FrameObservation {
    /// A frame with a detected face
    pub fn face(eyes: EyePair) -> Self {
        Self { eyes: Some(eyes) }
    }

    /// A frame with no detected face
    pub fn absent() -> Self {
        Self { eyes: None }
    }
}

/// Per-frame observation feed. `next` may block for at most one frame;
/// `Ok(None)` is end of stream (the quit signal analogue).
pub trait FrameSource {
    fn next(&mut self) -> Result<Option<FrameObservation>, MonitorError>;
}

/// Reads one JSON observation per line. Ill-formed lines are counted and
/// skipped; only the underlying reader failing ends the run.
pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    rejected: u64,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            rejected: 0,
        }
    }

    /// Lines skipped because they failed to parse
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl<R: BufRead> FrameSource for JsonLinesSource<R> {
    fn next(&mut self) -> Result<Option<FrameObservation>, MonitorError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(observation) => return Ok(Some(observation)),
                Err(e) => {
                    self.rejected += 1;
                    warn!("skipping unreadable observation line: {e}");
                }
            }
        }
    }
}
