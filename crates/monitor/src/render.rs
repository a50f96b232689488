//! Overlay rendering seam
//!
//! The orchestrator formats label text and positions; drawing belongs to an
//! external renderer. Labels are a pure side channel, never read back.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One overlay label for the current frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Pixel-space anchor
    pub x: i32,
    pub y: i32,
    /// Alert styling (red background in the reference renderer)
    pub alert: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, x: i32, y: i32, alert: bool) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            alert,
        }
    }
}

/// Frame overlay sink
pub trait OverlayRenderer {
    fn draw_label(&mut self, label: &Label);
}

/// Discards every label (headless runs)
pub struct NullRenderer;

impl OverlayRenderer for NullRenderer {
    fn draw_label(&mut self, _label: &Label) {}
}

/// Emits labels to the tracing output in place of a display window
pub struct LogRenderer;

impl OverlayRenderer for LogRenderer {
    fn draw_label(&mut self, label: &Label) {
        if label.alert {
            info!("{}", label.text);
        } else {
            debug!("{}", label.text);
        }
    }
}
