//! Eye Aspect Ratio (EAR) Geometry
//!
//! Maps 6-point eye contours from an external landmark extractor to a single
//! scalar openness measure per frame. Lower EAR means more closed. No
//! smoothing happens here; temporal logic belongs to the detector crate.

use serde::{Deserialize, Serialize};

/// Number of contour points per eye
pub const CONTOUR_POINTS: usize = 6;

/// Mediapipe FaceMesh indices for the left eye contour, in anatomical order:
/// outer corner, two upper-lid points, inner corner, two lower-lid points.
pub const LEFT_EYE_LANDMARKS: [usize; CONTOUR_POINTS] = [362, 385, 387, 263, 373, 380];

/// Mediapipe FaceMesh indices for the right eye contour, same ordering
pub const RIGHT_EYE_LANDMARKS: [usize; CONTOUR_POINTS] = [33, 160, 158, 133, 153, 144];

/// 2-D pixel-space landmark point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a point from pixel coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// One eye's contour, ordered as in [`LEFT_EYE_LANDMARKS`]
pub type EyeContour = [Point; CONTOUR_POINTS];

/// Both eye contours for a detected face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyePair {
    pub left: EyeContour,
    pub right: EyeContour,
}

/// EAR for a single eye:
///
/// ```text
/// EAR = (|p1 - p5| + |p2 - p4|) / (2 * |p0 - p3|)
/// ```
///
/// Returns `None` when the horizontal span `|p0 - p3|` is zero. Valid
/// landmark geometry never produces that; the sentinel replaces a division
/// by zero.
pub fn eye_aspect_ratio(contour: &EyeContour) -> Option<f32> {
    let vertical_a = contour[1].distance(&contour[5]);
    let vertical_b = contour[2].distance(&contour[4]);
    let horizontal = contour[0].distance(&contour[3]);

    if horizontal <= f32::EPSILON {
        return None;
    }

    Some((vertical_a + vertical_b) / (2.0 * horizontal))
}

/// Average EAR across both eyes. `None` if either contour is degenerate.
pub fn average_ear(eyes: &EyePair) -> Option<f32> {
    let left = eye_aspect_ratio(&eyes.left)?;
    let right = eye_aspect_ratio(&eyes.right)?;
    Some((left + right) / 2.0)
}
