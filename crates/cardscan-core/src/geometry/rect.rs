//! Axis-aligned normalized rectangles and containment

use super::NormalizedPoint;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box reported by a detector.
///
/// `(x, y)` is the bottom-left corner. Detector output is trusted, so nothing
/// here validates that the values actually fall inside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build from two opposite edges on each axis
    pub fn from_edges(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> NormalizedPoint {
        NormalizedPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True iff `inner` lies entirely within `self`, edges included.
    pub fn contains(&self, inner: &NormalizedRect) -> bool {
        self.min_x() <= inner.min_x()
            && inner.max_x() <= self.max_x()
            && self.min_y() <= inner.min_y()
            && inner.max_y() <= self.max_y()
    }
}

/// Free-function form of [`NormalizedRect::contains`].
pub fn contains(outer: &NormalizedRect, inner: &NormalizedRect) -> bool {
    outer.contains(inner)
}
