//! Normalized to view-space mapping
//!
//! Detector space has its origin at the bottom-left; view space is in pixels
//! with the origin at the top-left. The mapper never clamps: geometry outside
//! `[0, 1]` simply lands off screen.

use crate::geometry::{CornerQuad, NormalizedPoint, NormalizedRect};
use serde::{Deserialize, Serialize};

/// Current size of the display viewport in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Map a normalized point into this viewport
    pub fn map_point(&self, p: &NormalizedPoint) -> ViewPoint {
        to_view_space(p, self.width, self.height)
    }

    pub fn map_quad(&self, quad: &CornerQuad) -> ViewQuad {
        ViewQuad {
            top_left: self.map_point(&quad.top_left),
            top_right: self.map_point(&quad.top_right),
            bottom_left: self.map_point(&quad.bottom_left),
            bottom_right: self.map_point(&quad.bottom_right),
        }
    }

    /// Map an axis-aligned box through its extremes. The top edge in normalized
    /// space becomes the view-space origin.
    pub fn map_rect(&self, rect: &NormalizedRect) -> ViewRect {
        let origin = self.map_point(&NormalizedPoint::new(rect.min_x(), rect.max_y()));
        ViewRect {
            x: origin.x,
            y: origin.y,
            width: rect.width * self.width,
            height: rect.height * self.height,
        }
    }
}

/// A point in view pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in view pixels, `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewQuad {
    pub top_left: ViewPoint,
    pub top_right: ViewPoint,
    pub bottom_left: ViewPoint,
    pub bottom_right: ViewPoint,
}

impl ViewQuad {
    /// Closed outline TL → TR → BR → BL → TL
    pub fn closed_outline(&self) -> [ViewPoint; 5] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
            self.top_left,
        ]
    }

    /// Vertical pixel offset between the two top corners
    pub fn top_edge_drop(&self) -> f64 {
        (self.top_right.y - self.top_left.y).abs()
    }
}

/// `view_x = x * width`, `view_y = (1 - y) * height`
pub fn to_view_space(p: &NormalizedPoint, viewport_width: f64, viewport_height: f64) -> ViewPoint {
    ViewPoint::new(p.x * viewport_width, (1.0 - p.y) * viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_mapping() {
        let viewport = ViewportSize::new(375.0, 667.0);

        assert_eq!(
            viewport.map_point(&NormalizedPoint::new(0.0, 0.0)),
            ViewPoint::new(0.0, 667.0)
        );
        assert_eq!(
            viewport.map_point(&NormalizedPoint::new(1.0, 1.0)),
            ViewPoint::new(375.0, 0.0)
        );
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let p = to_view_space(&NormalizedPoint::new(1.5, -0.5), 100.0, 200.0);
        assert_eq!(p, ViewPoint::new(150.0, 300.0));
    }

    #[test]
    fn test_map_rect_flips_origin_to_top_edge() {
        let viewport = ViewportSize::new(100.0, 200.0);
        let rect = viewport.map_rect(&NormalizedRect::new(0.1, 0.25, 0.5, 0.5));

        assert!((rect.x - 10.0).abs() < 1e-9);
        assert!((rect.y - 50.0).abs() < 1e-9);
        assert!((rect.width - 50.0).abs() < 1e-9);
        assert!((rect.height - 100.0).abs() < 1e-9);
    }
}
