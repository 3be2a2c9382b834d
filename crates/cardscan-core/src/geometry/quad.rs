use super::{NormalizedPoint, NormalizedRect};
use serde::{Deserialize, Serialize};

/// Four corners of a possibly rotated quadrilateral, as reported for cards and
/// for individual characters of a text observation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerQuad {
    pub top_left: NormalizedPoint,
    pub top_right: NormalizedPoint,
    pub bottom_left: NormalizedPoint,
    pub bottom_right: NormalizedPoint,
}

impl CornerQuad {
    pub const fn new(
        top_left: NormalizedPoint,
        top_right: NormalizedPoint,
        bottom_left: NormalizedPoint,
        bottom_right: NormalizedPoint,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Unrotated quad covering `rect`
    pub fn from_rect(rect: &NormalizedRect) -> Self {
        Self {
            top_left: NormalizedPoint::new(rect.min_x(), rect.max_y()),
            top_right: NormalizedPoint::new(rect.max_x(), rect.max_y()),
            bottom_left: NormalizedPoint::new(rect.min_x(), rect.min_y()),
            bottom_right: NormalizedPoint::new(rect.max_x(), rect.min_y()),
        }
    }

    pub fn corners(&self) -> [NormalizedPoint; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// Smallest axis-aligned rectangle enclosing all four corners.
    pub fn bounding_box(&self) -> NormalizedRect {
        let corners = self.corners();
        let (mut min_x, mut min_y) = (corners[0].x, corners[0].y);
        let (mut max_x, mut max_y) = (min_x, min_y);

        for corner in &corners[1..] {
            min_x = min_x.min(corner.x);
            min_y = min_y.min(corner.y);
            max_x = max_x.max(corner.x);
            max_y = max_y.max(corner.y);
        }

        NormalizedRect::from_edges(min_x, min_y, max_x, max_y)
    }

    /// Mean length of the top and bottom edges
    pub fn width(&self) -> f64 {
        (self.top_left.distance(&self.top_right) + self.bottom_left.distance(&self.bottom_right))
            / 2.0
    }

    /// Mean length of the left and right edges
    pub fn height(&self) -> f64 {
        (self.top_left.distance(&self.bottom_left) + self.top_right.distance(&self.bottom_right))
            / 2.0
    }

    /// Shorter side over longer side, in `[0, 1]`. Degenerate quads report 0.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = (self.width(), self.height());
        let longer = w.max(h);
        if longer <= 0.0 {
            return 0.0;
        }
        w.min(h) / longer
    }
}
