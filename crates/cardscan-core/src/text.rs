//! Word-box aggregation from per-character boxes

use crate::error::GeometryError;
use crate::geometry::{CornerQuad, NormalizedRect};

/// Per-character box reported by a text detector. Characters may be rotated,
/// so each one carries all four corners.
pub type CharacterBox = CornerQuad;

/// Reduce a word's character boxes to one enclosing rectangle.
///
/// The left edge comes from the bottom-left corners, the right edge and bottom
/// edge from the bottom-right corners and the top edge from the top-right
/// corners. Extremes are seeded from the first character.
pub fn aggregate(chars: &[CharacterBox]) -> Result<NormalizedRect, GeometryError> {
    let (first, rest) = chars.split_first().ok_or(GeometryError::EmptyInput)?;

    let mut left = first.bottom_left.x;
    let mut right = first.bottom_right.x;
    let mut bottom = first.bottom_right.y;
    let mut top = first.top_right.y;

    for ch in rest {
        left = left.min(ch.bottom_left.x);
        right = right.max(ch.bottom_right.x);
        bottom = bottom.min(ch.bottom_right.y);
        top = top.max(ch.top_right.y);
    }

    let width = right - left;
    let height = top - bottom;
    if width < 0.0 || height < 0.0 {
        return Err(GeometryError::InvertedExtent { width, height });
    }

    Ok(NormalizedRect::new(left, bottom, width, height))
}
