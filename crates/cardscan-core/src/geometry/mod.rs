//! Normalized detection geometry
//!
//! All types here live in detector space: fractions of the image in `[0, 1]`
//! with the origin at the bottom-left corner and y growing upwards.

pub mod point;
pub mod quad;
pub mod rect;

pub use point::NormalizedPoint;
pub use quad::CornerQuad;
pub use rect::{NormalizedRect, contains};
