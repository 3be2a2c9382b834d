//! Cardscan geometry core
//!
//! Normalized detection geometry, the view-space mapper, containment tests and
//! the character-box aggregator. Everything here is pure and allocation-light so
//! it can run on the rendering sequencer without blocking.

pub mod error;
pub mod geometry;
pub mod mapping;
pub mod text;

pub use error::GeometryError;
pub use geometry::{CornerQuad, NormalizedPoint, NormalizedRect, contains};
pub use mapping::{ViewPoint, ViewQuad, ViewRect, ViewportSize, to_view_space};
pub use text::{CharacterBox, aggregate};
