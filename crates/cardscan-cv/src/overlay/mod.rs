//! Overlay primitives, the renderer and display surfaces

pub mod renderer;
pub mod surface;

pub use renderer::OverlayRenderer;
pub use surface::{OverlayCanvas, RasterSurface};

use cardscan_core::{ViewPoint, ViewRect};
use serde::{Deserialize, Serialize};

/// Colour tag for a card outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTone {
    Normal,
    Skewed,
}

/// A drawable shape in view pixels. Regenerated on every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayPrimitive {
    /// Closed polyline TL → TR → BR → BL → TL around a card
    CardOutline {
        points: [ViewPoint; 5],
        tone: CardTone,
        line_width: f32,
    },
    /// Bordered rectangle around a word
    WordHighlight { rect: ViewRect, border_width: f32 },
}

impl OverlayPrimitive {
    pub fn is_card(&self) -> bool {
        matches!(self, OverlayPrimitive::CardOutline { .. })
    }

    pub fn is_word(&self) -> bool {
        matches!(self, OverlayPrimitive::WordHighlight { .. })
    }

    pub fn tone(&self) -> Option<CardTone> {
        match self {
            OverlayPrimitive::CardOutline { tone, .. } => Some(*tone),
            OverlayPrimitive::WordHighlight { .. } => None,
        }
    }
}
