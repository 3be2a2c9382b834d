//! Detector observations
//!
//! What each detector reports for one object in one frame. All geometry is in
//! normalized, bottom-left-origin space.

use cardscan_core::{CharacterBox, CornerQuad, GeometryError, NormalizedRect, aggregate};
use serde::{Deserialize, Serialize};

/// Common view over the three observation kinds
pub trait Observation {
    fn bounding_box(&self) -> NormalizedRect;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: NormalizedRect,
    pub confidence: f32,
}

impl FaceObservation {
    pub fn new(bounding_box: NormalizedRect) -> Self {
        Self {
            bounding_box,
            confidence: 1.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

impl Observation for FaceObservation {
    fn bounding_box(&self) -> NormalizedRect {
        self.bounding_box
    }
}

/// Card candidate. Cards can be rotated, so the quad is kept instead of an
/// axis-aligned box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleObservation {
    pub quad: CornerQuad,
    pub confidence: f32,
}

impl RectangleObservation {
    pub fn new(quad: CornerQuad) -> Self {
        Self {
            quad,
            confidence: 1.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

impl Observation for RectangleObservation {
    fn bounding_box(&self) -> NormalizedRect {
        self.quad.bounding_box()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObservation {
    pub bounding_box: NormalizedRect,
    /// Only present when the detector was asked to report character boxes
    pub character_boxes: Option<Vec<CharacterBox>>,
    pub confidence: f32,
}

impl TextObservation {
    pub fn new(bounding_box: NormalizedRect) -> Self {
        Self {
            bounding_box,
            character_boxes: None,
            confidence: 1.0,
        }
    }

    pub fn with_character_boxes(mut self, boxes: Vec<CharacterBox>) -> Self {
        self.character_boxes = Some(boxes);
        self
    }

    /// Tight word box built from the character boxes.
    ///
    /// `None` when the observation carries no character boxes at all.
    pub fn word_box(&self) -> Option<Result<NormalizedRect, GeometryError>> {
        self.character_boxes.as_deref().map(aggregate)
    }
}

impl Observation for TextObservation {
    fn bounding_box(&self) -> NormalizedRect {
        self.bounding_box
    }
}
