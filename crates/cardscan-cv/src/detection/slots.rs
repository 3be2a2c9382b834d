//! Latest detector results, one slot per detector class

use crate::error::DetectorError;
use crate::observation::{FaceObservation, RectangleObservation, TextObservation};
use log::warn;
use serde::Serialize;

/// What a detector callback did to its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    /// Overwritten with a non-empty result set
    Replaced,
    /// Detector reported nothing; slot emptied
    Cleared,
    /// Detector failed; previous results kept as they were
    Unchanged,
}

/// Per-pass result cache.
///
/// Each slot starts out absent, is overwritten wholesale on every callback for
/// its class and never merges across frames.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameResultSet {
    pub faces: Option<Vec<FaceObservation>>,
    pub cards: Option<Vec<RectangleObservation>>,
    pub words: Option<Vec<TextObservation>>,
}

impl FrameResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_faces(
        &mut self,
        result: Result<Vec<FaceObservation>, DetectorError>,
    ) -> SlotUpdate {
        store(&mut self.faces, result)
    }

    pub fn update_cards(
        &mut self,
        result: Result<Vec<RectangleObservation>, DetectorError>,
    ) -> SlotUpdate {
        store(&mut self.cards, result)
    }

    pub fn update_words(
        &mut self,
        result: Result<Vec<TextObservation>, DetectorError>,
    ) -> SlotUpdate {
        store(&mut self.words, result)
    }

    /// Both the face slot and the card slot hold at least one observation
    pub fn is_renderable(&self) -> bool {
        non_empty(&self.faces) && non_empty(&self.cards)
    }

    pub fn faces(&self) -> &[FaceObservation] {
        self.faces.as_deref().unwrap_or_default()
    }

    pub fn cards(&self) -> &[RectangleObservation] {
        self.cards.as_deref().unwrap_or_default()
    }

    /// Missing word results read as an empty set
    pub fn words(&self) -> &[TextObservation] {
        self.words.as_deref().unwrap_or_default()
    }
}

fn store<T>(slot: &mut Option<Vec<T>>, result: Result<Vec<T>, DetectorError>) -> SlotUpdate {
    match result {
        Ok(observations) if observations.is_empty() => {
            *slot = Some(observations);
            SlotUpdate::Cleared
        }
        Ok(observations) => {
            *slot = Some(observations);
            SlotUpdate::Replaced
        }
        Err(e) => {
            warn!("{}", e);
            SlotUpdate::Unchanged
        }
    }
}

fn non_empty<T>(slot: &Option<Vec<T>>) -> bool {
    slot.as_ref().is_some_and(|v| !v.is_empty())
}
