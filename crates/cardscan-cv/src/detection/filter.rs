//! Containment filter: which cards and words qualify for drawing

use super::config::FilterConfig;
use super::slots::FrameResultSet;
use crate::observation::{Observation, TextObservation};
use cardscan_core::{CornerQuad, NormalizedRect};
use log::warn;
use serde::Serialize;

/// Cards and word boxes that passed the containment filter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualifiedScene {
    pub cards: Vec<CornerQuad>,
    pub words: Vec<NormalizedRect>,
}

impl QualifiedScene {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.words.is_empty()
    }
}

/// Select cards that contain a face, and the words inside those cards.
///
/// A card is emitted once for every face it contains, and its words are
/// collected again for each of those matches, unless `deduplicate_cards` is
/// set. Words without character boxes are skipped; words whose character boxes
/// do not aggregate are logged and skipped.
pub fn qualify(results: &FrameResultSet, config: &FilterConfig) -> QualifiedScene {
    let mut scene = QualifiedScene::default();

    for card in results.cards() {
        let card_bounds = card.bounding_box();
        let matches = results
            .faces()
            .iter()
            .filter(|face| card_bounds.contains(&face.bounding_box))
            .count();

        let repeats = if config.deduplicate_cards {
            matches.min(1)
        } else {
            matches
        };

        for _ in 0..repeats {
            scene.cards.push(card.quad);
            collect_words(&card_bounds, results.words(), &mut scene.words);
        }
    }

    scene
}

fn collect_words(card: &NormalizedRect, words: &[TextObservation], out: &mut Vec<NormalizedRect>) {
    for word in words.iter().filter(|w| card.contains(&w.bounding_box)) {
        match word.word_box() {
            Some(Ok(rect)) => out.push(rect),
            Some(Err(e)) => warn!("Skipping word highlight: {}", e),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{FaceObservation, RectangleObservation};

    fn results(faces: Vec<NormalizedRect>, words: Vec<TextObservation>) -> FrameResultSet {
        let card = CornerQuad::from_rect(&NormalizedRect::new(0.1, 0.1, 0.8, 0.6));
        let mut results = FrameResultSet::new();
        results.update_cards(Ok(vec![RectangleObservation::new(card)]));
        results.update_faces(Ok(faces.into_iter().map(FaceObservation::new).collect()));
        results.update_words(Ok(words));
        results
    }

    fn word(rect: NormalizedRect) -> TextObservation {
        TextObservation::new(rect).with_character_boxes(vec![CornerQuad::from_rect(&rect)])
    }

    #[test]
    fn test_face_outside_card_disqualifies() {
        let results = results(vec![NormalizedRect::new(0.85, 0.8, 0.1, 0.1)], Vec::new());
        assert!(qualify(&results, &FilterConfig::default()).is_empty());
    }

    #[test]
    fn test_word_outside_card_is_ignored() {
        let inside = NormalizedRect::new(0.5, 0.5, 0.2, 0.05);
        let outside = NormalizedRect::new(0.5, 0.75, 0.2, 0.05);
        let results = results(
            vec![NormalizedRect::new(0.2, 0.2, 0.1, 0.1)],
            vec![word(inside), word(outside)],
        );

        let scene = qualify(&results, &FilterConfig::default());
        assert_eq!(scene.cards.len(), 1);
        assert_eq!(scene.words.len(), 1);
    }

    #[test]
    fn test_words_without_character_boxes_are_skipped() {
        let rect = NormalizedRect::new(0.5, 0.5, 0.2, 0.05);
        let results = results(
            vec![NormalizedRect::new(0.2, 0.2, 0.1, 0.1)],
            vec![TextObservation::new(rect), TextObservation::new(rect).with_character_boxes(Vec::new())],
        );

        let scene = qualify(&results, &FilterConfig::default());
        assert_eq!(scene.cards.len(), 1);
        assert!(scene.words.is_empty());
    }

    #[test]
    fn test_two_faces_repeat_card_unless_deduplicated() {
        let faces = vec![
            NormalizedRect::new(0.2, 0.2, 0.1, 0.1),
            NormalizedRect::new(0.6, 0.2, 0.1, 0.1),
        ];
        let words = vec![word(NormalizedRect::new(0.4, 0.5, 0.2, 0.05))];
        let results = results(faces, words);

        let scene = qualify(&results, &FilterConfig::default());
        assert_eq!(scene.cards.len(), 2);
        assert_eq!(scene.cards[0], scene.cards[1]);
        assert_eq!(scene.words.len(), 2);

        let scene = qualify(&results, &FilterConfig { deduplicate_cards: true });
        assert_eq!(scene.cards.len(), 1);
        assert_eq!(scene.words.len(), 1);
    }
}
