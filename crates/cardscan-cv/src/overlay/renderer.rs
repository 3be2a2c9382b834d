//! Turns qualified geometry into overlay primitives

use super::{CardTone, OverlayPrimitive};
use crate::detection::QualifiedScene;
use crate::detection::config::OverlayConfig;
use cardscan_core::{CornerQuad, NormalizedRect, ViewQuad, ViewportSize};

pub struct OverlayRenderer {
    config: OverlayConfig,
}

impl OverlayRenderer {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Card outlines first, then word highlights, in input order.
    pub fn render(
        &self,
        cards: &[CornerQuad],
        words: &[NormalizedRect],
        viewport: ViewportSize,
    ) -> Vec<OverlayPrimitive> {
        let mut primitives = Vec::with_capacity(cards.len() + words.len());

        for card in cards {
            let mapped = viewport.map_quad(card);
            primitives.push(OverlayPrimitive::CardOutline {
                points: mapped.closed_outline(),
                tone: self.classify(&mapped),
                line_width: self.config.card_line_width,
            });
        }

        for word in words {
            primitives.push(OverlayPrimitive::WordHighlight {
                rect: viewport.map_rect(word),
                border_width: self.config.word_border_width,
            });
        }

        primitives
    }

    pub fn render_scene(&self, scene: &QualifiedScene, viewport: ViewportSize) -> Vec<OverlayPrimitive> {
        self.render(&scene.cards, &scene.words, viewport)
    }

    /// Tilt heuristic on an already mapped card, in pixels. Strictly greater
    /// than the threshold counts as skewed.
    pub fn classify(&self, card: &ViewQuad) -> CardTone {
        if card.top_edge_drop() > self.config.skew_threshold_px {
            CardTone::Skewed
        } else {
            CardTone::Normal
        }
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardscan_core::{NormalizedPoint, ViewPoint};

    const SIDE: f64 = 128.0;

    /// Card whose top-right corner sits `drop_px` lower than its top-left once
    /// mapped into a SIDE x SIDE viewport. Power-of-two sizes keep the
    /// arithmetic exact.
    fn tilted_card(drop_px: f64) -> CornerQuad {
        let drop = drop_px / SIDE;
        CornerQuad::new(
            NormalizedPoint::new(0.1, 0.75),
            NormalizedPoint::new(0.9, 0.75 - drop),
            NormalizedPoint::new(0.1, 0.25),
            NormalizedPoint::new(0.9, 0.25 - drop),
        )
    }

    #[test]
    fn test_skew_boundary_is_exclusive() {
        let renderer = OverlayRenderer::default();
        let viewport = ViewportSize::new(SIDE, SIDE);

        let at = renderer.render(&[tilted_card(20.0)], &[], viewport);
        assert_eq!(at[0].tone(), Some(CardTone::Normal));

        let over = renderer.render(&[tilted_card(21.0)], &[], viewport);
        assert_eq!(over[0].tone(), Some(CardTone::Skewed));
    }

    #[test]
    fn test_skew_is_measured_in_pixels() {
        let renderer = OverlayRenderer::default();
        // 10 px in the square viewport, 100 px in one ten times taller
        let card = tilted_card(10.0);

        let small = renderer.render(&[card], &[], ViewportSize::new(SIDE, SIDE));
        let tall = renderer.render(&[card], &[], ViewportSize::new(SIDE, SIDE * 10.0));
        assert_eq!(small[0].tone(), Some(CardTone::Normal));
        assert_eq!(tall[0].tone(), Some(CardTone::Skewed));
    }

    #[test]
    fn test_outline_is_closed_clockwise() {
        let renderer = OverlayRenderer::default();
        let card = CornerQuad::from_rect(&NormalizedRect::new(0.0, 0.0, 1.0, 1.0));
        let primitives = renderer.render(&[card], &[], ViewportSize::new(200.0, 100.0));

        let OverlayPrimitive::CardOutline { points, line_width, .. } = &primitives[0] else {
            panic!("expected a card outline");
        };
        assert_eq!(
            points,
            &[
                ViewPoint::new(0.0, 0.0),
                ViewPoint::new(200.0, 0.0),
                ViewPoint::new(200.0, 100.0),
                ViewPoint::new(0.0, 100.0),
                ViewPoint::new(0.0, 0.0),
            ]
        );
        assert_eq!(*line_width, 4.0);
    }

    #[test]
    fn test_word_highlight_uses_top_edge_as_origin() {
        let renderer = OverlayRenderer::default();
        let word = NormalizedRect::new(0.2, 0.5, 0.4, 0.1);
        let primitives = renderer.render(&[], &[word], ViewportSize::new(100.0, 100.0));

        let OverlayPrimitive::WordHighlight { rect, border_width } = &primitives[0] else {
            panic!("expected a word highlight");
        };
        assert!((rect.x - 20.0).abs() < 1e-9);
        assert!((rect.y - 40.0).abs() < 1e-9);
        assert!((rect.width - 40.0).abs() < 1e-9);
        assert!((rect.height - 10.0).abs() < 1e-9);
        assert_eq!(*border_width, 2.0);
    }
}
