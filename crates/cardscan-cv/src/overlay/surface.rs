//! Display surfaces
//!
//! [`OverlayCanvas`] only records what was drawn. [`RasterSurface`] keeps the
//! latest camera frame as its base preview layer and composes the overlay on
//! top of it.

use super::{CardTone, OverlayPrimitive};
use crate::Result;
use crate::capture::Frame;
use crate::detection::config::OverlayConfig;
use crate::traits::DisplaySurface;
use crate::utils::ImageUtils;
use cardscan_core::ViewportSize;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// In-memory surface that records the primitives currently on screen
#[derive(Debug, Clone, Default)]
pub struct OverlayCanvas {
    viewport: ViewportSize,
    primitives: Vec<OverlayPrimitive>,
    clears: usize,
    previews: usize,
}

impl OverlayCanvas {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    pub fn primitives(&self) -> &[OverlayPrimitive] {
        &self.primitives
    }

    pub fn card_outlines(&self) -> impl Iterator<Item = &OverlayPrimitive> {
        self.primitives.iter().filter(|p| p.is_card())
    }

    pub fn word_highlights(&self) -> impl Iterator<Item = &OverlayPrimitive> {
        self.primitives.iter().filter(|p| p.is_word())
    }

    /// How many times the overlay was cleared, i.e. how many renders happened
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn preview_count(&self) -> usize {
        self.previews
    }
}

impl DisplaySurface for OverlayCanvas {
    fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    fn add_primitive(&mut self, primitive: OverlayPrimitive) {
        self.primitives.push(primitive);
    }

    fn clear_overlays(&mut self) {
        self.primitives.clear();
        self.clears += 1;
    }

    fn update_preview(&mut self, _frame: &Frame) {
        self.previews += 1;
    }
}

/// Layered raster surface: a preview layer that is never removed, plus the
/// current overlay primitives.
pub struct RasterSurface {
    viewport: ViewportSize,
    preview: Option<RgbaImage>,
    overlays: Vec<OverlayPrimitive>,
    style: OverlayConfig,
}

impl RasterSurface {
    pub fn new(viewport: ViewportSize, style: OverlayConfig) -> Self {
        Self {
            viewport,
            preview: None,
            overlays: Vec::new(),
            style,
        }
    }

    /// The view was laid out again; the preview layer follows its bounds
    pub fn resize(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    pub fn overlays(&self) -> &[OverlayPrimitive] {
        &self.overlays
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Flatten the preview and overlay layers into one image the size of the
    /// viewport. A collapsed viewport gets the preview only.
    pub fn compose(&self) -> RgbaImage {
        let mut canvas = match &self.preview {
            Some(preview) => ImageUtils::fit_to_viewport(preview, self.viewport),
            None => ImageUtils::blank_canvas(self.viewport, Rgba([0, 0, 0, 255])),
        };

        if self.viewport.is_empty() {
            return canvas;
        }

        for primitive in &self.overlays {
            match primitive {
                OverlayPrimitive::CardOutline {
                    points,
                    tone,
                    line_width,
                } => {
                    let color = match tone {
                        CardTone::Normal => self.style.normal_color,
                        CardTone::Skewed => self.style.skewed_color,
                    };
                    ImageUtils::draw_polyline(&mut canvas, points, Rgba(color), *line_width);
                }
                OverlayPrimitive::WordHighlight { rect, border_width } => {
                    ImageUtils::draw_border(&mut canvas, rect, Rgba(self.style.word_color), *border_width);
                }
            }
        }

        canvas
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ImageUtils::save_png(&self.compose(), path)
    }
}

impl DisplaySurface for RasterSurface {
    fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    fn add_primitive(&mut self, primitive: OverlayPrimitive) {
        self.overlays.push(primitive);
    }

    fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    fn update_preview(&mut self, frame: &Frame) {
        self.preview = Some(frame.image.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardscan_core::{ViewPoint, ViewRect};

    fn outline(tone: CardTone) -> OverlayPrimitive {
        OverlayPrimitive::CardOutline {
            points: [
                ViewPoint::new(4.0, 4.0),
                ViewPoint::new(28.0, 4.0),
                ViewPoint::new(28.0, 28.0),
                ViewPoint::new(4.0, 28.0),
                ViewPoint::new(4.0, 4.0),
            ],
            tone,
            line_width: 1.0,
        }
    }

    #[test]
    fn test_clear_keeps_preview_layer() {
        let mut surface = RasterSurface::new(ViewportSize::new(32.0, 32.0), OverlayConfig::default());
        let frame = Frame::new(0, RgbaImage::from_pixel(32, 32, Rgba([9, 9, 9, 255])));

        surface.update_preview(&frame);
        surface.add_primitive(outline(CardTone::Normal));
        surface.clear_overlays();

        assert!(surface.has_preview());
        assert!(surface.overlays().is_empty());
        assert_eq!(*surface.compose().get_pixel(4, 4), Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_compose_uses_tone_colours() {
        let style = OverlayConfig::default();
        let mut surface = RasterSurface::new(ViewportSize::new(32.0, 32.0), style.clone());

        surface.add_primitive(outline(CardTone::Skewed));
        assert_eq!(*surface.compose().get_pixel(16, 4), Rgba(style.skewed_color));

        surface.clear_overlays();
        surface.add_primitive(outline(CardTone::Normal));
        surface.add_primitive(OverlayPrimitive::WordHighlight {
            rect: ViewRect {
                x: 10.0,
                y: 10.0,
                width: 8.0,
                height: 8.0,
            },
            border_width: 1.0,
        });
        let image = surface.compose();
        assert_eq!(*image.get_pixel(16, 4), Rgba(style.normal_color));
        assert_eq!(*image.get_pixel(10, 12), Rgba(style.word_color));
    }

    #[test]
    fn test_collapsed_viewport_draws_no_overlay() {
        let mut surface = RasterSurface::new(ViewportSize::new(0.0, 0.0), OverlayConfig::default());
        surface.add_primitive(outline(CardTone::Skewed));

        let image = surface.compose();
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_canvas_counts_clears() {
        let mut canvas = OverlayCanvas::new(ViewportSize::new(10.0, 10.0));
        canvas.add_primitive(outline(CardTone::Normal));
        canvas.clear_overlays();
        canvas.clear_overlays();

        assert!(canvas.primitives().is_empty());
        assert_eq!(canvas.clear_count(), 2);
        assert_eq!(canvas.viewport(), ViewportSize::new(10.0, 10.0));
    }
}
