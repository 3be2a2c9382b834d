//! Raster helpers for drawing overlays onto preview images

use crate::Result;
use anyhow::Context;
use cardscan_core::{ViewPoint, ViewRect, ViewportSize};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::Path;

/// Image utility functions for the raster surface
pub struct ImageUtils;

impl ImageUtils {
    /// Solid canvas covering the viewport; at least one pixel on each side
    pub fn blank_canvas(viewport: ViewportSize, color: Rgba<u8>) -> RgbaImage {
        let (width, height) = Self::pixel_size(viewport);
        RgbaImage::from_pixel(width, height, color)
    }

    /// Stretch a preview frame to fill the viewport, as an aspect-fill preview
    /// layer without cropping would.
    pub fn fit_to_viewport(image: &RgbaImage, viewport: ViewportSize) -> RgbaImage {
        let (width, height) = Self::pixel_size(viewport);
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        imageops::resize(image, width, height, imageops::FilterType::Triangle)
    }

    /// Draw an open polyline through `points`, `thickness` pixels wide
    pub fn draw_polyline(image: &mut RgbaImage, points: &[ViewPoint], color: Rgba<u8>, thickness: f32) {
        let offsets = Self::stroke_offsets(thickness);

        for segment in points.windows(2) {
            let (p1, p2) = (segment[0], segment[1]);
            for &offset in &offsets {
                draw_line_segment_mut(
                    image,
                    (p1.x as f32 + offset, p1.y as f32),
                    (p2.x as f32 + offset, p2.y as f32),
                    color,
                );
                draw_line_segment_mut(
                    image,
                    (p1.x as f32, p1.y as f32 + offset),
                    (p2.x as f32, p2.y as f32 + offset),
                    color,
                );
            }
        }
    }

    /// Draw the border of `rect`, growing inwards by `width` pixels.
    /// Rectangles with no positive area are skipped. Edges far off the canvas
    /// are pulled in to one pixel outside it, so they stay invisible.
    pub fn draw_border(image: &mut RgbaImage, rect: &ViewRect, color: Rgba<u8>, width: f32) {
        let rings = width.round().max(1.0) as i64;
        let (canvas_w, canvas_h) = (image.width() as i64, image.height() as i64);

        for inset in 0..rings {
            let Some((left, w)) = Self::clip_span(rect.x, rect.width, inset, canvas_w) else {
                break;
            };
            let Some((top, h)) = Self::clip_span(rect.y, rect.height, inset, canvas_h) else {
                break;
            };
            let r = Rect::at(left, top).of_size(w, h);
            draw_hollow_rect_mut(image, r, color);
        }
    }

    pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
        let path = path.as_ref();
        image
            .save(path)
            .with_context(|| format!("Failed to save image: {:?}", path))
    }

    /// Start and length of one axis of an inset ring, clamped to
    /// `[-1, limit]`. `None` once the ring has no interior left.
    fn clip_span(start: f64, length: f64, inset: i64, limit: i64) -> Option<(i32, u32)> {
        let first = (start.round() as i64).saturating_add(inset);
        let len = (length.round() as i64).saturating_sub(inset.saturating_mul(2));
        if len <= 0 {
            return None;
        }
        let last = first.saturating_add(len - 1);

        let first = first.clamp(-1, limit);
        let last = last.clamp(-1, limit);
        if last < first {
            return None;
        }
        Some((first as i32, (last - first + 1) as u32))
    }

    fn pixel_size(viewport: ViewportSize) -> (u32, u32) {
        (
            viewport.width.round().max(1.0) as u32,
            viewport.height.round().max(1.0) as u32,
        )
    }

    /// Symmetric offsets around the centre line for a stroke of `thickness`
    fn stroke_offsets(thickness: f32) -> Vec<f32> {
        let count = thickness.round().max(1.0) as i32;
        let half = (count - 1) as f32 / 2.0;
        (0..count).map(|i| i as f32 - half).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn test_border_leaves_interior_untouched() {
        let mut canvas = ImageUtils::blank_canvas(ViewportSize::new(40.0, 40.0), BLACK);
        let rect = ViewRect {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 20.0,
        };
        ImageUtils::draw_border(&mut canvas, &rect, RED, 2.0);

        assert_eq!(*canvas.get_pixel(10, 10), RED);
        assert_eq!(*canvas.get_pixel(11, 15), RED);
        assert_eq!(*canvas.get_pixel(20, 20), BLACK);
        assert_eq!(*canvas.get_pixel(5, 5), BLACK);
    }

    #[test]
    fn test_border_with_huge_coordinates_is_clipped() {
        let mut canvas = ImageUtils::blank_canvas(ViewportSize::new(40.0, 40.0), BLACK);

        let far = ViewRect {
            x: 1e12,
            y: f64::MAX,
            width: 1e12,
            height: 1e12,
        };
        ImageUtils::draw_border(&mut canvas, &far, RED, 2.0);
        assert!(canvas.pixels().all(|p| *p == BLACK));

        // Only the top edge of this one is on screen
        let wide = ViewRect {
            x: -1e12,
            y: 5.0,
            width: 2e12,
            height: 10.0,
        };
        ImageUtils::draw_border(&mut canvas, &wide, RED, 1.0);
        assert_eq!(*canvas.get_pixel(20, 5), RED);
        assert_eq!(*canvas.get_pixel(20, 14), RED);
        assert_eq!(*canvas.get_pixel(0, 10), BLACK);
        assert_eq!(*canvas.get_pixel(20, 10), BLACK);
    }

    #[test]
    fn test_polyline_off_screen_does_not_panic() {
        let mut canvas = ImageUtils::blank_canvas(ViewportSize::new(10.0, 10.0), BLACK);
        let points = [
            ViewPoint::new(-50.0, -50.0),
            ViewPoint::new(5.0, 5.0),
            ViewPoint::new(500.0, 5.0),
        ];
        ImageUtils::draw_polyline(&mut canvas, &points, RED, 3.0);
        assert_eq!(*canvas.get_pixel(5, 5), RED);
    }

    #[test]
    fn test_fit_to_viewport_resizes() {
        let frame = RgbaImage::from_pixel(64, 48, BLACK);
        let fitted = ImageUtils::fit_to_viewport(&frame, ViewportSize::new(32.0, 24.0));
        assert_eq!(fitted.dimensions(), (32, 24));
    }

    #[test]
    fn test_stroke_offsets_are_centred() {
        assert_eq!(ImageUtils::stroke_offsets(1.0), vec![0.0]);
        assert_eq!(ImageUtils::stroke_offsets(3.0), vec![-1.0, 0.0, 1.0]);
    }
}
