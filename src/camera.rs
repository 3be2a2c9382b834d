//! Synthetic camera rendering the scripted scene into preview frames

use crate::scene::CardScene;
use cardscan_cv::geometry::{NormalizedRect, ViewportSize};
use cardscan_cv::traits::CameraSource;
use cardscan_cv::{CameraIntrinsics, CaptureError, Frame};
use image::{Rgba, RgbaImage};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const BACKDROP: Rgba<u8> = Rgba([38, 40, 46, 255]);
const CARD: Rgba<u8> = Rgba([226, 222, 210, 255]);
const PHOTO: Rgba<u8> = Rgba([150, 120, 100, 255]);
const INK: Rgba<u8> = Rgba([40, 40, 40, 255]);

pub struct SyntheticCamera {
    scene: Arc<CardScene>,
    width: u32,
    height: u32,
    frames: u64,
    interval: Option<Duration>,
    next_id: u64,
}

impl SyntheticCamera {
    pub fn new(scene: Arc<CardScene>, width: u32, height: u32, frames: u64) -> Self {
        Self {
            scene,
            width,
            height,
            frames,
            interval: None,
            next_id: 0,
        }
    }

    /// Pace delivery like a real sensor
    pub fn with_fps(mut self, fps: u32) -> Self {
        if fps > 0 {
            self.interval = Some(Duration::from_secs_f64(1.0 / fps as f64));
        }
        self
    }

    fn render(&self, frame_id: u64) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(self.width, self.height, BACKDROP);
        let snapshot = self.scene.at(frame_id);

        self.fill(&mut image, &snapshot.card.bounding_box(), CARD);
        if let Some(face) = &snapshot.face {
            self.fill(&mut image, face, PHOTO);
        }
        for glyph in snapshot.words.iter().flatten() {
            self.fill(&mut image, glyph, INK);
        }

        image
    }

    /// Paint a normalized box, clipped to the frame
    fn fill(&self, image: &mut RgbaImage, rect: &NormalizedRect, color: Rgba<u8>) {
        let viewport = ViewportSize::new(self.width as f64, self.height as f64);
        let area = viewport.map_rect(rect);

        let x0 = area.x.max(0.0) as u32;
        let y0 = area.y.max(0.0) as u32;
        let x1 = ((area.x + area.width).max(0.0) as u32).min(self.width);
        let y1 = ((area.y + area.height).max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                image.put_pixel(x, y, color);
            }
        }
    }
}

impl CameraSource for SyntheticCamera {
    fn open(&mut self) -> Result<(), CaptureError> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::DeviceUnavailable(format!(
                "unsupported capture size {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    fn next_frame(&mut self) -> Option<Frame> {
        if self.next_id >= self.frames {
            return None;
        }
        if let Some(interval) = self.interval {
            thread::sleep(interval);
        }

        let id = self.next_id;
        self.next_id += 1;

        let (w, h) = (self.width as f32, self.height as f32);
        Some(Frame::new(id, self.render(id)).with_intrinsics(CameraIntrinsics::new(w, w, w / 2.0, h / 2.0)))
    }
}
