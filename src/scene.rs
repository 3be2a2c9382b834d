//! Scripted card scene and the detectors that "see" it
//!
//! Stands in for platform vision detectors: each detector reads the scene at
//! the frame's sequence number and reports what a real detector would, with a
//! little positional noise and the occasional failure.

use cardscan_cv::detection::config::{
    FaceDetectionConfig, RectangleDetectionConfig, TextDetectionConfig,
};
use cardscan_cv::geometry::{CornerQuad, NormalizedPoint, NormalizedRect};
use cardscan_cv::traits::{DetectionRequest, Detector};
use cardscan_cv::{
    DetectorError, DetectorSet, FaceObservation, RectangleObservation, TextObservation,
};
use rand::Rng;
use std::sync::Arc;

/// Where the card, its photo and its printed words are at a given frame
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub card: CornerQuad,
    pub face: Option<NormalizedRect>,
    pub words: Vec<Vec<NormalizedRect>>,
}

/// A card held in front of the camera, slowly rocking back and forth
#[derive(Debug, Clone)]
pub struct CardScene {
    center: NormalizedPoint,
    half_width: f64,
    half_height: f64,
    /// Peak tilt in radians
    max_tilt: f64,
    /// Frames for one full rock
    period: u64,
    /// Every n-th frame the face is hidden (holder's thumb over the photo)
    face_gap: u64,
}

impl Default for CardScene {
    fn default() -> Self {
        Self {
            center: NormalizedPoint::new(0.5, 0.5),
            half_width: 0.4,
            half_height: 0.25,
            max_tilt: 0.12,
            period: 24,
            face_gap: 9,
        }
    }
}

impl CardScene {
    pub fn tilt_at(&self, frame_id: u64) -> f64 {
        let phase = (frame_id % self.period) as f64 / self.period as f64;
        self.max_tilt * (phase * std::f64::consts::TAU).sin()
    }

    pub fn at(&self, frame_id: u64) -> SceneSnapshot {
        let tilt = self.tilt_at(frame_id);
        let card = CornerQuad::new(
            self.place(-1.0, 1.0, tilt),
            self.place(1.0, 1.0, tilt),
            self.place(-1.0, -1.0, tilt),
            self.place(1.0, -1.0, tilt),
        );

        // Photo on the left third, text lines on the right, laid out on the
        // untilted card and then bounded.
        let face = (frame_id % self.face_gap != self.face_gap - 1)
            .then(|| self.region(-0.85, -0.6, -0.25, 0.5, tilt));

        let words = [(0.0, 0.35), (0.0, 0.05), (0.4, 0.05)]
            .iter()
            .map(|&(u, v)| self.glyphs(u, v, 4, tilt))
            .collect();

        SceneSnapshot { card, face, words }
    }

    /// Card-local `(u, v)` in [-1, 1] to normalized image space
    fn place(&self, u: f64, v: f64, tilt: f64) -> NormalizedPoint {
        let (sin, cos) = tilt.sin_cos();
        let dx = u * self.half_width;
        let dy = v * self.half_height;
        NormalizedPoint::new(
            self.center.x + dx * cos - dy * sin,
            self.center.y + dx * sin + dy * cos,
        )
    }

    fn region(&self, u0: f64, v0: f64, u1: f64, v1: f64, tilt: f64) -> NormalizedRect {
        CornerQuad::new(
            self.place(u0, v1, tilt),
            self.place(u1, v1, tilt),
            self.place(u0, v0, tilt),
            self.place(u1, v0, tilt),
        )
        .bounding_box()
    }

    fn glyphs(&self, u: f64, v: f64, count: usize, tilt: f64) -> Vec<NormalizedRect> {
        const GLYPH_WIDTH: f64 = 0.08;
        const GLYPH_HEIGHT: f64 = 0.15;

        (0..count)
            .map(|i| {
                let left = u + i as f64 * GLYPH_WIDTH;
                self.region(left, v, left + GLYPH_WIDTH, v + GLYPH_HEIGHT, tilt)
            })
            .collect()
    }
}

fn enclosing(rects: &[NormalizedRect]) -> Option<NormalizedRect> {
    let (first, rest) = rects.split_first()?;
    Some(rest.iter().fold(*first, |acc, r| {
        NormalizedRect::from_edges(
            acc.min_x().min(r.min_x()),
            acc.min_y().min(r.min_y()),
            acc.max_x().max(r.max_x()),
            acc.max_y().max(r.max_y()),
        )
    }))
}

fn jitter(rng: &mut impl Rng, amount: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-amount..amount)
}

fn jitter_rect(rng: &mut impl Rng, rect: &NormalizedRect, amount: f64) -> NormalizedRect {
    NormalizedRect::new(
        rect.x + jitter(rng, amount),
        rect.y + jitter(rng, amount),
        rect.width,
        rect.height,
    )
}

fn jitter_point(rng: &mut impl Rng, p: &NormalizedPoint, amount: f64) -> NormalizedPoint {
    NormalizedPoint::new(p.x + jitter(rng, amount), p.y + jitter(rng, amount))
}

pub struct SceneFaceDetector {
    scene: Arc<CardScene>,
    noise: f64,
}

impl Detector for SceneFaceDetector {
    type Options = FaceDetectionConfig;
    type Observation = FaceObservation;

    fn name(&self) -> &str {
        "face"
    }

    fn detect(
        &self,
        request: &DetectionRequest<'_, FaceDetectionConfig>,
    ) -> Result<Vec<FaceObservation>, DetectorError> {
        let snapshot = self.scene.at(request.frame.id);
        let mut rng = rand::thread_rng();

        Ok(snapshot
            .face
            .map(|face| {
                FaceObservation::new(jitter_rect(&mut rng, &face, self.noise))
                    .with_confidence(rng.gen_range(0.8..1.0))
            })
            .into_iter()
            .collect())
    }
}

pub struct SceneRectangleDetector {
    scene: Arc<CardScene>,
    noise: f64,
    failure_rate: f64,
}

impl Detector for SceneRectangleDetector {
    type Options = RectangleDetectionConfig;
    type Observation = RectangleObservation;

    fn name(&self) -> &str {
        "rectangle"
    }

    fn detect(
        &self,
        request: &DetectionRequest<'_, RectangleDetectionConfig>,
    ) -> Result<Vec<RectangleObservation>, DetectorError> {
        let mut rng = rand::thread_rng();
        if self.failure_rate > 0.0 && rng.gen_bool(self.failure_rate.min(1.0)) {
            return Err(DetectorError::new(self.name(), "request timed out"));
        }

        let snapshot = self.scene.at(request.frame.id);
        let card = CornerQuad::new(
            jitter_point(&mut rng, &snapshot.card.top_left, self.noise),
            jitter_point(&mut rng, &snapshot.card.top_right, self.noise),
            jitter_point(&mut rng, &snapshot.card.bottom_left, self.noise),
            jitter_point(&mut rng, &snapshot.card.bottom_right, self.noise),
        );

        // Background clutter the detector limits should discard
        let candidates = vec![
            RectangleObservation::new(card).with_confidence(rng.gen_range(0.92..1.0)),
            RectangleObservation::new(CornerQuad::from_rect(&NormalizedRect::new(
                0.02, 0.9, 0.9, 0.03,
            )))
            .with_confidence(0.97),
            RectangleObservation::new(CornerQuad::from_rect(&NormalizedRect::new(
                0.6, 0.05, 0.3, 0.2,
            )))
            .with_confidence(rng.gen_range(0.3..0.8)),
        ];

        Ok(request.options.apply(candidates))
    }
}

pub struct SceneTextDetector {
    scene: Arc<CardScene>,
}

impl Detector for SceneTextDetector {
    type Options = TextDetectionConfig;
    type Observation = TextObservation;

    fn name(&self) -> &str {
        "text"
    }

    fn detect(
        &self,
        request: &DetectionRequest<'_, TextDetectionConfig>,
    ) -> Result<Vec<TextObservation>, DetectorError> {
        let snapshot = self.scene.at(request.frame.id);

        Ok(snapshot
            .words
            .into_iter()
            .filter_map(|glyphs| {
                let bounds = enclosing(&glyphs)?;
                let word = TextObservation::new(bounds);
                Some(if request.options.report_character_boxes {
                    word.with_character_boxes(glyphs.iter().map(CornerQuad::from_rect).collect())
                } else {
                    word
                })
            })
            .collect())
    }
}

/// Detector set over a shared scene
pub fn scene_detectors(scene: Arc<CardScene>, noise: f64, failure_rate: f64) -> DetectorSet {
    DetectorSet::new(
        SceneFaceDetector {
            scene: Arc::clone(&scene),
            noise,
        },
        SceneRectangleDetector {
            scene: Arc::clone(&scene),
            noise,
            failure_rate,
        },
        SceneTextDetector { scene },
    )
}
