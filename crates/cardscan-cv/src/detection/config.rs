//! Pipeline configuration

use crate::Result;
use crate::observation::RectangleObservation;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main pipeline configuration, built once at startup and shared by reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub orientation: Orientation,
    pub face: FaceDetectionConfig,
    pub rectangle: RectangleDetectionConfig,
    pub text: TextDetectionConfig,
    pub filter: FilterConfig,
    pub overlay: OverlayConfig,
}

/// Orientation hint handed to every detector, EXIF numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    #[default]
    RightMirrored,
    Left,
}

impl Orientation {
    pub fn exif_value(&self) -> u8 {
        match self {
            Orientation::Up => 1,
            Orientation::UpMirrored => 2,
            Orientation::Down => 3,
            Orientation::DownMirrored => 4,
            Orientation::LeftMirrored => 5,
            Orientation::Right => 6,
            Orientation::RightMirrored => 7,
            Orientation::Left => 8,
        }
    }
}

/// Face detection runs with detector defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceDetectionConfig {}

/// Rectangle (card) detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleDetectionConfig {
    pub max_observations: usize,
    pub min_confidence: f32,
    /// Shorter side over longer side
    pub min_aspect_ratio: f64,
}

impl Default for RectangleDetectionConfig {
    fn default() -> Self {
        Self {
            max_observations: 2,
            min_confidence: 0.9,
            min_aspect_ratio: 0.2,
        }
    }
}

impl RectangleDetectionConfig {
    pub fn admits(&self, observation: &RectangleObservation) -> bool {
        observation.confidence >= self.min_confidence
            && observation.quad.aspect_ratio() >= self.min_aspect_ratio
    }

    /// Apply the limits to raw candidates: drop those below confidence or
    /// aspect ratio, keep the most confident `max_observations`.
    pub fn apply(&self, mut candidates: Vec<RectangleObservation>) -> Vec<RectangleObservation> {
        candidates.retain(|candidate| self.admits(candidate));
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        candidates.truncate(self.max_observations);
        candidates
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDetectionConfig {
    pub report_character_boxes: bool,
}

impl Default for TextDetectionConfig {
    fn default() -> Self {
        Self {
            report_character_boxes: true,
        }
    }
}

/// Containment filter policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Emit a card once even when it contains several faces. Off by default:
    /// a card is drawn once per face it contains.
    pub deduplicate_cards: bool,
}

/// Overlay styling and the skew heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Pixel drop between the two top corners above which a card counts as skewed
    pub skew_threshold_px: f64,
    pub card_line_width: f32,
    pub word_border_width: f32,
    pub normal_color: [u8; 4],
    pub skewed_color: [u8; 4],
    pub word_color: [u8; 4],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            skew_threshold_px: 20.0,
            card_line_width: 4.0,
            word_border_width: 2.0,
            normal_color: [0, 255, 0, 255],
            skewed_color: [255, 0, 0, 255],
            word_color: [0, 0, 255, 255],
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; missing fields fall back to defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;

        Self::from_json_str(&raw).with_context(|| format!("Invalid config in {:?}", path))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse pipeline config")
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize pipeline config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardscan_core::{CornerQuad, NormalizedRect};

    fn card(width: f64, height: f64, confidence: f32) -> RectangleObservation {
        RectangleObservation::new(CornerQuad::from_rect(&NormalizedRect::new(
            0.0, 0.0, width, height,
        )))
        .with_confidence(confidence)
    }

    #[test]
    fn test_defaults_match_detector_setup() {
        let config = PipelineConfig::default();
        assert_eq!(config.rectangle.max_observations, 2);
        assert_eq!(config.rectangle.min_confidence, 0.9);
        assert_eq!(config.rectangle.min_aspect_ratio, 0.2);
        assert!(config.text.report_character_boxes);
        assert_eq!(config.orientation, Orientation::RightMirrored);
        assert_eq!(config.overlay.skew_threshold_px, 20.0);
        assert!(!config.filter.deduplicate_cards);
    }

    #[test]
    fn test_rectangle_limits() {
        let config = RectangleDetectionConfig::default();
        let kept = config.apply(vec![
            card(0.5, 0.3, 0.91),
            card(0.5, 0.3, 0.5),  // low confidence
            card(0.9, 0.1, 0.99), // too thin
            card(0.4, 0.3, 0.95),
            card(0.3, 0.3, 0.93),
        ]);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].confidence, 0.95);
        assert_eq!(kept[1].confidence, 0.93);
    }

    #[test]
    fn test_partial_json_uses_defaults() -> Result<()> {
        let config = PipelineConfig::from_json_str(
            r#"{ "filter": { "deduplicate_cards": true }, "overlay": { "skew_threshold_px": 12.5 } }"#,
        )?;

        assert!(config.filter.deduplicate_cards);
        assert_eq!(config.overlay.skew_threshold_px, 12.5);
        assert_eq!(config.overlay.card_line_width, 4.0);
        assert_eq!(config.rectangle, RectangleDetectionConfig::default());
        Ok(())
    }

    #[test]
    fn test_json_round_trip() -> Result<()> {
        let mut config = PipelineConfig::default();
        config.orientation = Orientation::Right;
        let restored = PipelineConfig::from_json_str(&config.to_json_string()?)?;
        assert_eq!(restored.orientation, Orientation::Right);
        assert_eq!(restored.overlay, config.overlay);
        Ok(())
    }
}
