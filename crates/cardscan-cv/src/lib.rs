//! Cardscan Computer Vision Library
//!
//! Wires camera frames to face, rectangle and text detectors and turns their
//! normalized observations into overlay primitives for a live preview.

pub mod capture;
pub mod detection;
pub mod error;
pub mod observation;
pub mod overlay;
pub mod utils;

// Re-export commonly used types
pub use capture::{CameraIntrinsics, CaptureSession, Frame};
pub use detection::{
    DetectionEvent, DetectionPipeline, DetectorSet, FrameDispatcher, FrameResultSet,
    PipelineConfig, PipelineStats, QualifiedScene,
};
pub use error::{CaptureError, DetectorError};
pub use observation::{FaceObservation, RectangleObservation, TextObservation};
pub use overlay::{CardTone, OverlayCanvas, OverlayPrimitive, OverlayRenderer, RasterSurface};

// Re-export the geometry core for convenience
pub use cardscan_core as geometry;

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the CV system
pub mod traits {
    use crate::capture::Frame;
    use crate::detection::config::Orientation;
    use crate::error::{CaptureError, DetectorError};
    use crate::overlay::OverlayPrimitive;
    use cardscan_core::ViewportSize;

    /// One detection call: the frame, the fixed orientation hint and the
    /// detector's own options.
    pub struct DetectionRequest<'a, O> {
        pub frame: &'a Frame,
        pub orientation: Orientation,
        pub options: &'a O,
    }

    /// Narrow capability interface over an opaque vision detector.
    ///
    /// Implementations may be platform detectors or test doubles returning
    /// fixtures. Calls can come from any worker thread.
    pub trait Detector: Send + Sync {
        type Options: Send + Sync;
        type Observation: Send + 'static;

        fn name(&self) -> &str;

        fn detect(
            &self,
            request: &DetectionRequest<'_, Self::Options>,
        ) -> Result<Vec<Self::Observation>, DetectorError>;
    }

    /// Something overlay primitives can be drawn onto.
    ///
    /// Owned by the rendering sequencer; never touched from detector threads.
    pub trait DisplaySurface {
        fn viewport(&self) -> ViewportSize;

        fn add_primitive(&mut self, primitive: OverlayPrimitive);

        /// Remove every overlay primitive. The preview layer stays.
        fn clear_overlays(&mut self);

        /// Replace the base preview layer with the latest camera frame
        fn update_preview(&mut self, _frame: &Frame) {}
    }

    /// Push-style camera: opened once, then polled by the capture thread.
    pub trait CameraSource: Send {
        fn open(&mut self) -> Result<(), CaptureError>;

        /// Next frame, or `None` once the source is exhausted
        fn next_frame(&mut self) -> Option<Frame>;
    }
}
