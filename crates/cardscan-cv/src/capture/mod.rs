//! Camera frames and the capture session

pub mod session;

pub use session::CaptureSession;

use cardscan_core::ViewportSize;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// 3x3 camera intrinsic matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub matrix: [[f32; 3]; 3],
}

impl CameraIntrinsics {
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self {
            matrix: [[fx, 0.0, cx], [0.0, fy, cy], [0.0, 0.0, 1.0]],
        }
    }
}

/// One raw camera frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Monotonic sequence number assigned by the source
    pub id: u64,
    pub image: RgbaImage,
    pub intrinsics: Option<CameraIntrinsics>,
}

impl Frame {
    pub fn new(id: u64, image: RgbaImage) -> Self {
        Self {
            id,
            image,
            intrinsics: None,
        }
    }

    pub fn with_intrinsics(mut self, intrinsics: CameraIntrinsics) -> Self {
        self.intrinsics = Some(intrinsics);
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> ViewportSize {
        ViewportSize::new(self.width() as f64, self.height() as f64)
    }
}
