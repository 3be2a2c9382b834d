use thiserror::Error;

/// Failure reported by a single detector invocation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{detector} detection failed: {message}")]
pub struct DetectorError {
    pub detector: String,
    pub message: String,
}

impl DetectorError {
    pub fn new(detector: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            detector: detector.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("failed to spawn capture thread: {0}")]
    Spawn(#[from] std::io::Error),
}
