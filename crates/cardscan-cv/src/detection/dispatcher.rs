//! Fans each camera frame out to the three detectors
//!
//! Runs on the capture thread. Detector jobs never touch pipeline state; they
//! post their results back to the sequencer as [`DetectionEvent`]s.

use super::config::{
    FaceDetectionConfig, PipelineConfig, RectangleDetectionConfig, TextDetectionConfig,
};
use crate::capture::Frame;
use crate::error::DetectorError;
use crate::observation::{FaceObservation, RectangleObservation, TextObservation};
use crate::traits::{DetectionRequest, Detector};
use log::trace;
use std::sync::Arc;
use std::sync::mpsc::Sender;

pub type FaceDetector = dyn Detector<Options = FaceDetectionConfig, Observation = FaceObservation>;
pub type RectangleDetector =
    dyn Detector<Options = RectangleDetectionConfig, Observation = RectangleObservation>;
pub type TextDetector = dyn Detector<Options = TextDetectionConfig, Observation = TextObservation>;

/// Message from the capture side to the rendering sequencer
#[derive(Debug)]
pub enum DetectionEvent {
    /// New camera frame for the preview layer
    Preview(Arc<Frame>),
    Faces(Result<Vec<FaceObservation>, DetectorError>),
    Cards(Result<Vec<RectangleObservation>, DetectorError>),
    Words(Result<Vec<TextObservation>, DetectorError>),
}

/// The three detectors the pipeline drives
pub struct DetectorSet {
    pub face: Box<FaceDetector>,
    pub rectangle: Box<RectangleDetector>,
    pub text: Box<TextDetector>,
}

impl DetectorSet {
    pub fn new<F, R, T>(face: F, rectangle: R, text: T) -> Self
    where
        F: Detector<Options = FaceDetectionConfig, Observation = FaceObservation> + 'static,
        R: Detector<Options = RectangleDetectionConfig, Observation = RectangleObservation> + 'static,
        T: Detector<Options = TextDetectionConfig, Observation = TextObservation> + 'static,
    {
        Self {
            face: Box::new(face),
            rectangle: Box::new(rectangle),
            text: Box::new(text),
        }
    }
}

/// Capture-side handle. Cheap to clone; every clone feeds the same sequencer.
#[derive(Clone)]
pub struct FrameDispatcher {
    detectors: Arc<DetectorSet>,
    config: Arc<PipelineConfig>,
    sender: Sender<DetectionEvent>,
}

impl FrameDispatcher {
    pub(crate) fn new(
        detectors: Arc<DetectorSet>,
        config: Arc<PipelineConfig>,
        sender: Sender<DetectionEvent>,
    ) -> Self {
        Self {
            detectors,
            config,
            sender,
        }
    }

    /// Hand one frame to the preview and to all three detectors.
    ///
    /// Fire and forget: with the `parallel` feature the detectors run on the
    /// rayon pool and complete in any order, otherwise they run inline on the
    /// calling thread. Results reach the sequencer either way.
    pub fn dispatch(&self, frame: Frame) {
        let frame = Arc::new(frame);
        trace!("Dispatching frame {}", frame.id);
        self.post(DetectionEvent::Preview(Arc::clone(&frame)));

        let job = self.job_context(&frame);
        spawn_job(move || {
            let result = job.detectors.text.detect(&job.request(&job.config.text));
            job.post(DetectionEvent::Words(result));
        });

        let job = self.job_context(&frame);
        spawn_job(move || {
            let result = job.detectors.rectangle.detect(&job.request(&job.config.rectangle));
            job.post(DetectionEvent::Cards(result));
        });

        let job = self.job_context(&frame);
        spawn_job(move || {
            let result = job.detectors.face.detect(&job.request(&job.config.face));
            job.post(DetectionEvent::Faces(result));
        });
    }

    fn job_context(&self, frame: &Arc<Frame>) -> JobContext {
        JobContext {
            frame: Arc::clone(frame),
            detectors: Arc::clone(&self.detectors),
            config: Arc::clone(&self.config),
            sender: self.sender.clone(),
        }
    }

    fn post(&self, event: DetectionEvent) {
        if self.sender.send(event).is_err() {
            trace!("Sequencer gone, dropping event");
        }
    }
}

/// Everything a detector job owns while it runs off-thread
struct JobContext {
    frame: Arc<Frame>,
    detectors: Arc<DetectorSet>,
    config: Arc<PipelineConfig>,
    sender: Sender<DetectionEvent>,
}

impl JobContext {
    fn request<'a, O>(&'a self, options: &'a O) -> DetectionRequest<'a, O> {
        DetectionRequest {
            frame: &self.frame,
            orientation: self.config.orientation,
            options,
        }
    }

    fn post(&self, event: DetectionEvent) {
        if self.sender.send(event).is_err() {
            trace!("Sequencer gone, dropping result for frame {}", self.frame.id);
        }
    }
}

fn spawn_job<F>(job: F)
where
    F: FnOnce() + Send + 'static,
{
    #[cfg(feature = "parallel")]
    {
        rayon::spawn(job);
    }

    #[cfg(not(feature = "parallel"))]
    {
        job();
    }
}
