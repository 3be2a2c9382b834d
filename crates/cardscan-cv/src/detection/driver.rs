//! Rendering sequencer
//!
//! [`DetectionPipeline`] is the single owner of the result slots and the
//! display surface. Detector results arrive as messages and are applied one
//! at a time, so the surface is only ever mutated from the thread that drives
//! the pipeline.

use super::config::PipelineConfig;
use super::dispatcher::{DetectionEvent, DetectorSet, FrameDispatcher};
use super::filter::qualify;
use super::slots::{FrameResultSet, SlotUpdate};
use crate::overlay::OverlayRenderer;
use crate::traits::DisplaySurface;
use log::{debug, info, trace};
use serde::Serialize;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// Running counters for one pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub frames_previewed: u64,
    pub results_received: u64,
    pub detector_failures: u64,
    pub renders: u64,
    pub primitives_drawn: u64,
}

pub struct DetectionPipeline<S: DisplaySurface> {
    config: Arc<PipelineConfig>,
    results: FrameResultSet,
    renderer: OverlayRenderer,
    surface: S,
    receiver: Receiver<DetectionEvent>,
    stats: PipelineStats,
}

impl<S: DisplaySurface> DetectionPipeline<S> {
    /// Build the sequencer and the capture-side dispatcher that feeds it.
    ///
    /// The pipeline keeps running until every dispatcher clone is dropped.
    pub fn new(config: PipelineConfig, detectors: DetectorSet, surface: S) -> (Self, FrameDispatcher) {
        let config = Arc::new(config);
        let (sender, receiver) = mpsc::channel();
        let dispatcher = FrameDispatcher::new(Arc::new(detectors), Arc::clone(&config), sender);

        let pipeline = Self {
            renderer: OverlayRenderer::new(config.overlay.clone()),
            config,
            results: FrameResultSet::new(),
            surface,
            receiver,
            stats: PipelineStats::default(),
        };

        (pipeline, dispatcher)
    }

    /// Apply one event. Returns the number of primitives drawn when the event
    /// triggered a render.
    pub fn handle_event(&mut self, event: DetectionEvent) -> Option<usize> {
        let update = match event {
            DetectionEvent::Preview(frame) => {
                self.stats.frames_previewed += 1;
                self.surface.update_preview(&frame);
                return None;
            }
            DetectionEvent::Faces(result) => self.results.update_faces(result),
            DetectionEvent::Cards(result) => self.results.update_cards(result),
            DetectionEvent::Words(result) => self.results.update_words(result),
        };

        self.stats.results_received += 1;
        if update == SlotUpdate::Unchanged {
            self.stats.detector_failures += 1;
            return None;
        }

        if !self.results.is_renderable() {
            trace!("Waiting for faces and cards before rendering");
            return None;
        }

        Some(self.render())
    }

    /// Drain whatever is queued without blocking. Returns the number of events
    /// handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return handled,
            }
        }
    }

    /// Wait up to `timeout` for the next event and apply it. Returns `false`
    /// once every dispatcher is gone and the queue is empty.
    pub fn process_next(&mut self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Block until every dispatcher has been dropped, applying events as they
    /// arrive.
    pub fn run(&mut self) {
        while let Ok(event) = self.receiver.recv() {
            self.handle_event(event);
        }
        info!(
            "Pipeline drained: {} frames, {} results, {} renders",
            self.stats.frames_previewed, self.stats.results_received, self.stats.renders
        );
    }

    fn render(&mut self) -> usize {
        let scene = qualify(&self.results, &self.config.filter);
        let viewport = self.surface.viewport();
        let primitives = self.renderer.render_scene(&scene, viewport);
        let count = primitives.len();

        self.surface.clear_overlays();
        for primitive in primitives {
            self.surface.add_primitive(primitive);
        }

        self.stats.renders += 1;
        self.stats.primitives_drawn += count as u64;
        debug!(
            "Rendered {} cards and {} words into {}x{}",
            scene.cards.len(),
            scene.words.len(),
            viewport.width,
            viewport.height
        );
        count
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn results(&self) -> &FrameResultSet {
        &self.results
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
