//! Background capture loop feeding the frame dispatcher

use crate::detection::FrameDispatcher;
use crate::error::CaptureError;
use crate::traits::CameraSource;
use log::{debug, error, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// Running capture session. Frames are pulled from the source on a dedicated
/// thread and pushed straight into the dispatcher; that thread never blocks on
/// detection.
pub struct CaptureSession {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
}

impl CaptureSession {
    /// Open the camera and start the producer thread.
    ///
    /// A camera that cannot be opened is reported as
    /// [`CaptureError::DeviceUnavailable`]; nothing is spawned in that case.
    pub fn start<C>(mut source: C, dispatcher: FrameDispatcher) -> Result<Self, CaptureError>
    where
        C: CameraSource + 'static,
    {
        source.open()?;

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("cardscan-capture".to_string())
            .spawn(move || {
                let mut delivered = 0u64;
                while !stop_flag.load(Ordering::Acquire) {
                    let Some(frame) = source.next_frame() else {
                        debug!("Camera source exhausted after {} frames", delivered);
                        break;
                    };
                    dispatcher.dispatch(frame);
                    delivered += 1;
                }
                delivered
            })?;

        info!("Capture session started");

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the producer to stop and wait for it. Returns the number of frames
    /// delivered.
    pub fn stop(mut self) -> u64 {
        self.stop.store(true, Ordering::Release);
        self.join()
    }

    /// Wait for the source to run dry without requesting a stop.
    pub fn wait(mut self) -> u64 {
        self.join()
    }

    fn join(&mut self) -> u64 {
        let Some(handle) = self.handle.take() else {
            return 0;
        };
        match handle.join() {
            Ok(delivered) => {
                info!("Capture session finished, {} frames delivered", delivered);
                delivered
            }
            Err(_) => {
                error!("Capture thread panicked");
                0
            }
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}
