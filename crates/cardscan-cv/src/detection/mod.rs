//! Detection pipeline: configuration, result slots, containment filter,
//! frame dispatch and the rendering sequencer

pub mod config;
pub mod dispatcher;
pub mod driver;
pub mod filter;
pub mod slots;

pub use config::PipelineConfig;
pub use dispatcher::{DetectionEvent, DetectorSet, FrameDispatcher};
pub use driver::{DetectionPipeline, PipelineStats};
pub use filter::{QualifiedScene, qualify};
pub use slots::{FrameResultSet, SlotUpdate};
