use anyhow::Context;
use cardscan_cv::geometry::ViewportSize;
use cardscan_cv::{CaptureSession, DetectionPipeline, PipelineConfig, RasterSurface};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod camera;
mod scene;

use camera::SyntheticCamera;
use scene::{scene_detectors, CardScene};

/// Run the card/face/text overlay pipeline against a scripted camera scene
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Pipeline configuration (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to capture
    #[arg(short, long, default_value_t = 48)]
    frames: u64,

    /// Capture rate; 0 delivers frames as fast as possible
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 375)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 667)]
    height: u32,

    /// Positional noise added by the scripted detectors, normalized units
    #[arg(long, default_value_t = 0.004)]
    noise: f64,

    /// Probability that a rectangle request fails
    #[arg(long, default_value_t = 0.05)]
    failure_rate: f64,

    /// Where the composed overlay and the JSON report are written
    #[arg(short, long, default_value = "outputs")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let viewport = ViewportSize::new(args.width as f64, args.height as f64);
    let surface = RasterSurface::new(viewport, config.overlay.clone());

    let scene = Arc::new(CardScene::default());
    let detectors = scene_detectors(Arc::clone(&scene), args.noise, args.failure_rate);
    let (mut pipeline, dispatcher) = DetectionPipeline::new(config, detectors, surface);

    let camera = SyntheticCamera::new(scene, args.width, args.height, args.frames).with_fps(args.fps);
    let session = CaptureSession::start(camera, dispatcher)?;

    // UI tick: apply whatever arrived since the last one
    while session.is_running() {
        pipeline.pump();
        std::thread::sleep(Duration::from_millis(16));
    }
    session.wait();
    pipeline.run();

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output dir: {:?}", args.output))?;

    let image_path = args.output.join("overlay.png");
    pipeline.surface().save(&image_path)?;

    let report = serde_json::json!({
        "stats": pipeline.stats(),
        "results": pipeline.results(),
        "primitives": pipeline.surface().overlays(),
    });
    let report_path = args.output.join("overlay.json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("Failed to write report: {:?}", report_path))?;

    let stats = pipeline.stats();
    info!(
        "{} frames, {} renders, {} detector failures; overlay saved to {:?}",
        stats.frames_previewed, stats.renders, stats.detector_failures, image_path
    );

    Ok(())
}
