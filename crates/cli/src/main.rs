use std::path::Path;
use std::process;

use clap::Parser;

use facecam_core::detection::domain::face_detector::FaceDetector;
use facecam_core::detection::infrastructure::haar_cascade_detector::HaarCascadeDetector;
use facecam_core::display::infrastructure::highgui_window::HighguiWindow;
use facecam_core::pipeline::live_detection_use_case::LiveDetectionUseCase;
use facecam_core::pipeline::pipeline_logger::LogPipelineLogger;
use facecam_core::rendering::infrastructure::outline_annotator::OutlineAnnotator;
use facecam_core::shared::config::LiveDetectionConfig;
use facecam_core::shared::constants::{CASCADE_MODEL_NAME, CASCADE_MODEL_URL, SYSTEM_CASCADE_DIRS};
use facecam_core::shared::model_resolver;
use facecam_core::video::infrastructure::opencv_camera::OpenCvCamera;

/// Live webcam face detection. Press 'q' in the window to quit.
#[derive(Parser)]
#[command(name = "facecam", version)]
struct Cli {}

fn main() {
    env_logger::init();
    Cli::parse();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = LiveDetectionConfig::default();

    // Resolve the model before touching the camera so a missing cascade
    // never leaves the device held.
    let detector = build_detector()?;
    let annotator = OutlineAnnotator::new(config.box_color, config.box_thickness)?;
    let display = HighguiWindow::new(config.window_title.clone());
    let camera = OpenCvCamera::open(config.camera_index)?;
    let logger = LogPipelineLogger::new(config.progress_interval);

    let use_case = LiveDetectionUseCase::new(
        Box::new(camera),
        detector,
        Box::new(annotator),
        Box::new(display),
        config,
        Box::new(logger),
    );
    let summary = use_case.execute()?;

    log::info!(
        "Stopped after {} frames ({} skipped, {} faces drawn)",
        summary.frames_presented,
        summary.frames_skipped,
        summary.faces_drawn
    );
    Ok(())
}

fn build_detector() -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {CASCADE_MODEL_NAME}");
    let search_dirs: Vec<&Path> = SYSTEM_CASCADE_DIRS.iter().map(Path::new).collect();
    let model_path = model_resolver::resolve(
        CASCADE_MODEL_NAME,
        CASCADE_MODEL_URL,
        &search_dirs,
        Some(Box::new(download_progress)),
    )?;

    Ok(Box::new(HaarCascadeDetector::new(&model_path)?))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face cascade... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading face cascade... {downloaded} bytes");
    }
}
