use std::ops::{Deref, DerefMut};
use std::time::Instant;

use thiserror::Error;

use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::frame_display::FrameDisplay;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::rendering::domain::frame_annotator::FrameAnnotator;
use crate::shared::config::LiveDetectionConfig;
use crate::video::domain::video_source::{ReadError, VideoSource};

#[derive(Error, Debug)]
pub enum LiveDetectionError {
    #[error("camera {0} could not be opened")]
    SourceNotOpened(i32),
    #[error("camera produced unusable frames: {0}")]
    Capture(#[source] Box<dyn std::error::Error>),
    #[error("face detection failed: {0}")]
    Detection(#[source] Box<dyn std::error::Error>),
    #[error("drawing detections failed: {0}")]
    Annotation(#[source] Box<dyn std::error::Error>),
    #[error("display failed: {0}")]
    Display(#[source] Box<dyn std::error::Error>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Counters for a finished session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames_presented: usize,
    pub frames_skipped: usize,
    pub faces_drawn: usize,
}

/// Live detection loop: read → grayscale → detect → draw → show → poll key.
///
/// Owns the source and display for the whole session. On every exit path,
/// errors included, the source is released and an opened display is
/// closed. A missed frame skips the iteration. A source that never opened,
/// or that only yields unusable frames, ends the session.
pub struct LiveDetectionUseCase {
    source: Box<dyn VideoSource>,
    detector: Box<dyn FaceDetector>,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn FrameDisplay>,
    config: LiveDetectionConfig,
    logger: Box<dyn PipelineLogger>,
}

impl LiveDetectionUseCase {
    pub fn new(
        source: Box<dyn VideoSource>,
        detector: Box<dyn FaceDetector>,
        annotator: Box<dyn FrameAnnotator>,
        display: Box<dyn FrameDisplay>,
        config: LiveDetectionConfig,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            annotator,
            display,
            config,
            logger,
        }
    }

    /// Runs until the quit key is pressed or a fatal error occurs.
    ///
    /// Consumes the use case: a stopped loop cannot be restarted.
    pub fn execute(self) -> Result<LoopSummary, LiveDetectionError> {
        let source = SourceGuard(self.source);
        if !source.is_opened() {
            log::error!(
                "Webcam not found or cannot be opened (camera {})",
                self.config.camera_index
            );
            return Err(LiveDetectionError::SourceNotOpened(self.config.camera_index));
        }

        let mut display = self.display;
        display.open().map_err(LiveDetectionError::Display)?;
        let display = DisplayGuard(display);

        let mut session = Session {
            source,
            display,
            detector: self.detector,
            annotator: self.annotator,
            config: self.config,
            logger: self.logger,
            summary: LoopSummary::default(),
        };
        session.logger.info(&format!(
            "Detecting faces; press '{}' in the window to quit",
            session.config.quit_key
        ));

        let outcome = session.run();
        session.logger.summary();
        outcome.map(|()| session.summary.clone())
    }
}

struct Session {
    // Field order is drop order: the window closes before the camera is released.
    display: DisplayGuard,
    source: SourceGuard,
    detector: Box<dyn FaceDetector>,
    annotator: Box<dyn FrameAnnotator>,
    config: LiveDetectionConfig,
    logger: Box<dyn PipelineLogger>,
    summary: LoopSummary,
}

impl Session {
    fn run(&mut self) -> Result<(), LiveDetectionError> {
        let mut state = LoopState::Running;
        while state == LoopState::Running {
            state = self.iterate()?;
        }
        Ok(())
    }

    fn iterate(&mut self) -> Result<LoopState, LiveDetectionError> {
        let mut frame = match self.source.read() {
            Ok(frame) => frame,
            Err(ReadError::Unusable(e)) => {
                log::error!("Webcam frames cannot be used: {e}");
                return Err(LiveDetectionError::Capture(e));
            }
            Err(ReadError::Missed(e)) => {
                self.summary.frames_skipped += 1;
                log::warn!("Couldn't read frame from webcam: {e}");
                return self.poll_quit();
            }
        };

        let started = Instant::now();
        let gray = frame.to_gray();
        self.record("grayscale", started);

        let started = Instant::now();
        let regions = self
            .detector
            .detect(&gray, &self.config.detection)
            .map_err(LiveDetectionError::Detection)?;
        drop(gray);
        self.record("detect", started);

        let started = Instant::now();
        self.annotator
            .annotate(&mut frame, &regions)
            .map_err(LiveDetectionError::Annotation)?;
        self.record("annotate", started);

        let started = Instant::now();
        self.display
            .show(&frame)
            .map_err(LiveDetectionError::Display)?;
        self.record("display", started);

        log::trace!("Frame {}: {} faces", frame.index(), regions.len());
        self.summary.frames_presented += 1;
        self.summary.faces_drawn += regions.len();
        self.logger.metric("faces", regions.len() as f64);
        self.logger.progress(self.summary.frames_presented);

        self.poll_quit()
    }

    fn poll_quit(&mut self) -> Result<LoopState, LiveDetectionError> {
        let key = self
            .display
            .poll_key(self.config.key_wait_ms)
            .map_err(LiveDetectionError::Display)?;
        if key == Some(self.config.quit_key) {
            log::info!("Quit key pressed");
            Ok(LoopState::Stopped)
        } else {
            Ok(LoopState::Running)
        }
    }

    fn record(&mut self, stage: &str, started: Instant) {
        self.logger
            .timing(stage, started.elapsed().as_secs_f64() * 1000.0);
    }
}

/// Releases the source when dropped.
struct SourceGuard(Box<dyn VideoSource>);

impl Deref for SourceGuard {
    type Target = dyn VideoSource;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for SourceGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Drop for SourceGuard {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// Closes the display when dropped.
struct DisplayGuard(Box<dyn FrameDisplay>);

impl Deref for DisplayGuard {
    type Target = dyn FrameDisplay;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for DisplayGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Drop for DisplayGuard {
    fn drop(&mut self) {
        self.0.close();
    }
}
