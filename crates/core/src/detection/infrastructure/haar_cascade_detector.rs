//! Haar-cascade face detector backed by OpenCV's `CascadeClassifier`.
//!
//! The cascade is a pre-trained model consumed as-is; this adapter only
//! moves pixels into a `Mat` and converts the returned rectangles.
use std::path::{Path, PathBuf};

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use thiserror::Error;

use crate::detection::domain::face_detector::{DetectionParams, FaceDetector};
use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum CascadeLoadError {
    #[error("cascade file not found: {0}")]
    NotFound(PathBuf),
    #[error("cascade file could not be parsed: {0}")]
    Empty(PathBuf),
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

/// Frontal-face detector over a loaded cascade.
pub struct HaarCascadeDetector {
    classifier: CascadeClassifier,
}

impl HaarCascadeDetector {
    /// Loads a cascade XML file (e.g. `haarcascade_frontalface_default.xml`).
    pub fn new(cascade_path: &Path) -> Result<Self, CascadeLoadError> {
        if !cascade_path.is_file() {
            return Err(CascadeLoadError::NotFound(cascade_path.to_path_buf()));
        }
        let classifier = CascadeClassifier::new(&cascade_path.to_string_lossy())?;
        if classifier.empty()? {
            return Err(CascadeLoadError::Empty(cascade_path.to_path_buf()));
        }
        log::info!("Loaded face cascade from {}", cascade_path.display());
        Ok(Self { classifier })
    }
}

impl FaceDetector for HaarCascadeDetector {
    fn detect(
        &mut self,
        gray: &GrayFrame,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        if gray.width() == 0 || gray.height() == 0 {
            return Ok(Vec::new());
        }

        let image =
            Mat::new_rows_cols_with_data(gray.height() as i32, gray.width() as i32, gray.data())?;
        let mut faces = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &*image,
            &mut faces,
            params.scale_factor(),
            params.min_neighbors(),
            0,
            Size::default(),
            Size::default(),
        )?;

        Ok(faces
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
