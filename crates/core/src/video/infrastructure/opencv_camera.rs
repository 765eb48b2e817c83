use opencv::core::{Mat, CV_8UC3};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use thiserror::Error;

use crate::shared::frame::{Frame, CHANNELS};
use crate::video::domain::video_source::{ReadError, VideoSource};

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera has been released")]
    Released,
    #[error("camera returned no frame")]
    FrameUnavailable,
    #[error("unsupported frame format (OpenCV type {0}), expected 8-bit BGR")]
    UnsupportedFormat(i32),
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

impl From<CaptureError> for ReadError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::FrameUnavailable | CaptureError::OpenCv(_) => {
                ReadError::Missed(Box::new(err))
            }
            CaptureError::Released | CaptureError::UnsupportedFormat(_) => {
                ReadError::Unusable(Box::new(err))
            }
        }
    }
}

/// Camera capture through OpenCV's `VideoCapture`.
///
/// Converts each BGR frame to RGB and wraps it in a [`Frame`] with a
/// sequential index.
pub struct OpenCvCamera {
    capture: VideoCapture,
    device_index: i32,
    opened: bool,
    frame_index: usize,
}

impl OpenCvCamera {
    /// Opens camera `device_index` with whatever backend OpenCV picks.
    ///
    /// A device that exists but cannot be acquired is not an error here;
    /// check [`VideoSource::is_opened`].
    pub fn open(device_index: i32) -> Result<Self, CaptureError> {
        let capture = VideoCapture::new(device_index, videoio::CAP_ANY)?;
        let opened = capture.is_opened()?;
        if opened {
            log::info!("Opened camera {device_index}");
        } else {
            log::debug!("Camera {device_index} did not open");
        }
        Ok(Self {
            capture,
            device_index,
            opened,
            frame_index: 0,
        })
    }
}

impl VideoSource for OpenCvCamera {
    fn is_opened(&self) -> bool {
        self.opened
    }

    fn read(&mut self) -> Result<Frame, ReadError> {
        if !self.opened {
            return Err(CaptureError::Released.into());
        }

        let mut mat = Mat::default();
        let grabbed = self.capture.read(&mut mat).map_err(CaptureError::from)?;
        if !grabbed || mat.empty() {
            return Err(CaptureError::FrameUnavailable.into());
        }

        let frame = mat_to_frame(&mat, self.frame_index)?;
        self.frame_index += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        if !self.opened {
            return;
        }
        self.opened = false;
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera {}: {e}", self.device_index);
        } else {
            log::info!("Released camera {}", self.device_index);
        }
    }
}

impl Drop for OpenCvCamera {
    fn drop(&mut self) {
        self.release();
    }
}

fn mat_to_frame(mat: &Mat, index: usize) -> Result<Frame, CaptureError> {
    if mat.typ() != CV_8UC3 {
        return Err(CaptureError::UnsupportedFormat(mat.typ()));
    }
    let width = mat.cols() as u32;
    let height = mat.rows() as u32;

    let owned;
    let continuous = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone()?;
        &owned
    };

    Ok(frame_from_bgr(continuous.data_bytes()?, width, height, index))
}

/// Builds an RGB [`Frame`] from tightly packed BGR bytes.
fn frame_from_bgr(bgr: &[u8], width: u32, height: u32, index: usize) -> Frame {
    let mut data = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(CHANNELS) {
        data.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    Frame::new(data, width, height, index)
}
