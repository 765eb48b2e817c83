use opencv::core::Mat;
use opencv::highgui;
use opencv::prelude::*;

use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::frame::{Frame, CHANNELS};

/// A named OpenCV HighGUI window.
pub struct HighguiWindow {
    title: String,
    opened: bool,
}

impl HighguiWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            opened: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl FrameDisplay for HighguiWindow {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        highgui::named_window(&self.title, highgui::WINDOW_AUTOSIZE)?;
        self.opened = true;
        log::debug!("Opened window '{}'", self.title);
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let bgr = rgb_to_bgr(frame.data());
        let flat = Mat::from_slice(&bgr)?;
        let image = flat.reshape(CHANNELS as i32, frame.height() as i32)?;
        highgui::imshow(&self.title, &*image)?;
        Ok(())
    }

    fn poll_key(&mut self, wait_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>> {
        let code = highgui::wait_key(wait_ms)?;
        Ok(key_from_code(code))
    }

    fn close(&mut self) {
        if !self.opened {
            return;
        }
        self.opened = false;
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close window '{}': {e}", self.title);
        }
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        self.close();
    }
}

fn rgb_to_bgr(rgb: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgb.len());
    for px in rgb.chunks_exact(CHANNELS) {
        out.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    out
}

/// `wait_key` returns -1 on timeout; otherwise only the low byte is the key.
fn key_from_code(code: i32) -> Option<char> {
    if code < 0 {
        None
    } else {
        Some(char::from((code & 0xFF) as u8))
    }
}
