use crate::detection::domain::face_detector::DetectionParams;
use crate::shared::color::Rgb;
use crate::shared::constants::{
    BOX_COLOR, BOX_THICKNESS, CAMERA_INDEX, KEY_WAIT_MS, PROGRESS_INTERVAL, QUIT_KEY,
    WINDOW_TITLE,
};

/// Settings for one live detection session.
///
/// There is no external configuration surface; `Default` yields the fixed
/// values the program runs with.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveDetectionConfig {
    pub camera_index: i32,
    pub window_title: String,
    pub detection: DetectionParams,
    pub quit_key: char,
    pub key_wait_ms: i32,
    pub box_color: Rgb,
    pub box_thickness: u32,
    pub progress_interval: usize,
}

impl Default for LiveDetectionConfig {
    fn default() -> Self {
        Self {
            camera_index: CAMERA_INDEX,
            window_title: WINDOW_TITLE.to_string(),
            detection: DetectionParams::default(),
            quit_key: QUIT_KEY,
            key_wait_ms: KEY_WAIT_MS,
            box_color: BOX_COLOR,
            box_thickness: BOX_THICKNESS,
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}
