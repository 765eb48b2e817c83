use crate::shared::color::Rgb;

pub const CASCADE_MODEL_NAME: &str = "haarcascade_frontalface_default.xml";
pub const CASCADE_MODEL_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_frontalface_default.xml";

/// Where distribution OpenCV packages install their cascade files.
pub const SYSTEM_CASCADE_DIRS: &[&str] = &[
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/usr/share/opencv/haarcascades",
    "/opt/homebrew/share/opencv4/haarcascades",
];

/// Default system camera.
pub const CAMERA_INDEX: i32 = 0;

pub const WINDOW_TITLE: &str = "Face Detector";

/// Search-window growth between detection passes.
pub const SCALE_FACTOR: f64 = 1.5;

/// Overlapping hits required before a region is accepted.
pub const MIN_NEIGHBORS: i32 = 5;

pub const QUIT_KEY: char = 'q';

/// Key poll wait, roughly one display refresh.
pub const KEY_WAIT_MS: i32 = 1;

pub const BOX_COLOR: Rgb = Rgb(0, 255, 0);
pub const BOX_THICKNESS: u32 = 10;

/// Frames between progress log lines.
pub const PROGRESS_INTERVAL: usize = 100;
