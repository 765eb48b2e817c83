//! Live webcam face detection.
//!
//! Each area is split into `domain` (ports and value types) and
//! `infrastructure` (OpenCV-backed adapters). The `pipeline` module wires
//! them into the live detection loop.

pub mod detection;
pub mod display;
pub mod pipeline;
pub mod rendering;
pub mod shared;
pub mod video;
