use thiserror::Error;

use crate::shared::frame::Frame;

/// Why a [`VideoSource::read`] produced no frame.
#[derive(Error, Debug)]
pub enum ReadError {
    /// Nothing this time; the next read may succeed.
    #[error("{0}")]
    Missed(#[source] Box<dyn std::error::Error>),
    /// The source cannot yield usable frames. Retrying will not help.
    #[error("{0}")]
    Unusable(#[source] Box<dyn std::error::Error>),
}

/// A live frame source such as a camera.
///
/// The device is acquired when the implementation is constructed and held
/// until [`release`](VideoSource::release). After release every `read`
/// fails without touching the device.
pub trait VideoSource {
    /// Whether the device was acquired successfully and is still held.
    fn is_opened(&self) -> bool;

    /// Grabs the next frame.
    fn read(&mut self) -> Result<Frame, ReadError>;

    /// Releases the device.
    fn release(&mut self);
}
