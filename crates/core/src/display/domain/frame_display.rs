use crate::shared::frame::Frame;

/// A surface that shows frames to the user and reports key presses.
pub trait FrameDisplay {
    /// Creates the display surface.
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits at most `wait_ms` for a key press. Returns the key's
    /// character, or `None` if nothing was pressed.
    fn poll_key(&mut self, wait_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>>;

    /// Destroys the display surface. Safe to call more than once.
    fn close(&mut self);
}
