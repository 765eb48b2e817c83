/// A candidate face rectangle in the pixel coordinates of the frame it
/// was detected on.
///
/// Detections carry no identity: a new set is produced every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive top-left and bottom-right corners, `(x, y)` and
    /// `(x + width, y + height)`.
    pub fn corners(&self) -> ((i32, i32), (i32, i32)) {
        ((self.x, self.y), (self.right(), self.bottom()))
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let r = Region::new(10, 20, 30, 40);
        assert_eq!(r.corners(), ((10, 20), (40, 60)));
    }

    #[test]
    fn test_right_and_bottom_saturate() {
        let r = Region::new(i32::MAX - 1, i32::MAX - 1, 10, 10);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
    }
}
