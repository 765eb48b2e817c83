use ndarray::{ArrayView2, ArrayView3, ArrayViewMut3};

/// Color channels per [`Frame`] pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// A single camera frame: contiguous RGB bytes in row-major order.
///
/// Format conversion (BGR from OpenCV) happens at I/O boundaries only; the
/// domain layer always sees RGB.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Luminance image for the detector.
    ///
    /// Uses the 14-bit fixed-point BT.601 weights OpenCV applies for
    /// `COLOR_BGR2GRAY`, so output is bit-identical across runs and
    /// platforms.
    pub fn to_gray(&self) -> GrayFrame {
        let data = self
            .data
            .chunks_exact(CHANNELS)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();
        GrayFrame::new(data, self.width, self.height)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}

const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = R_WEIGHT * r as u32 + G_WEIGHT * g as u32 + B_WEIGHT * b as u32;
    ((y + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Single-channel luminance image derived from a [`Frame`].
///
/// Shares the source frame's coordinate space, so regions detected on it
/// map onto the color frame unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("GrayFrame data length must match dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn solid(r: u8, g: u8, b: u8, w: u32, h: u32) -> Frame {
        let data = [r, g, b].repeat((w * h) as usize);
        Frame::new(data, w, h, 0)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_data_mut_allows_modification() {
        let mut frame = Frame::new(vec![0u8; 6], 2, 1, 0);
        frame.data_mut()[0] = 255;
        assert_eq!(frame.data()[0], 255);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::new(vec![0u8; 12], 2, 2, 0);
        {
            let mut arr = frame.as_ndarray_mut();
            arr[[0, 1, 2]] = 128; // row=0, col=1, B channel
        }
        assert_eq!(frame.as_ndarray()[[0, 1, 2]], 128);
        assert_eq!(frame.data()[5], 128);
    }

    // ── Grayscale ────────────────────────────────────────────────────

    #[rstest]
    #[case::black(0, 0, 0, 0)]
    #[case::white(255, 255, 255, 255)]
    #[case::red(255, 0, 0, 76)]
    #[case::green(0, 255, 0, 150)]
    #[case::blue(0, 0, 255, 29)]
    #[case::mid_gray(128, 128, 128, 128)]
    fn test_to_gray_bt601(#[case] r: u8, #[case] g: u8, #[case] b: u8, #[case] expected: u8) {
        let gray = solid(r, g, b, 1, 1).to_gray();
        assert_eq!(gray.data(), &[expected]);
    }

    #[test]
    fn test_to_gray_preserves_dimensions() {
        let gray = solid(10, 20, 30, 7, 3).to_gray();
        assert_eq!(gray.width(), 7);
        assert_eq!(gray.height(), 3);
        assert_eq!(gray.data().len(), 21);
        assert_eq!(gray.as_ndarray().shape(), &[3, 7]);
    }

    #[test]
    fn test_to_gray_is_deterministic() {
        let data: Vec<u8> = (0..4 * 4 * 3).map(|i| (i * 17 % 256) as u8).collect();
        let frame = Frame::new(data, 4, 4, 0);
        let first = frame.to_gray();
        let _ = solid(200, 10, 90, 4, 4).to_gray();
        let second = frame.to_gray();
        assert_eq!(first, second);
    }

    #[test]
    fn test_to_gray_ignores_frame_index() {
        let data: Vec<u8> = (0..2 * 2 * 3).map(|i| (i * 31 % 256) as u8).collect();
        let early = Frame::new(data.clone(), 2, 2, 0);
        let late = Frame::new(data, 2, 2, 9_000);
        assert_eq!(early.to_gray(), late.to_gray());
    }

    #[test]
    fn test_to_gray_pixel_order() {
        // row 0: red, green; row 1: blue, white
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let gray = Frame::new(data, 2, 2, 0).to_gray();
        let arr = gray.as_ndarray();
        assert_eq!(arr[[0, 0]], 76);
        assert_eq!(arr[[0, 1]], 150);
        assert_eq!(arr[[1, 0]], 29);
        assert_eq!(arr[[1, 1]], 255);
    }
}
