use ndarray::s;

use crate::rendering::domain::frame_annotator::FrameAnnotator;
use crate::shared::color::Rgb;
use crate::shared::constants::{BOX_COLOR, BOX_THICKNESS};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Draws an unfilled rectangle around each region.
///
/// Corners are `(x, y)` and `(x + width, y + height)`, both inclusive. A
/// stroke of thickness `t` is centred on the edge: `t / 2` pixels outside
/// and the rest inside, so `t == 1` paints exactly the edge pixels.
/// Anything past the frame border is clipped.
pub struct OutlineAnnotator {
    color: Rgb,
    thickness: u32,
}

impl OutlineAnnotator {
    pub fn new(color: Rgb, thickness: u32) -> Result<Self, &'static str> {
        if thickness == 0 {
            return Err("thickness must be >= 1");
        }
        Ok(Self { color, thickness })
    }

    /// Fills the inclusive pixel box `[x0, x1] x [y0, y1]`, clipped to the frame.
    fn fill(&self, frame: &mut Frame, x0: i64, y0: i64, x1: i64, y1: i64) {
        let w = frame.width() as i64;
        let h = frame.height() as i64;
        let (x0, y0) = (x0.max(0), y0.max(0));
        let (x1, y1) = (x1.min(w - 1), y1.min(h - 1));
        if x0 > x1 || y0 > y1 {
            return;
        }

        let color = self.color.as_array();
        let mut pixels = frame.as_ndarray_mut();
        let mut roi = pixels.slice_mut(s![
            y0 as usize..=y1 as usize,
            x0 as usize..=x1 as usize,
            ..
        ]);
        for mut px in roi.lanes_mut(ndarray::Axis(2)) {
            px[0] = color[0];
            px[1] = color[1];
            px[2] = color[2];
        }
    }

    fn draw_outline(&self, frame: &mut Frame, region: &Region) {
        let t = self.thickness as i64;
        let outside = t / 2;
        let inside = t - outside - 1;

        let ((left, top), (right, bottom)) = region.corners();
        let (left, top, right, bottom) = (left as i64, top as i64, right as i64, bottom as i64);

        let (ox0, oy0, ox1, oy1) = (left - outside, top - outside, right + outside, bottom + outside);
        let (ix0, iy0, ix1, iy1) = (left + inside, top + inside, right - inside, bottom - inside);

        // Stroke wider than the box: the outline degenerates to a solid block.
        if ix0 >= ix1 || iy0 >= iy1 {
            self.fill(frame, ox0, oy0, ox1, oy1);
            return;
        }

        self.fill(frame, ox0, oy0, ox1, iy0); // top
        self.fill(frame, ox0, iy1, ox1, oy1); // bottom
        self.fill(frame, ox0, iy0 + 1, ix0, iy1 - 1); // left
        self.fill(frame, ix1, iy0 + 1, ox1, iy1 - 1); // right
    }
}

impl Default for OutlineAnnotator {
    fn default() -> Self {
        Self {
            color: BOX_COLOR,
            thickness: BOX_THICKNESS,
        }
    }
}

impl FrameAnnotator for OutlineAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        regions: &[Region],
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Stroke reaches past the box, so off-frame boxes still go through
        // the clipped fill.
        for region in regions {
            self.draw_outline(frame, region);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RED: Rgb = Rgb(255, 0, 0);

    fn blank(w: u32, h: u32) -> Frame {
        Frame::new(vec![0u8; (w * h * 3) as usize], w, h, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let arr = frame.as_ndarray();
        [arr[[y, x, 0]], arr[[y, x, 1]], arr[[y, x, 2]]]
    }

    fn painted(frame: &Frame) -> Vec<(usize, usize)> {
        let arr = frame.as_ndarray();
        let mut out = Vec::new();
        for y in 0..frame.height() as usize {
            for x in 0..frame.width() as usize {
                if arr[[y, x, 0]] == 255 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_thin_outline_matches_region_exactly() {
        let mut frame = blank(20, 20);
        let annotator = OutlineAnnotator::new(RED, 1).unwrap();
        annotator
            .annotate(&mut frame, &[Region::new(3, 4, 5, 6)])
            .unwrap();

        let mut expected = Vec::new();
        for y in 4..=10 {
            for x in 3..=8 {
                if x == 3 || x == 8 || y == 4 || y == 10 {
                    expected.push((x, y));
                }
            }
        }
        expected.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(painted(&frame), expected);
    }

    #[test]
    fn test_interior_is_left_untouched() {
        let mut frame = Frame::new(vec![7u8; 30 * 30 * 3], 30, 30, 0);
        let annotator = OutlineAnnotator::new(RED, 3).unwrap();
        annotator
            .annotate(&mut frame, &[Region::new(5, 5, 20, 20)])
            .unwrap();
        assert_eq!(pixel(&frame, 15, 15), [7, 7, 7]);
        assert_eq!(pixel(&frame, 5, 5), [255, 0, 0]);
    }

    #[rstest]
    #[case::odd(3, 1, 1)]
    #[case::even(10, 5, 4)]
    fn test_stroke_straddles_edge(
        #[case] thickness: u32,
        #[case] outside: usize,
        #[case] inside: usize,
    ) {
        let mut frame = blank(80, 80);
        let annotator = OutlineAnnotator::new(RED, thickness).unwrap();
        annotator
            .annotate(&mut frame, &[Region::new(20, 20, 40, 40)])
            .unwrap();

        // Walk the horizontal line through the middle of the left edge.
        let row = 40;
        let first = 20 - outside;
        let last = 20 + inside;
        assert_eq!(pixel(&frame, first - 1, row), [0, 0, 0]);
        for x in first..=last {
            assert_eq!(pixel(&frame, x, row), [255, 0, 0], "x={x}");
        }
        assert_eq!(pixel(&frame, last + 1, row), [0, 0, 0]);
        assert_eq!(last - first + 1, thickness as usize);
    }

    #[test]
    fn test_uses_configured_color() {
        let mut frame = blank(10, 10);
        OutlineAnnotator::new(Rgb(0, 255, 0), 1)
            .unwrap()
            .annotate(&mut frame, &[Region::new(1, 1, 3, 3)])
            .unwrap();
        assert_eq!(pixel(&frame, 1, 1), [0, 255, 0]);
    }

    #[test]
    fn test_clips_to_frame_border() {
        let mut frame = blank(10, 10);
        let annotator = OutlineAnnotator::new(RED, 1).unwrap();
        annotator
            .annotate(&mut frame, &[Region::new(-5, -5, 20, 20)])
            .unwrap();
        // Every edge lies outside the frame.
        assert!(painted(&frame).is_empty());

        annotator
            .annotate(&mut frame, &[Region::new(5, 5, 20, 20)])
            .unwrap();
        assert_eq!(pixel(&frame, 5, 9), [255, 0, 0]);
        assert_eq!(pixel(&frame, 9, 5), [255, 0, 0]);
        assert_eq!(pixel(&frame, 9, 9), [0, 0, 0]);
    }

    #[test]
    fn test_off_frame_region_is_noop() {
        let mut frame = blank(10, 10);
        OutlineAnnotator::new(RED, 10)
            .unwrap()
            .annotate(&mut frame, &[Region::new(50, 50, 10, 10)])
            .unwrap();
        assert!(painted(&frame).is_empty());
    }

    #[test]
    fn test_stroke_of_box_just_left_of_frame_is_visible() {
        let mut frame = blank(20, 20);
        OutlineAnnotator::new(RED, 10)
            .unwrap()
            .annotate(&mut frame, &[Region::new(-12, 5, 10, 10)])
            .unwrap();
        // Right edge sits at x = -2; its outer half reaches x = 3.
        assert_eq!(pixel(&frame, 0, 10), [255, 0, 0]);
        assert_eq!(pixel(&frame, 3, 10), [255, 0, 0]);
        assert_eq!(pixel(&frame, 4, 10), [0, 0, 0]);
    }

    #[test]
    fn test_thick_stroke_on_tiny_region_fills_block() {
        let mut frame = blank(20, 20);
        OutlineAnnotator::new(RED, 10)
            .unwrap()
            .annotate(&mut frame, &[Region::new(10, 10, 2, 2)])
            .unwrap();
        assert_eq!(pixel(&frame, 11, 11), [255, 0, 0]);
        assert_eq!(pixel(&frame, 5, 5), [255, 0, 0]);
        assert_eq!(pixel(&frame, 4, 4), [0, 0, 0]);
    }

    #[test]
    fn test_empty_region_list_leaves_frame_unchanged() {
        let mut frame = blank(10, 10);
        OutlineAnnotator::default().annotate(&mut frame, &[]).unwrap();
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_thickness_rejected() {
        assert!(OutlineAnnotator::new(RED, 0).is_err());
    }
}
