use crate::shared::constants::{MIN_NEIGHBORS, SCALE_FACTOR};
use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

/// Domain interface for face detection.
///
/// Returned regions are in the pixel coordinates of `gray`. Implementations
/// may hold mutable model state, hence `&mut self`.
pub trait FaceDetector {
    fn detect(
        &mut self,
        gray: &GrayFrame,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

/// Multi-scale search parameters.
///
/// Higher `min_neighbors` suppresses spurious boxes at the cost of missed
/// faces; a larger `scale_factor` makes fewer, coarser passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    scale_factor: f64,
    min_neighbors: i32,
}

impl DetectionParams {
    pub fn new(scale_factor: f64, min_neighbors: i32) -> Result<Self, &'static str> {
        if scale_factor.is_nan() || scale_factor <= 1.0 {
            return Err("scale_factor must be greater than 1.0");
        }
        if min_neighbors < 0 {
            return Err("min_neighbors must be >= 0");
        }
        Ok(Self {
            scale_factor,
            min_neighbors,
        })
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn min_neighbors(&self) -> i32 {
        self.min_neighbors
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: SCALE_FACTOR,
            min_neighbors: MIN_NEIGHBORS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_default_params() {
        let params = DetectionParams::default();
        assert_relative_eq!(params.scale_factor(), 1.5);
        assert_eq!(params.min_neighbors(), 5);
    }

    #[test]
    fn test_new_accepts_valid_params() {
        let params = DetectionParams::new(1.1, 3).unwrap();
        assert_relative_eq!(params.scale_factor(), 1.1);
        assert_eq!(params.min_neighbors(), 3);
    }

    #[rstest]
    #[case::unit_scale(1.0, 5)]
    #[case::shrinking_scale(0.8, 5)]
    #[case::nan_scale(f64::NAN, 5)]
    #[case::negative_neighbors(1.5, -1)]
    fn test_new_rejects_invalid_params(#[case] scale_factor: f64, #[case] min_neighbors: i32) {
        assert!(DetectionParams::new(scale_factor, min_neighbors).is_err());
    }
}
