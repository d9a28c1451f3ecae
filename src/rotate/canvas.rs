//! Output canvas sizing.

use super::check_angle;
use crate::util::math::{fold_quadrant, round_half_even, sin_cos_deg};
use crate::util::PlainMapResult;

/// Width and height of a rotation canvas in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

/// Computes the bounding canvas of a `width` x `height` image rotated by
/// `angle_deg`.
///
/// The angle is folded into a single quadrant; an odd number of 90 degree
/// folds swaps width and height before applying
/// `round(|w cos| + |h sin|)` x `round(|w sin| + |h cos|)` with the folded
/// angle. A 2x1 image at 90 degrees gives a 1x2 canvas.
pub fn canvas_size(width: usize, height: usize, angle_deg: f64) -> PlainMapResult<CanvasSize> {
    check_angle(angle_deg)?;
    let (folded, swap) = fold_quadrant(angle_deg);
    let (eff_w, eff_h) = if swap {
        (height as f64, width as f64)
    } else {
        (width as f64, height as f64)
    };
    let (sin, cos) = sin_cos_deg(folded);
    let new_width = round_half_even((eff_w * cos).abs() + (eff_h * sin).abs());
    let new_height = round_half_even((eff_w * sin).abs() + (eff_h * cos).abs());
    Ok(CanvasSize {
        width: new_width as usize,
        height: new_height as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::{canvas_size, CanvasSize};

    fn size(width: usize, height: usize) -> CanvasSize {
        CanvasSize { width, height }
    }

    #[test]
    fn right_angles_swap_or_keep() {
        assert_eq!(canvas_size(2, 1, 90.0).unwrap(), size(1, 2));
        assert_eq!(canvas_size(2, 1, 180.0).unwrap(), size(2, 1));
        assert_eq!(canvas_size(2, 1, 270.0).unwrap(), size(1, 2));
        assert_eq!(canvas_size(2, 1, -90.0).unwrap(), size(1, 2));
        assert_eq!(canvas_size(5, 3, 0.0).unwrap(), size(5, 3));
        assert_eq!(canvas_size(5, 3, 720.0).unwrap(), size(5, 3));
    }

    #[test]
    fn oblique_angles_match_unfolded_formula() {
        for angle in [10.0f64, 55.0, 100.0, 135.0, 200.0, -30.0, 1000.0] {
            let (sin, cos) = angle.to_radians().sin_cos();
            let w = 40.0;
            let h = 25.0;
            let expected_w = (w * cos).abs() + (h * sin).abs();
            let expected_h = (w * sin).abs() + (h * cos).abs();
            let got = canvas_size(40, 25, angle).unwrap();
            assert!((got.width as f64 - expected_w).abs() <= 0.5 + 1e-9, "angle {angle}");
            assert!((got.height as f64 - expected_h).abs() <= 0.5 + 1e-9, "angle {angle}");
        }
    }

    #[test]
    fn rejects_non_finite_angle() {
        assert!(canvas_size(2, 2, f64::NAN).is_err());
        assert!(canvas_size(2, 2, f64::INFINITY).is_err());
    }
}
