//! Angle and rounding helpers for the rotation engine.

/// Computes sine and cosine for an angle in degrees.
pub(crate) fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    angle_deg.to_radians().sin_cos()
}

/// Rounds half-way cases to the nearest even integer.
///
/// Pivot, canvas and sample coordinates all go through this so that
/// `2.5` and `3.5` land on `2` and `4` consistently.
#[inline]
pub(crate) fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Folds an angle in degrees into a single quadrant.
///
/// Returns the folded angle in `(0, 90]` (or exactly `0` for multiples of
/// 360) and whether an odd number of 90 degree folds was removed. Uses
/// euclidean remainder, so negative and very large angles take constant time.
pub(crate) fn fold_quadrant(angle_deg: f64) -> (f64, bool) {
    let wrapped = angle_deg.rem_euclid(360.0);
    if wrapped == 0.0 {
        return (0.0, false);
    }
    let folds = (wrapped / 90.0).ceil() - 1.0;
    let folded = wrapped - folds * 90.0;
    (folded, folds as u8 % 2 == 1)
}
