//! Rotation by forward and inverse pixel mapping.
//!
//! Both mappings pivot about the rounded center of the *source* image,
//! `(cx, cy) = (round(w / 2), round(h / 2))`, and write into a canvas sized
//! by [`canvas_size`]. Destination coordinates are not re-centered on the
//! canvas, so rotated content is offset toward the top-left when the canvas
//! grows. Sampling is nearest-pixel; pixels with no source stay at 0.
//!
//! Positive angles rotate counter-clockwise. Any finite angle is accepted.

mod canvas;
mod forward;
mod inverse;

pub use canvas::{canvas_size, CanvasSize};
pub use forward::rotate_forward;
#[cfg(feature = "rayon")]
pub use inverse::rotate_inverse_par;
pub use inverse::rotate_inverse;

use crate::image::PixelBuffer;
use crate::util::math::{round_half_even, sin_cos_deg};
use crate::util::{PlainMapError, PlainMapResult};

/// Which direction coordinates were mapped in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mapping {
    /// Source pixels pushed to destination coordinates.
    Forward,
    /// Destination pixels pulled from source coordinates.
    Inverse,
}

/// Output of a rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotationResult {
    /// Rotated image; same variant and max intensity as the source.
    pub image: PixelBuffer,
    /// Canvas dimensions of `image`.
    pub canvas: CanvasSize,
    pub mapping: Mapping,
    /// Pixels that received a source value (forward: writes that landed on
    /// the canvas, counting overwrites; inverse: in-bounds samples).
    pub mapped: usize,
}

/// Precomputed trigonometry and pivot shared by both mappings.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Geometry {
    pub(crate) sin: f64,
    pub(crate) cos: f64,
    pub(crate) cx: f64,
    pub(crate) cy: f64,
    pub(crate) canvas: CanvasSize,
}

impl Geometry {
    pub(crate) fn new(src: &PixelBuffer, angle_deg: f64) -> PlainMapResult<Self> {
        let canvas = canvas_size(src.width(), src.height(), angle_deg)?;
        let (sin, cos) = sin_cos_deg(angle_deg);
        Ok(Self {
            sin,
            cos,
            cx: round_half_even(src.width() as f64 / 2.0),
            cy: round_half_even(src.height() as f64 / 2.0),
            canvas,
        })
    }
}

pub(crate) fn check_angle(angle_deg: f64) -> PlainMapResult<()> {
    if angle_deg.is_finite() {
        Ok(())
    } else {
        Err(PlainMapError::InvalidAngle { angle_deg })
    }
}

/// Rounds `value` and returns it as an index below `limit`, if it is one.
#[inline]
pub(crate) fn to_index(value: f64, limit: usize) -> Option<usize> {
    let rounded = round_half_even(value);
    (rounded >= 0.0 && rounded < limit as f64).then_some(rounded as usize)
}
