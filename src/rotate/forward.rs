//! Forward-mapped rotation: every source pixel pushes to the destination.
//!
//! Kept alongside inverse mapping so the two can be compared. Rounding
//! forward coordinates leaves holes and collisions; collisions resolve
//! last-write-wins in row-major source order.

use super::{check_angle, to_index, Geometry, Mapping, RotationResult};
use crate::image::PixelBuffer;
use crate::trace::{trace_event, trace_span};
use crate::util::PlainMapResult;

/// Rotates `src` by `angle_deg` (counter-clockwise) with forward mapping.
///
/// Source `(x, y)` lands at
/// `( cos*(x-cx) - sin*(y-cy) + cx, sin*(x-cx) + cos*(y-cy) + cy )`,
/// rounded; positions off the canvas are dropped.
pub fn rotate_forward(src: &PixelBuffer, angle_deg: f64) -> PlainMapResult<RotationResult> {
    let _span = trace_span!("rotate_forward", angle_deg = angle_deg).entered();
    check_angle(angle_deg)?;

    let geo = Geometry::new(src, angle_deg)?;
    let canvas = geo.canvas;
    let channels = src.channels();
    let mut out = src.blank_like(canvas.width, canvas.height)?;
    let dst = out.samples_mut();

    let mut mapped = 0usize;
    for y in 0..src.height() {
        let y_rel = y as f64 - geo.cy;
        let Some(row) = src.row(y) else {
            break;
        };
        for (x, pixel) in row.chunks_exact(channels).enumerate() {
            let x_rel = x as f64 - geo.cx;
            let x_dst = geo.cos * x_rel - geo.sin * y_rel + geo.cx;
            let y_dst = geo.sin * x_rel + geo.cos * y_rel + geo.cy;
            let (Some(dx), Some(dy)) = (to_index(x_dst, canvas.width), to_index(y_dst, canvas.height))
            else {
                continue;
            };
            let idx = (dy * canvas.width + dx) * channels;
            dst[idx..idx + channels].copy_from_slice(pixel);
            mapped += 1;
        }
    }

    trace_event!(
        "rotate_forward",
        width = canvas.width,
        height = canvas.height,
        mapped = mapped
    );
    Ok(RotationResult {
        image: out,
        canvas,
        mapping: Mapping::Forward,
        mapped,
    })
}

#[cfg(test)]
mod tests {
    use super::rotate_forward;
    use crate::PixelBuffer;

    #[test]
    fn zero_angle_is_identity() {
        let src = PixelBuffer::new((0u8..12).collect(), 2, 2, 3, 255).unwrap();
        let result = rotate_forward(&src, 0.0).unwrap();
        assert_eq!(result.image, src);
        assert_eq!(result.mapped, 4);
    }

    #[test]
    fn half_turn_pushes_to_mirrored_positions() {
        let src = PixelBuffer::new((1u8..=9).collect(), 3, 3, 1, 255).unwrap();
        let result = rotate_forward(&src, 180.0).unwrap();
        // Source (x, y) lands at (4 - x, 4 - y); only x, y >= 2 stay on canvas.
        assert_eq!(result.image.samples(), &[0, 0, 0, 0, 0, 0, 0, 0, 9]);
        assert_eq!(result.mapped, 1);
    }
}
