//! Inverse-mapped rotation: every destination pixel pulls from the source.

use super::{check_angle, to_index, Geometry, Mapping, RotationResult};
use crate::image::PixelBuffer;
use crate::trace::{trace_event, trace_span};
use crate::util::PlainMapResult;

/// Rotates `src` by `angle_deg` (counter-clockwise) with inverse mapping.
///
/// For destination `(x, y)` the source coordinate is
/// `( cos*(x-cx) + sin*(y-cy) + cx, -sin*(x-cx) + cos*(y-cy) + cy )`,
/// rounded to the nearest pixel. Coordinates that fall outside the source
/// leave the destination at 0. Every canvas pixel is visited once, so there
/// are no holes.
pub fn rotate_inverse(src: &PixelBuffer, angle_deg: f64) -> PlainMapResult<RotationResult> {
    let _span = trace_span!("rotate_inverse", angle_deg = angle_deg).entered();
    check_angle(angle_deg)?;

    let geo = Geometry::new(src, angle_deg)?;
    let mut out = src.blank_like(geo.canvas.width, geo.canvas.height)?;
    let row_len = geo.canvas.width * src.channels();
    let mapped = out
        .samples_mut()
        .chunks_exact_mut(row_len)
        .enumerate()
        .map(|(y, row)| map_row(src, &geo, y, row))
        .sum::<usize>();

    trace_event!(
        "rotate_inverse",
        width = geo.canvas.width,
        height = geo.canvas.height,
        mapped = mapped
    );
    Ok(RotationResult {
        image: out,
        canvas: geo.canvas,
        mapping: Mapping::Inverse,
        mapped,
    })
}

/// Row-parallel variant of [`rotate_inverse`]; output is identical.
#[cfg(feature = "rayon")]
pub fn rotate_inverse_par(src: &PixelBuffer, angle_deg: f64) -> PlainMapResult<RotationResult> {
    use rayon::prelude::*;

    let _span = trace_span!("rotate_inverse_par", angle_deg = angle_deg).entered();
    check_angle(angle_deg)?;

    let geo = Geometry::new(src, angle_deg)?;
    let mut out = src.blank_like(geo.canvas.width, geo.canvas.height)?;
    let row_len = geo.canvas.width * src.channels();
    let mapped = out
        .samples_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .map(|(y, row)| map_row(src, &geo, y, row))
        .sum::<usize>();

    trace_event!(
        "rotate_inverse_par",
        width = geo.canvas.width,
        height = geo.canvas.height,
        mapped = mapped
    );
    Ok(RotationResult {
        image: out,
        canvas: geo.canvas,
        mapping: Mapping::Inverse,
        mapped,
    })
}

/// Fills destination row `y`; returns how many pixels had a source.
fn map_row(src: &PixelBuffer, geo: &Geometry, y: usize, row: &mut [u8]) -> usize {
    let channels = src.channels();
    let samples = src.samples();
    let y_rel = y as f64 - geo.cy;
    let mut mapped = 0;
    for (x, dst) in row.chunks_exact_mut(channels).enumerate() {
        let x_rel = x as f64 - geo.cx;
        let x_src = geo.cos * x_rel + geo.sin * y_rel + geo.cx;
        let y_src = -geo.sin * x_rel + geo.cos * y_rel + geo.cy;
        let (Some(sx), Some(sy)) = (to_index(x_src, src.width()), to_index(y_src, src.height()))
        else {
            continue;
        };
        let idx = (sy * src.width() + sx) * channels;
        dst.copy_from_slice(&samples[idx..idx + channels]);
        mapped += 1;
    }
    mapped
}
