//! Color to grayscale conversion by channel averaging.

use crate::image::{ImageVariant, PixelBuffer};
use crate::trace::{trace_event, trace_span};
use crate::util::PlainMapResult;

/// Converts a buffer to single-channel gray.
///
/// Gray input is returned as an unchanged copy. Color pixels become
/// `(R + G + B) / 3` with integer division, so the result never exceeds the
/// source max intensity, which is carried over. Channel counts other than
/// 1 and 3 cannot reach this function: `PixelBuffer` rejects them with
/// `UnsupportedChannelCount` at construction.
pub fn to_gray(buffer: &PixelBuffer) -> PlainMapResult<PixelBuffer> {
    let _span = trace_span!("to_gray", channels = buffer.channels()).entered();

    match buffer.variant() {
        ImageVariant::Grayscale => Ok(buffer.clone()),
        ImageVariant::Color => {
            let gray = buffer
                .samples()
                .chunks_exact(3)
                .map(|px| ((u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2])) / 3) as u8)
                .collect::<Vec<_>>();
            trace_event!("to_gray", pixels = gray.len());
            Ok(PixelBuffer::gray_from_parts(
                gray,
                buffer.width(),
                buffer.height(),
                buffer.max_intensity(),
            ))
        }
    }
}
