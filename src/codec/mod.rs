//! Plain pixel-map codec (`P2` grayscale and `P3` color).
//!
//! The text layout is a format tag, `width height`, the max intensity, then
//! one integer per sample, row-major with channels interleaved. Lines whose
//! first non-blank character is `#` are comments and are dropped on decode;
//! `encode` never writes comments and puts each pixel on its own line.

use crate::image::{ImageVariant, PixelBuffer};
use crate::trace::{trace_event, trace_span};
use crate::util::{PlainMapError, PlainMapResult};
use std::fmt::Write as _;

mod file;

pub use file::{read_file, write_file};

/// Parses a plain pixel map.
pub fn decode(text: &str) -> PlainMapResult<PixelBuffer> {
    let _span = trace_span!("decode", bytes = text.len()).entered();

    let mut tokens = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace);

    let tag = tokens
        .next()
        .ok_or_else(|| PlainMapError::malformed("missing format tag"))?;
    let variant = ImageVariant::from_tag(tag).ok_or_else(|| PlainMapError::UnsupportedFormat {
        tag: tag.to_owned(),
    })?;
    let channels = variant.channels();

    let width = parse_header(tokens.next(), "width")?;
    let height = parse_header(tokens.next(), "height")?;
    if width == 0 || height == 0 {
        return Err(PlainMapError::malformed(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    let max_intensity = parse_header(tokens.next(), "max intensity")?;
    let max_intensity = u8::try_from(max_intensity)
        .ok()
        .filter(|&max| max > 0)
        .ok_or_else(|| {
            PlainMapError::malformed(format!(
                "max intensity must be within 1..=255, got {max_intensity}"
            ))
        })?;

    let needed = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(PlainMapError::InvalidDimensions { width, height })?;

    // The header is untrusted; every sample takes at least two bytes of text.
    let mut samples = Vec::with_capacity(needed.min(text.len() / 2 + 1));
    for token in tokens {
        let value: u32 = token
            .parse()
            .map_err(|_| PlainMapError::malformed(format!("invalid sample {token:?}")))?;
        let sample = u8::try_from(value)
            .ok()
            .filter(|&s| s <= max_intensity)
            .ok_or_else(|| {
                PlainMapError::malformed(format!(
                    "sample {value} exceeds max intensity {max_intensity}"
                ))
            })?;
        samples.push(sample);
    }
    if samples.len() != needed {
        return Err(PlainMapError::malformed(format!(
            "expected {needed} samples for {width}x{height} {}, got {}",
            variant.tag(),
            samples.len()
        )));
    }

    trace_event!("decoded", width = width, height = height, channels = channels);
    PixelBuffer::new(samples, width, height, channels, max_intensity)
}

/// Serializes a buffer as a plain pixel map, one pixel per line.
pub fn encode(buffer: &PixelBuffer) -> String {
    let _span = trace_span!("encode", width = buffer.width(), height = buffer.height()).entered();

    let channels = buffer.channels();
    // Up to four bytes per sample ("255" plus a separator), plus the header.
    let mut out = String::with_capacity(buffer.samples().len() * 4 + 32);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", buffer.variant().tag());
    let _ = writeln!(out, "{} {}", buffer.width(), buffer.height());
    let _ = writeln!(out, "{}", buffer.max_intensity());
    for pixel in buffer.samples().chunks_exact(channels) {
        let mut first = true;
        for sample in pixel {
            if !first {
                out.push(' ');
            }
            first = false;
            let _ = write!(out, "{sample}");
        }
        out.push('\n');
    }
    out
}

fn parse_header(token: Option<&str>, field: &str) -> PlainMapResult<usize> {
    let token = token.ok_or_else(|| PlainMapError::malformed(format!("missing {field}")))?;
    token
        .parse()
        .map_err(|_| PlainMapError::malformed(format!("invalid {field} {token:?}")))
}
