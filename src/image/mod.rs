//! Owned pixel buffers for plain pixel maps.
//!
//! `PixelBuffer` stores samples row-major with the channel index varying
//! fastest, so pixel `(x, y)` occupies
//! `samples[(y * width + x) * channels..][..channels]`. Point and region
//! accessors are strict: coordinates outside the buffer are reported as
//! `OutOfBounds`, never clamped or wrapped.

use crate::util::{PlainMapError, PlainMapResult};

#[cfg(feature = "image-io")]
pub mod io;
mod region;

pub use region::BoundingBox;

/// Largest intensity a `u8` sample can carry.
pub const MAX_INTENSITY: u8 = 255;

/// Pixel-map flavour, determined by the channel count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageVariant {
    /// One channel per pixel, tagged `P2`.
    Grayscale,
    /// Red, green and blue per pixel, tagged `P3`.
    Color,
}

impl ImageVariant {
    /// Returns the variant for a channel count, if one exists.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::Grayscale),
            3 => Some(Self::Color),
            _ => None,
        }
    }

    /// Returns the variant for a header tag, if one exists.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "P2" => Some(Self::Grayscale),
            "P3" => Some(Self::Color),
            _ => None,
        }
    }

    /// Number of samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Color => 3,
        }
    }

    /// Header tag written by the codec.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Grayscale => "P2",
            Self::Color => "P3",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Grayscale => "pgm",
            Self::Color => "ppm",
        }
    }
}

/// Owned height x width x channels image with `u8` samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    samples: Vec<u8>,
    width: usize,
    height: usize,
    variant: ImageVariant,
    max_intensity: u8,
}

impl PixelBuffer {
    /// Creates a buffer from row-major, channel-interleaved samples.
    ///
    /// `channels` must be 1 or 3, `max_intensity` non-zero, every sample at
    /// most `max_intensity`, and `samples.len() == width * height * channels`.
    pub fn new(
        samples: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
        max_intensity: u8,
    ) -> PlainMapResult<Self> {
        let variant =
            ImageVariant::from_channels(channels).ok_or(PlainMapError::UnsupportedChannelCount {
                channels,
                operation: "pixel buffer",
            })?;
        let needed = sample_len(width, height, channels)?;
        if samples.len() != needed {
            return Err(PlainMapError::malformed(format!(
                "expected {needed} samples for {width}x{height}x{channels}, got {}",
                samples.len()
            )));
        }
        if max_intensity == 0 {
            return Err(PlainMapError::malformed("max intensity must be positive"));
        }
        if let Some(&sample) = samples.iter().find(|&&s| s > max_intensity) {
            return Err(PlainMapError::malformed(format!(
                "sample {sample} exceeds max intensity {max_intensity}"
            )));
        }
        Ok(Self {
            samples,
            width,
            height,
            variant,
            max_intensity,
        })
    }

    /// Creates a buffer where every pixel equals `value`.
    ///
    /// The channel count is `value.len()`; max intensity is 255.
    pub fn filled(width: usize, height: usize, value: &[u8]) -> PlainMapResult<Self> {
        let channels = value.len();
        let variant =
            ImageVariant::from_channels(channels).ok_or(PlainMapError::UnsupportedChannelCount {
                channels,
                operation: "pixel buffer",
            })?;
        let needed = sample_len(width, height, channels)?;
        let samples = value.iter().copied().cycle().take(needed).collect();
        Ok(Self {
            samples,
            width,
            height,
            variant,
            max_intensity: MAX_INTENSITY,
        })
    }

    /// Creates a zeroed buffer shaped like `self` with different dimensions.
    pub(crate) fn blank_like(&self, width: usize, height: usize) -> PlainMapResult<Self> {
        let needed = sample_len(width, height, self.channels())?;
        Ok(Self {
            samples: vec![0; needed],
            width,
            height,
            variant: self.variant,
            max_intensity: self.max_intensity,
        })
    }

    /// Builds a single-channel buffer without re-validating samples.
    ///
    /// Callers guarantee the length invariant and that samples fit `max_intensity`.
    pub(crate) fn gray_from_parts(
        samples: Vec<u8>,
        width: usize,
        height: usize,
        max_intensity: u8,
    ) -> Self {
        debug_assert_eq!(samples.len(), width * height);
        Self {
            samples,
            width,
            height,
            variant: ImageVariant::Grayscale,
            max_intensity,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of samples per pixel (1 or 3).
    pub fn channels(&self) -> usize {
        self.variant.channels()
    }

    pub fn variant(&self) -> ImageVariant {
        self.variant
    }

    pub fn max_intensity(&self) -> u8 {
        self.max_intensity
    }

    /// Returns `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns all samples, row-major and channel-interleaved.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Consumes the buffer and returns its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Returns the samples of row `y` (`width * channels` values).
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let row_len = self.width * self.channels();
        let start = y * row_len;
        self.samples.get(start..start + row_len)
    }

    /// Returns the channel values of pixel `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> PlainMapResult<&[u8]> {
        let idx = self.pixel_index(x, y)?;
        Ok(&self.samples[idx..idx + self.channels()])
    }

    /// Overwrites pixel `(x, y)` with `value`.
    pub fn set(&mut self, x: usize, y: usize, value: &[u8]) -> PlainMapResult<()> {
        self.check_value(value)?;
        let idx = self.pixel_index(x, y)?;
        let channels = self.channels();
        self.samples[idx..idx + channels].copy_from_slice(value);
        Ok(())
    }

    /// Copies the pixels inside `bbox` into a new buffer.
    pub fn region(&self, bbox: BoundingBox) -> PlainMapResult<PixelBuffer> {
        bbox.check_within(self.width, self.height)?;
        let channels = self.channels();
        let row_len = bbox.width * channels;
        let mut samples = Vec::with_capacity(row_len * bbox.height);
        for y in bbox.y..bbox.y + bbox.height {
            let start = (y * self.width + bbox.x) * channels;
            samples.extend_from_slice(&self.samples[start..start + row_len]);
        }
        Ok(Self {
            samples,
            width: bbox.width,
            height: bbox.height,
            variant: self.variant,
            max_intensity: self.max_intensity,
        })
    }

    /// Sets every pixel inside `bbox` to `value`.
    pub fn set_region(&mut self, bbox: BoundingBox, value: &[u8]) -> PlainMapResult<()> {
        self.check_value(value)?;
        bbox.check_within(self.width, self.height)?;
        let channels = self.channels();
        for y in bbox.y..bbox.y + bbox.height {
            let start = (y * self.width + bbox.x) * channels;
            let end = start + bbox.width * channels;
            for pixel in self.samples[start..end].chunks_exact_mut(channels) {
                pixel.copy_from_slice(value);
            }
        }
        Ok(())
    }

    fn pixel_index(&self, x: usize, y: usize) -> PlainMapResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(PlainMapError::OutOfBounds {
                x,
                y,
                width: 1,
                height: 1,
                img_width: self.width,
                img_height: self.height,
            });
        }
        Ok((y * self.width + x) * self.channels())
    }

    fn check_value(&self, value: &[u8]) -> PlainMapResult<()> {
        let expected = self.channels();
        if value.len() != expected {
            return Err(PlainMapError::PixelLengthMismatch {
                expected,
                got: value.len(),
            });
        }
        if let Some(&sample) = value.iter().find(|&&s| s > self.max_intensity) {
            return Err(PlainMapError::malformed(format!(
                "sample {sample} exceeds max intensity {}",
                self.max_intensity
            )));
        }
        Ok(())
    }
}

fn sample_len(width: usize, height: usize, channels: usize) -> PlainMapResult<usize> {
    if width == 0 || height == 0 {
        return Err(PlainMapError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(PlainMapError::InvalidDimensions { width, height })
}
