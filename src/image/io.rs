//! Interop with the `image` crate and a PNG preview sink.
//!
//! Available when the `image-io` feature is enabled.

use crate::display::DisplaySink;
use crate::image::{ImageVariant, PixelBuffer, MAX_INTENSITY};
use crate::util::{PlainMapError, PlainMapResult};
use image::{DynamicImage, GrayImage, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Converts a buffer to a `DynamicImage` (`Luma8` or `Rgb8`).
///
/// Samples are copied as-is; buffers with a max intensity below 255 render darker.
pub fn to_dynamic_image(buffer: &PixelBuffer) -> PlainMapResult<DynamicImage> {
    let width = dim_u32(buffer.width(), buffer)?;
    let height = dim_u32(buffer.height(), buffer)?;
    let samples = buffer.samples().to_vec();
    let image = match buffer.variant() {
        ImageVariant::Grayscale => {
            GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8)
        }
        ImageVariant::Color => {
            RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8)
        }
    };
    image.ok_or(PlainMapError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
    })
}

/// Creates a buffer from a `DynamicImage`.
///
/// Images with color become 3-channel buffers, everything else single
/// channel; alpha and bit depths above 8 are reduced by the `image` crate.
pub fn from_dynamic_image(img: &DynamicImage) -> PlainMapResult<PixelBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    if img.color().has_color() {
        PixelBuffer::new(img.to_rgb8().into_raw(), width, height, 3, MAX_INTENSITY)
    } else {
        PixelBuffer::new(img.to_luma8().into_raw(), width, height, 1, MAX_INTENSITY)
    }
}

/// Saves a buffer as PNG.
pub fn save_png<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> PlainMapResult<()> {
    let path = path.as_ref();
    to_dynamic_image(buffer)?
        .save(path)
        .map_err(|err| PlainMapError::io(path, err))
}

/// Display sink that renders every shown buffer to `<dir>/<label>.png`.
#[derive(Clone, Debug)]
pub struct PngPreviewSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngPreviewSink {
    /// Creates the sink, creating `dir` if needed.
    pub fn new<P: Into<PathBuf>>(dir: P) -> PlainMapResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| PlainMapError::io(&dir, err))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Paths written so far, in display order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DisplaySink for PngPreviewSink {
    fn show(&mut self, label: &str, buffer: &PixelBuffer) -> PlainMapResult<()> {
        let path = self.dir.join(format!("{label}.png"));
        save_png(buffer, &path)?;
        self.written.push(path);
        Ok(())
    }
}

fn dim_u32(value: usize, buffer: &PixelBuffer) -> PlainMapResult<u32> {
    u32::try_from(value).map_err(|_| PlainMapError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
    })
}
