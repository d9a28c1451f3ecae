//! Axis-aligned regions used by `PixelBuffer::region` and `set_region`.

use crate::util::{PlainMapError, PlainMapResult};

/// Rectangle with a top-left origin, in pixel units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BoundingBox {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box covering a whole `width` x `height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Checks that the box is non-empty and fits inside an image.
    pub fn check_within(&self, img_width: usize, img_height: usize) -> PlainMapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlainMapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let fits_x = self
            .x
            .checked_add(self.width)
            .is_some_and(|end| end <= img_width);
        let fits_y = self
            .y
            .checked_add(self.height)
            .is_some_and(|end| end <= img_height);
        if !fits_x || !fits_y {
            return Err(PlainMapError::OutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                img_width,
                img_height,
            });
        }
        Ok(())
    }
}
