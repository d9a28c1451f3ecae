//! plainmap reads, transforms and writes plain-text pixel maps.
//!
//! Supported formats are `P2` (grayscale) and `P3` (RGB) with 8-bit
//! samples. Transforms never mutate their input: grayscale conversion,
//! bimodal thresholding and both rotation mappings return new buffers.
//! Optional features add row-parallel inverse rotation (`rayon`), PNG
//! previews via the `image` crate (`image-io`) and spans/events (`tracing`).

pub mod codec;
pub mod display;
pub mod image;
pub mod ops;
pub mod pipeline;
pub mod rotate;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use codec::{decode, encode, read_file, write_file};
pub use display::{DisplaySink, RecordingSink};
pub use crate::image::{BoundingBox, ImageVariant, PixelBuffer};
pub use ops::{threshold, to_gray, Histogram, ThresholdResult};
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport, Stage, StageError};
pub use rotate::{
    canvas_size, rotate_forward, rotate_inverse, CanvasSize, Mapping, RotationResult,
};
#[cfg(feature = "rayon")]
pub use rotate::rotate_inverse_par;
pub use util::{PlainMapError, PlainMapResult};
