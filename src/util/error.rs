//! Error types for plainmap.

use thiserror::Error;

/// Result alias for plainmap operations.
pub type PlainMapResult<T> = std::result::Result<T, PlainMapError>;

/// Errors that can occur when reading, transforming or writing pixel maps.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlainMapError {
    /// Header or sample data does not describe a valid pixel map.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
    /// The format tag is neither `P2` nor `P3`.
    #[error("unsupported format tag {tag:?}")]
    UnsupportedFormat { tag: String },
    /// The operation cannot handle buffers with this many channels.
    #[error("{operation} does not support {channels} channel(s)")]
    UnsupportedChannelCount {
        channels: usize,
        operation: &'static str,
    },
    /// A pixel or region lies (partly) outside the buffer.
    #[error("region ({x}, {y}, {width}x{height}) is outside the {img_width}x{img_height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Width or height is zero or overflows the sample count.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A pixel value does not carry one sample per channel.
    #[error("pixel value has {got} sample(s), expected {expected}")]
    PixelLengthMismatch { expected: usize, got: usize },
    /// The rotation angle is NaN or infinite.
    #[error("rotation angle {angle_deg} is not finite")]
    InvalidAngle { angle_deg: f64 },
    /// Opening, reading, writing or creating a file failed.
    #[error("i/o failure on {path}: {reason}")]
    Io { path: String, reason: String },
}

impl PlainMapError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}
