//! Per-pixel transforms: grayscale conversion and bimodal thresholding.

pub mod gray;
pub mod histogram;
pub mod threshold;

pub use gray::to_gray;
pub use histogram::Histogram;
pub use threshold::{threshold, ThresholdResult};
