//! Bimodal mean-of-means binarization.
//!
//! The threshold is the midpoint between the mean of the pixels at or below
//! the global mean and the mean of the pixels above it. It is computed in a
//! single pass over the histogram; there is no iterative refinement, so the
//! result is exactly reproducible for identical input.

use crate::image::{PixelBuffer, MAX_INTENSITY};
use crate::ops::histogram::Histogram;
use crate::trace::{trace_event, trace_span};
use crate::util::{PlainMapError, PlainMapResult};

/// Estimated threshold, its intermediate means and the binarized image.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdResult {
    /// Cutoff; intensities `<= threshold` map to 0, the rest to 255.
    pub threshold: f64,
    /// Mean of all intensities.
    pub mean: f64,
    /// Mean of intensities `<= mean` (or `mean` if there are none).
    pub low_mean: f64,
    /// Mean of intensities `> mean` (or `mean` if there are none).
    pub high_mean: f64,
    /// Single-channel 0/255 image with the source dimensions.
    pub binary: PixelBuffer,
}

/// Estimates the bimodal threshold of a gray buffer and binarizes it.
pub fn threshold(buffer: &PixelBuffer) -> PlainMapResult<ThresholdResult> {
    let _span = trace_span!("threshold", width = buffer.width(), height = buffer.height()).entered();

    if buffer.channels() != 1 {
        return Err(PlainMapError::UnsupportedChannelCount {
            channels: buffer.channels(),
            operation: "threshold",
        });
    }
    let hist = Histogram::from_gray(buffer)?;
    let mean = hist
        .mean()
        .ok_or(PlainMapError::InvalidDimensions {
            width: buffer.width(),
            height: buffer.height(),
        })?;
    let (low_mean, high_mean) = hist.split_means(mean);
    let low_mean = low_mean.unwrap_or(mean);
    let high_mean = high_mean.unwrap_or(mean);
    let threshold = (low_mean + high_mean) / 2.0;

    let binary = buffer
        .samples()
        .iter()
        .map(|&v| if f64::from(v) <= threshold { 0 } else { MAX_INTENSITY })
        .collect();

    trace_event!(
        "threshold",
        threshold = threshold,
        low_mean = low_mean,
        high_mean = high_mean
    );
    Ok(ThresholdResult {
        threshold,
        mean,
        low_mean,
        high_mean,
        binary: PixelBuffer::gray_from_parts(binary, buffer.width(), buffer.height(), MAX_INTENSITY),
    })
}

#[cfg(test)]
mod tests {
    use super::threshold;
    use crate::util::PlainMapError;
    use crate::PixelBuffer;

    #[test]
    fn two_level_image_splits_between_levels() {
        let buf = PixelBuffer::new(vec![0, 0, 0, 200], 2, 2, 1, 255).unwrap();
        let result = threshold(&buf).unwrap();
        assert_eq!(result.mean, 50.0);
        assert_eq!(result.threshold, 100.0);
        assert_eq!(result.binary.samples(), &[0, 0, 0, 255]);
    }

    #[test]
    fn rejects_color() {
        let buf = PixelBuffer::filled(2, 2, &[1, 2, 3]).unwrap();
        assert_eq!(
            threshold(&buf).unwrap_err(),
            PlainMapError::UnsupportedChannelCount {
                channels: 3,
                operation: "threshold",
            }
        );
    }

    #[test]
    fn binary_max_intensity_is_255_for_low_depth_input() {
        let buf = PixelBuffer::new(vec![1, 14], 2, 1, 1, 15).unwrap();
        let result = threshold(&buf).unwrap();
        assert_eq!(result.binary.max_intensity(), 255);
        assert_eq!(result.binary.samples(), &[0, 255]);
    }
}
