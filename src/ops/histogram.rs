//! 256-bin intensity histogram for single-channel buffers.

use crate::image::PixelBuffer;
use crate::util::{PlainMapError, PlainMapResult};

/// Number of bins, one per `u8` intensity.
pub const NUM_BINS: usize = 256;

/// Pixel counts per intensity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; NUM_BINS],
    total: u64,
}

impl Histogram {
    /// Builds the histogram of a single-channel buffer.
    pub fn from_gray(buffer: &PixelBuffer) -> PlainMapResult<Self> {
        if buffer.channels() != 1 {
            return Err(PlainMapError::UnsupportedChannelCount {
                channels: buffer.channels(),
                operation: "histogram",
            });
        }
        Ok(Self::from_samples(buffer.samples()))
    }

    /// Builds a histogram from raw intensities.
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut bins = [0u64; NUM_BINS];
        for &value in samples {
            bins[value as usize] += 1;
        }
        Self {
            bins,
            total: samples.len() as u64,
        }
    }

    pub fn bins(&self) -> &[u64; NUM_BINS] {
        &self.bins
    }

    /// Number of samples counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Mean intensity, or `None` for an empty histogram.
    pub fn mean(&self) -> Option<f64> {
        self.range_mean(0..=u8::MAX)
    }

    /// Means of the intensities `<= split` and `> split`.
    ///
    /// Either side is `None` when no sample falls into it.
    pub fn split_means(&self, split: f64) -> (Option<f64>, Option<f64>) {
        if split < 0.0 {
            return (None, self.mean());
        }
        if split >= f64::from(u8::MAX) {
            return (self.mean(), None);
        }
        // Intensities are integers, so `v <= split` iff `v <= floor(split)`.
        let last_low = split.floor() as u8;
        (
            self.range_mean(0..=last_low),
            self.range_mean(last_low + 1..=u8::MAX),
        )
    }

    fn range_mean(&self, range: std::ops::RangeInclusive<u8>) -> Option<f64> {
        let (count, sum) = range.fold((0u64, 0u64), |(count, sum), value| {
            let n = self.bins[value as usize];
            (count + n, sum + n * u64::from(value))
        });
        (count > 0).then(|| sum as f64 / count as f64)
    }
}
