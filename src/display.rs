//! Display sinks receive intermediate buffers for visualization.

use crate::image::PixelBuffer;
use crate::util::PlainMapResult;

/// Receiver for buffers a caller wants rendered.
///
/// `label` names the pipeline stage that produced the buffer (for example
/// `gray_image`), so sinks can title windows or name files after it.
pub trait DisplaySink {
    fn show(&mut self, label: &str, buffer: &PixelBuffer) -> PlainMapResult<()>;
}

/// Sink that records labels and dimensions without rendering anything.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    shown: Vec<(String, usize, usize)>,
}

impl RecordingSink {
    /// Returns `(label, width, height)` for every buffer shown so far.
    pub fn shown(&self) -> &[(String, usize, usize)] {
        &self.shown
    }
}

impl DisplaySink for RecordingSink {
    fn show(&mut self, label: &str, buffer: &PixelBuffer) -> PlainMapResult<()> {
        self.shown
            .push((label.to_owned(), buffer.width(), buffer.height()));
        Ok(())
    }
}
