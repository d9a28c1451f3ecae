//! End-to-end processing run: load, convert, threshold, rotate, save.
//!
//! Each stage writes its result into the output directory and, when a
//! [`DisplaySink`] is supplied, shows it. The first failing stage stops the
//! run; its error is wrapped in a [`StageError`] naming the stage.

use crate::codec::{read_file, write_file};
use crate::display::DisplaySink;
use crate::image::PixelBuffer;
use crate::ops::{threshold, to_gray};
use crate::rotate::{rotate_forward, rotate_inverse, CanvasSize};
use crate::trace::{trace_event, trace_span};
use crate::util::{PlainMapError, PlainMapResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default rotation angle in degrees.
pub const DEFAULT_ANGLE_DEG: f64 = 55.0;

/// Settings for a [`Pipeline`] run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Directory that receives the output images; created if missing.
    pub output_dir: PathBuf,
    /// Rotation angle in degrees, counter-clockwise.
    pub angle_deg: f64,
    /// Write the decoded input back out as `input_image.<ext>`.
    pub save_input_copy: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            angle_deg: DEFAULT_ANGLE_DEG,
            save_input_copy: true,
        }
    }
}

/// Steps of a pipeline run, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Prepare,
    Load,
    SaveInput,
    Gray,
    Threshold,
    RotateForward,
    RotateInverse,
    Display,
    Save,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prepare => "prepare output directory",
            Self::Load => "image loading",
            Self::SaveInput => "input saving",
            Self::Gray => "color to gray conversion",
            Self::Threshold => "image thresholding",
            Self::RotateForward => "image rotation",
            Self::RotateInverse => "image rotation with inverse mapping",
            Self::Display => "image display",
            Self::Save => "image saving",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline stage failed.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: PlainMapError,
}

/// Summary of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    pub input_width: usize,
    pub input_height: usize,
    pub input_channels: usize,
    /// Estimated bimodal threshold of the gray image.
    pub threshold: f64,
    pub forward_canvas: CanvasSize,
    pub inverse_canvas: CanvasSize,
    /// Files written, in stage order.
    pub written: Vec<PathBuf>,
}

/// Runs the standard processing sequence on one input file.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes `input`, writing outputs and optionally showing each stage.
    pub fn run(
        &self,
        input: &Path,
        mut sink: Option<&mut dyn DisplaySink>,
    ) -> Result<PipelineReport, StageError> {
        let _span = trace_span!("pipeline", angle_deg = self.config.angle_deg).entered();
        let out_dir = &self.config.output_dir;
        let mut written = Vec::new();

        stage(Stage::Prepare, || {
            fs::create_dir_all(out_dir).map_err(|err| PlainMapError::io(out_dir, err))
        })?;

        let image = stage(Stage::Load, || read_file(input))?;
        show(&mut sink, "input_image", &image)?;
        if self.config.save_input_copy {
            let path = out_dir.join(format!("input_image.{}", image.variant().extension()));
            stage(Stage::SaveInput, || write_file(&path, &image))?;
            written.push(path);
        }

        let gray = stage(Stage::Gray, || to_gray(&image))?;
        show(&mut sink, "gray_image", &gray)?;
        written.push(save(out_dir, "gray_image", &gray)?);

        let thresholded = stage(Stage::Threshold, || threshold(&gray))?;
        trace_event!("threshold_estimated", threshold = thresholded.threshold);
        show(&mut sink, "binary_image", &thresholded.binary)?;
        written.push(save(out_dir, "binary_image", &thresholded.binary)?);

        let forward = stage(Stage::RotateForward, || {
            rotate_forward(&image, self.config.angle_deg)
        })?;
        show(&mut sink, "rotated_image", &forward.image)?;
        written.push(save(out_dir, "rotated_image", &forward.image)?);

        let inverse = stage(Stage::RotateInverse, || {
            rotate_inverse(&image, self.config.angle_deg)
        })?;
        show(&mut sink, "rotated_image_inv", &inverse.image)?;
        written.push(save(out_dir, "rotated_image_inv", &inverse.image)?);

        Ok(PipelineReport {
            input_width: image.width(),
            input_height: image.height(),
            input_channels: image.channels(),
            threshold: thresholded.threshold,
            forward_canvas: forward.canvas,
            inverse_canvas: inverse.canvas,
            written,
        })
    }
}

fn stage<T>(stage: Stage, f: impl FnOnce() -> PlainMapResult<T>) -> Result<T, StageError> {
    match f() {
        Ok(value) => {
            trace_event!("stage_succeeded", stage = stage.as_str());
            Ok(value)
        }
        Err(source) => {
            let message = source.to_string();
            trace_event!(error: "stage_failed", stage = stage.as_str(), error = message.as_str());
            Err(StageError { stage, source })
        }
    }
}

fn show(
    sink: &mut Option<&mut dyn DisplaySink>,
    label: &str,
    buffer: &PixelBuffer,
) -> Result<(), StageError> {
    match sink {
        Some(sink) => stage(Stage::Display, || sink.show(label, buffer)),
        None => Ok(()),
    }
}

fn save(dir: &Path, name: &str, buffer: &PixelBuffer) -> Result<PathBuf, StageError> {
    let path = dir.join(format!("{name}.{}", buffer.variant().extension()));
    stage(Stage::Save, || write_file(&path, buffer))?;
    Ok(path)
}
