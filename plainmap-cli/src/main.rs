use clap::Parser;
use plainmap::io::PngPreviewSink;
use plainmap::{DisplaySink, Pipeline, PipelineConfig};
use serde::Deserialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Grayscale, threshold and rotate a P2/P3 pixel map")]
struct Cli {
    /// Input pixel map (P2 or P3).
    #[arg(
        short,
        long,
        value_name = "IMAGE",
        required_unless_present_any = ["print_schema", "print_example"]
    )]
    image: Option<PathBuf>,
    /// 1 to render each stage as a PNG preview, 0 to skip.
    #[arg(
        short,
        long,
        value_name = "DISPLAY",
        value_parser = clap::value_parser!(u8).range(0..=1),
        required_unless_present_any = ["print_schema", "print_example"]
    )]
    display: Option<u8>,
    /// Optional JSON configuration file; flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output directory.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Rotation angle in degrees (counter-clockwise).
    #[arg(short, long, value_name = "DEG", allow_negative_numbers = true)]
    angle: Option<f64>,
    /// Log file; defaults to <output_dir>/logfile.log.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Mirror log output to stderr.
    #[arg(long)]
    trace: bool,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    output_dir: PathBuf,
    angle_deg: f64,
    save_input_copy: bool,
    log_file: Option<PathBuf>,
    preview_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            output_dir: cfg.output_dir,
            angle_deg: cfg.angle_deg,
            save_input_copy: cfg.save_input_copy,
            log_file: None,
            preview_dir: None,
        }
    }
}

impl Config {
    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(angle) = cli.angle {
            self.angle_deg = angle;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = Some(path.clone());
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            output_dir: self.output_dir.clone(),
            angle_deg: self.angle_deg,
            save_input_copy: self.save_input_copy,
        }
    }
}

fn init_logging(log_path: &Path, mirror_stderr: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(log_path)?;
    let filter = EnvFilter::from_default_env()
        .add_directive("plainmap=info".parse()?)
        .add_directive("plainmap_cli=info".parse()?);
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);
    let stderr_layer = mirror_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => serde_json::from_str::<Config>(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    config.apply_overrides(&cli);

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.output_dir.join("logfile.log"));
    init_logging(&log_path, cli.trace)?;
    info!("logging initialized");

    let image = cli.image.ok_or("input image not specified")?;
    let display = cli.display.ok_or("display option not specified")? == 1;

    let mut preview = if display {
        let dir = config
            .preview_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.join("preview"));
        Some(PngPreviewSink::new(dir)?)
    } else {
        None
    };
    let sink = preview.as_mut().map(|s| s as &mut dyn DisplaySink);

    let pipeline = Pipeline::new(config.pipeline_config());
    match pipeline.run(&image, sink) {
        Ok(report) => {
            info!(threshold = report.threshold, "threshold value estimated");
            info!(
                width = report.forward_canvas.width,
                height = report.forward_canvas.height,
                "rotation canvas"
            );
            for path in &report.written {
                info!(path = %path.display(), "wrote image");
            }
            if let Some(preview) = &preview {
                info!(count = preview.written().len(), "wrote previews");
            }
            Ok(())
        }
        Err(err) => {
            error!(stage = %err.stage, error = %err.source, "pipeline failed");
            Err(err.into())
        }
    }
}
