//! Renders the frequency spectrum of one image channel to a PNG.
//!
//! Run from repo root:
//!   `cargo run -p spectrum-view -- photo.jpg`                      - grayscale, photo_spectrum.png
//!   `cargo run -p spectrum-view -- photo.jpg -c red -o red.png`     - red channel
//!   `cargo run -p spectrum-view -- photo.jpg --layout separable`    - textbook 2D layout
//!   `cargo run -p spectrum-view -- photo.jpg --config view.json -v` - settings from JSON
//!   `cargo run -p spectrum-view -- photo.jpg --pad`                 - zero-pad instead of resize

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rhizome_resin_image::{PowerOfTwo, export_png, load_pixels_with};
use rhizome_resin_spectral::{Channel, SpectrumLayout, SpectrumView};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render the log-magnitude frequency spectrum of an image channel.
///
/// The image is resized (or padded with `--pad`) to power-of-two sides before
/// transforming. The output is an opaque grayscale PNG with the same dimensions.
#[derive(Debug, Parser)]
#[command(name = "spectrum-view")]
#[command(version)]
struct Cli {
    /// Input image (any format the `image` crate decodes)
    input: PathBuf,

    /// Output PNG (default: <input stem>_spectrum.png next to the input)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// JSON file with a serialized SpectrumView
    #[arg(long)]
    config: Option<PathBuf>,

    /// Channel to sample: red, green, blue, alpha, grayscale
    #[arg(short = 'c', long)]
    channel: Option<Channel>,

    /// Display layout: flattened or separable
    #[arg(short = 'l', long)]
    layout: Option<SpectrumLayout>,

    /// Gain applied to magnitudes before log compression
    #[arg(long)]
    log_gain: Option<f64>,

    /// Zero-pad to power-of-two sides instead of resizing
    #[arg(long)]
    pad: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Builds the operation from the config file, then applies flag overrides.
    fn view(&self) -> Result<SpectrumView> {
        let mut view = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SpectrumView::default(),
        };

        if let Some(channel) = self.channel {
            view = view.with_channel(channel);
        }
        if let Some(layout) = self.layout {
            view = view.with_layout(layout);
        }
        if let Some(gain) = self.log_gain {
            view = view.with_log_gain(gain);
        }
        view.validate().context("invalid spectrum settings")?;
        Ok(view)
    }

    fn normalization(&self) -> PowerOfTwo {
        if self.pad {
            PowerOfTwo::Pad
        } else {
            PowerOfTwo::Resize
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.input))
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    input.with_file_name(format!("{stem}_spectrum.png"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let view = cli.view()?;
    let pixels = load_pixels_with(&cli.input, cli.normalization())
        .with_context(|| format!("loading {}", cli.input.display()))?;
    info!(input = %cli.input.display(), size = %pixels, "loaded");

    let spectrum = view.apply(&pixels)?;

    let output = cli.output_path();
    export_png(&spectrum, &output).with_context(|| format!("writing {}", output.display()))?;
    info!(output = %output.display(), "spectrum written");

    Ok(())
}
