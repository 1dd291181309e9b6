#![deny(unsafe_code)]
//! CLI binary for the colorramp gradient engine.
//!
//! Subcommands:
//! - `sample -n N` prints N evenly spaced colors
//! - `at T...` evaluates the gradient at the given positions
//! - `render` writes the gradient as a PNG strip
//! - `list` prints blend modes, interpolations and spread modes
//!
//! The gradient is described by flags (`--colors`, `--css`, `--mode`, ...) or
//! by a `--config` JSON object; flags given alongside `--config` override it.

mod error;

use clap::{Args, Parser, Subcommand};
use colorramp_core::{
    BlendMode, Gradient, GradientConfig, Interpolation, SharpConfig, SpreadMode,
};
use error::CliError;
use std::path::PathBuf;
use std::process;
use strum::VariantNames;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "colorramp", about = "Color gradient sampling and rendering")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log debug events to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    gradient: GradientArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GradientArgs {
    /// Gradient description as a JSON object.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Comma-separated CSS colors (e.g. "gold,teal,#203").
    #[arg(short, long, global = true, value_delimiter = ',')]
    colors: Vec<String>,

    /// Comma-separated positions: two bounds or one per color.
    #[arg(
        short,
        long,
        global = true,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    positions: Vec<f64>,

    /// CSS gradient stop list (e.g. "red, lime 40%, blue").
    #[arg(long, global = true)]
    css: Option<String>,

    /// Blend mode (see `list`).
    #[arg(short, long, global = true)]
    mode: Option<BlendMode>,

    /// Interpolation method (see `list`).
    #[arg(short, long, global = true)]
    interpolation: Option<Interpolation>,

    /// Quantize into this many flat segments.
    #[arg(long, global = true)]
    sharp: Option<usize>,

    /// Width of the transitions between sharp segments, 0 to 1.
    #[arg(long, global = true, default_value_t = 0.0)]
    smoothness: f64,
}

impl GradientArgs {
    fn config(&self) -> Result<GradientConfig, CliError> {
        let mut config = match &self.config {
            Some(json) => GradientConfig::from_json(json)
                .map_err(|e| CliError::Input(format!("invalid --config: {e}")))?,
            None => GradientConfig::default(),
        };
        if !self.colors.is_empty() {
            config.colors = self.colors.clone();
        }
        if !self.positions.is_empty() {
            config.positions = self.positions.clone();
        }
        if self.css.is_some() {
            config.css = self.css.clone();
        }
        if let Some(mode) = self.mode {
            config.blend_mode = mode;
        }
        if let Some(interpolation) = self.interpolation {
            config.interpolation = interpolation;
        }
        if let Some(segments) = self.sharp {
            config.sharp = Some(SharpConfig {
                segments,
                smoothness: self.smoothness,
            });
        }
        Ok(config)
    }

    fn build(&self) -> Result<Gradient, CliError> {
        let config = self.config()?;
        debug!(?config, "gradient configuration");
        Ok(config.build()?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print N evenly spaced, gamut-clamped colors.
    Sample {
        /// Number of colors.
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
    /// Evaluate the gradient at one or more positions.
    At {
        /// Positions to evaluate.
        #[arg(value_name = "T", required = true, allow_negative_numbers = true)]
        at: Vec<f64>,

        /// How positions outside the domain are mapped back.
        #[arg(short, long, default_value_t = SpreadMode::Clamp)]
        spread: SpreadMode,
    },
    /// Write the gradient as a horizontal PNG strip.
    Render {
        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 256)]
        width: u32,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 32)]
        height: u32,

        /// How positions outside the domain are mapped back.
        #[arg(short, long, default_value_t = SpreadMode::Clamp)]
        spread: SpreadMode,

        /// Position at the left edge (defaults to the domain minimum).
        #[arg(long, allow_negative_numbers = true)]
        from: Option<f64>,

        /// Position at the right edge (defaults to the domain maximum).
        #[arg(long, allow_negative_numbers = true)]
        to: Option<f64>,

        /// Output file path.
        #[arg(short, long, default_value = "gradient.png")]
        output: PathBuf,
    },
    /// List blend modes, interpolations and spread modes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            if cli.json {
                let info = serde_json::json!({
                    "blend_modes": BlendMode::VARIANTS,
                    "interpolations": Interpolation::VARIANTS,
                    "spread_modes": SpreadMode::VARIANTS,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Blend modes:");
                println!("  {}", BlendMode::VARIANTS.join(", "));
                println!("Interpolations:");
                println!("  {}", Interpolation::VARIANTS.join(", "));
                println!("Spread modes:");
                println!("  {}", SpreadMode::VARIANTS.join(", "));
            }
        }
        Command::Sample { count } => {
            let gradient = cli.gradient.build()?;
            let colors = gradient.colors(count);
            if cli.json {
                let (min, max) = gradient.domain();
                let info = serde_json::json!({
                    "domain": [min, max],
                    "colors": colors,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for color in colors {
                    println!("{color}");
                }
            }
        }
        Command::At { at, spread } => {
            let gradient = cli.gradient.build()?;
            let samples: Vec<_> = at
                .iter()
                .map(|&t| (t, gradient.spread_at(t, spread)))
                .collect();
            if cli.json {
                let info: Vec<_> = samples
                    .iter()
                    .map(|(t, color)| serde_json::json!({ "t": t, "color": color }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (t, color) in samples {
                    println!("{t}\t{color}");
                }
            }
        }
        Command::Render {
            width,
            height,
            spread,
            from,
            to,
            output,
        } => {
            let gradient = cli.gradient.build()?;
            let (min, max) = gradient.domain();
            let span = (from.unwrap_or(min), to.unwrap_or(max));

            colorramp_render::snapshot::write_span_png(
                &gradient, width, height, spread, span, &output,
            )?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "spread": spread.to_string(),
                    "span": [span.0, span.1],
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {width}x{height} ({spread}, {} to {}) -> {}",
                    span.0,
                    span.1,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json()).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
