//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod edit;
mod palette;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{check, load_config, merge_cli_overrides, CliOverrides, MosaicConfig};
use crate::export::ExportFormat;
use crate::sampler::ResampleFilter;

pub use palette::PaletteAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// brick - Turn images into brick mosaics
#[derive(Parser)]
#[command(name = "brick")]
#[command(about = "brick - Convert images into brick mosaics with piece counts and build instructions")]
#[command(version)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to mosaic.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert images into mosaics
    Convert {
        /// Input images (glob patterns are expanded)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output file or directory.
        /// If omitted: {input}_mosaic.{ext}
        /// If file (single input): output.{ext}
        /// If file (multiple): output_{input}.{ext}
        /// If directory (ends with /): dir/{input}_mosaic.{ext}
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Square grid side in studs (at least 16; default: fit to the image)
        #[arg(long)]
        size: Option<u32>,

        /// Downscale images so the longest side is at most this many pixels (0 disables)
        #[arg(long)]
        max_side: Option<u32>,

        /// Resampling filter used when sampling the grid
        #[arg(long, value_enum)]
        filter: Option<ResampleFilter>,

        /// Built-in palette to match against
        #[arg(long)]
        palette: Option<String>,

        /// Output formats, comma separated or repeated
        #[arg(short, long, value_enum, value_delimiter = ',', default_value = "png")]
        format: Vec<ExportFormat>,

        /// Pixels per cell in PNG output
        #[arg(long)]
        scale: Option<u32>,

        /// Do not outline cells in PNG output
        #[arg(long)]
        no_grid_lines: bool,

        /// Print a colored preview to the terminal
        #[arg(long)]
        preview: bool,
    },

    /// Change the color of one cell in a mosaic saved as JSON
    Edit {
        /// Mosaic JSON written by `brick convert --format json`
        input: PathBuf,

        /// Column of the cell (0-based)
        #[arg(short, long)]
        x: u32,

        /// Row of the cell (0-based)
        #[arg(short, long)]
        y: u32,

        /// New color: palette name, id or hex. Other colors snap to the closest palette color.
        #[arg(short, long)]
        color: String,

        /// Where to write the edited mosaic (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a colored preview of the edited mosaic
        #[arg(long)]
        preview: bool,
    },

    /// List and inspect palettes
    Palette {
        #[command(subcommand)]
        action: PaletteAction,
    },
}

/// Verbosity level for the logger: -1 for quiet, otherwise the `-v` count.
fn verbosity(verbose: u8, quiet: bool) -> i8 {
    if quiet {
        -1
    } else {
        verbose.min(i8::MAX as u8) as i8
    }
}

/// Load mosaic.toml, apply CLI overrides and validate the result.
///
/// Prints the error and returns the exit code on failure.
pub(crate) fn resolve_config(
    path: Option<&std::path::Path>,
    overrides: &CliOverrides,
) -> Result<MosaicConfig, ExitCode> {
    let mut config = load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    merge_cli_overrides(&mut config, overrides);
    check(config).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init(verbosity(cli.verbose, cli.quiet));
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            size,
            max_side,
            filter,
            palette,
            format,
            scale,
            no_grid_lines,
            preview,
        } => {
            let overrides = CliOverrides { size, max_side, filter, palette, scale, no_grid_lines };
            convert::run_convert(
                &inputs,
                output.as_deref(),
                &format,
                preview,
                config_path,
                &overrides,
            )
        }
        Commands::Edit { input, x, y, color, output, preview } => {
            edit::run_edit(&input, x, y, &color, output.as_deref(), preview, config_path)
        }
        Commands::Palette { action } => palette::run_palette(action, config_path),
    }
}
