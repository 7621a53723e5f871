//! Export formats for finished mosaics.
//!
//! Each exporter consumes a [`MosaicData`] and writes one file. None of them
//! alter the mosaic.
//!
//! # Supported Formats
//!
//! - **PNG** ([`RasterExporter`]): one solid block per cell
//! - **Instructions** ([`DocumentExporter`]): paginated Markdown build guide
//! - **Shopping list** ([`ListExporter`]): pieces and base plates to buy
//! - **JSON** ([`JsonExporter`]): the full `MosaicData`, readable by `brick edit`
//!
//! # Example
//!
//! ```ignore
//! use brickmosaic::export::{ExportFormat, ExportOptions};
//!
//! let exporter = ExportFormat::Png.exporter();
//! exporter.export(&mosaic, Path::new("mosaic.png"), &ExportOptions::default())?;
//! ```

pub mod document;
pub mod json;
pub mod list;
pub mod raster;

pub use document::*;
pub use json::*;
pub use list::*;
pub use raster::*;

use crate::mosaic::MosaicData;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Common error type for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error during file writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Invalid export settings
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Options for export operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Pixels per cell side in PNG output
    pub scale: u32,
    /// Outline each cell in PNG output
    pub grid_lines: bool,
    /// Cells per page side in the instructions document
    pub page_size: u32,
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { scale: 16, grid_lines: true, page_size: 32, pretty: true }
    }
}

impl From<&crate::config::ExportConfig> for ExportOptions {
    fn from(config: &crate::config::ExportConfig) -> Self {
        Self {
            scale: config.scale,
            grid_lines: config.grid_lines,
            page_size: config.page_size,
            ..Default::default()
        }
    }
}

/// Trait for export format implementations.
pub trait Exporter {
    /// Export the mosaic to the specified path.
    fn export(&self, mosaic: &MosaicData, output_path: &Path, options: &ExportOptions)
        -> Result<()>;

    /// Get the format name for this exporter.
    fn format_name(&self) -> &'static str;

    /// Get the default file extension for this format.
    fn extension(&self) -> &'static str;
}

/// Output formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Flat color PNG image
    Png,
    /// Paginated build instructions
    Doc,
    /// Shopping list of pieces and base plates
    List,
    /// Full mosaic data as JSON
    Json,
}

impl ExportFormat {
    /// The exporter implementing this format
    pub fn exporter(self) -> Box<dyn Exporter + Send + Sync> {
        match self {
            ExportFormat::Png => Box::new(RasterExporter::new()),
            ExportFormat::Doc => Box::new(DocumentExporter::new()),
            ExportFormat::List => Box::new(ListExporter::new()),
            ExportFormat::Json => Box::new(JsonExporter::new()),
        }
    }
}
