//! JSON export of the complete mosaic.
//!
//! The file is the serialized [`MosaicData`] and is the input format for
//! `brick edit`, so everything needed to re-render the mosaic is kept.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "width": 32,
//!   "height": 24,
//!   "cells": [
//!     { "x": 0, "y": 0, "color": { "id": 1, "name": "White", "hex": "#FFFFFF", "rgb": [255, 255, 255] } }
//!   ],
//!   "size": 32,
//!   "piece_count": [
//!     { "color": { "id": 1, "name": "White", "hex": "#FFFFFF", "rgb": [255, 255, 255] }, "count": 768 }
//!   ],
//!   "base_requirements": [
//!     { "size": "32×32", "count": 1, "color": "Gray" }
//!   ],
//!   "total_pieces": 768
//! }
//! ```

use crate::export::{ExportError, ExportOptions, Exporter, Result};
use crate::mosaic::MosaicData;
use crate::output::write_text;
use std::path::Path;

/// JSON format exporter.
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter.
    pub fn new() -> Self {
        Self
    }

    /// Serialize the mosaic to a JSON string.
    pub fn export_to_string(&self, mosaic: &MosaicData, options: &ExportOptions) -> Result<String> {
        let json = if options.pretty {
            serde_json::to_string_pretty(mosaic)?
        } else {
            serde_json::to_string(mosaic)?
        };
        Ok(json)
    }
}

impl Exporter for JsonExporter {
    fn export(
        &self,
        mosaic: &MosaicData,
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<()> {
        let mut json = self.export_to_string(mosaic, options)?;
        json.push('\n');
        write_text(&json, output_path)
    }

    fn format_name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Read a mosaic previously written by [`JsonExporter`].
///
/// The file must parse and pass [`MosaicData::check`].
pub fn load_mosaic(path: &Path) -> Result<MosaicData> {
    let contents = std::fs::read_to_string(path)?;
    let mosaic: MosaicData = serde_json::from_str(&contents)?;

    let problems = mosaic.check();
    if !problems.is_empty() {
        return Err(ExportError::Config(format!(
            "{} is not a consistent mosaic: {}",
            path.display(),
            problems.join("; ")
        )));
    }
    Ok(mosaic)
}
