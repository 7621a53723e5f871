//! Plain-text shopping list.
//!
//! # Example Output
//!
//! ```text
//! Brick Mosaic Shopping List
//! ==========================
//!
//! Mosaic: 48×32 studs
//! Total pieces: 1536
//!
//! Pieces (1×1):
//!    812 x White (#FFFFFF)
//!    724 x Black (#1E1E1E)
//!
//! Base plates:
//!      2 x 32×32 Gray
//!      1 x 16×16 Gray
//! ```

use crate::export::{ExportOptions, Exporter, Result};
use crate::mosaic::MosaicData;
use crate::output::write_text;
use std::path::Path;

/// Shopping list exporter.
#[derive(Debug, Default)]
pub struct ListExporter;

impl ListExporter {
    /// Create a new shopping list exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for ListExporter {
    fn export(
        &self,
        mosaic: &MosaicData,
        output_path: &Path,
        _options: &ExportOptions,
    ) -> Result<()> {
        write_text(&render_shopping_list(mosaic), output_path)
    }

    fn format_name(&self) -> &'static str {
        "shopping list"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// Render the piece inventory and base plates as a shopping list.
pub fn render_shopping_list(mosaic: &MosaicData) -> String {
    let title = "Brick Mosaic Shopping List";
    let mut output = String::new();
    output.push_str(&format!("{}\n{}\n\n", title, "=".repeat(title.len())));
    output.push_str(&format!("Mosaic: {}×{} studs\n", mosaic.width(), mosaic.height()));
    output.push_str(&format!("Total pieces: {}\n\n", mosaic.total_pieces));

    output.push_str("Pieces (1×1):\n");
    for piece in &mosaic.piece_count {
        output.push_str(&format!(
            "  {:>5} x {} ({})\n",
            piece.count, piece.color.name, piece.color.hex
        ));
    }

    output.push_str("\nBase plates:\n");
    if mosaic.base_requirements.is_empty() {
        output.push_str("  none\n");
    }
    for plate in &mosaic.base_requirements {
        output.push_str(&format!("  {:>5} x {} {}\n", plate.count, plate.size, plate.color));
    }

    output
}
