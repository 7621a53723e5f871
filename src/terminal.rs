//! Terminal preview of a mosaic
//!
//! Draws each cell as a two-column block with a 24-bit background color, so
//! a cell looks roughly square in most terminal fonts.

use crate::color::Rgb;
use crate::mosaic::MosaicData;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a color to an ANSI 24-bit background escape sequence.
///
/// # Examples
///
/// ```
/// use brickmosaic::terminal::color_to_ansi_bg;
///
/// assert_eq!(color_to_ansi_bg([212, 40, 42]), "\x1b[48;2;212;40;42m");
/// ```
pub fn color_to_ansi_bg(rgb: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", rgb[0], rgb[1], rgb[2])
}

/// Render the mosaic with ANSI color backgrounds.
///
/// Returns `(colored_grid, legend)`. The legend lists every color used with a
/// swatch and its piece count, most used first.
pub fn render_ansi_mosaic(mosaic: &MosaicData) -> (String, String) {
    let mut output = String::new();

    for row in mosaic.grid.rows() {
        let mut current: Option<Rgb> = None;
        for cell in row {
            // Only emit an escape when the color changes along the row
            if current != Some(cell.color.rgb) {
                output.push_str(&color_to_ansi_bg(cell.color.rgb));
                current = Some(cell.color.rgb);
            }
            output.push_str("  ");
        }
        output.push_str(ANSI_RESET);
        output.push('\n');
    }

    let mut legend = String::from("\nLegend:\n");
    for piece in &mosaic.piece_count {
        legend.push_str(&format!(
            "  {}  {} {:16} ({}) x{}\n",
            color_to_ansi_bg(piece.color.rgb),
            ANSI_RESET,
            piece.color.name,
            piece.color.hex,
            piece.count
        ));
    }

    (output, legend)
}
