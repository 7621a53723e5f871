//! Paginated build instructions in Markdown.
//!
//! The document opens with a summary, a color key and the base plates, then
//! splits the grid into square pages of `page_size` cells (32 by default, one
//! large base plate per page). Every color is drawn as a one-character symbol
//! from the key, and each page lists the pieces it uses.

use crate::export::{ExportError, ExportOptions, Exporter, Result};
use crate::mosaic::MosaicData;
use crate::palette::PaletteColor;
use crate::output::write_text;
use std::collections::HashMap;
use std::path::Path;

/// Symbols handed out to colors, most used color first.
const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Symbol used once the alphabet runs out.
const OVERFLOW_SYMBOL: char = '?';

/// Instructions document exporter.
#[derive(Debug, Default)]
pub struct DocumentExporter;

impl DocumentExporter {
    /// Create a new instructions exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for DocumentExporter {
    fn export(
        &self,
        mosaic: &MosaicData,
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<()> {
        let document = render_instructions(mosaic, options.page_size)?;
        write_text(&document, output_path)
    }

    fn format_name(&self) -> &'static str {
        "instructions"
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// A rectangular section of the grid printed on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Split a `width x height` grid into pages of at most `page_size` cells a side.
///
/// Pages run left to right, then top to bottom.
pub fn paginate(width: u32, height: u32, page_size: u32) -> Vec<Page> {
    let page_size = page_size.max(1);
    let mut pages = Vec::new();
    let mut number = 1;
    for y in (0..height).step_by(page_size as usize) {
        for x in (0..width).step_by(page_size as usize) {
            pages.push(Page {
                number,
                x,
                y,
                width: page_size.min(width - x),
                height: page_size.min(height - y),
            });
            number += 1;
        }
    }
    pages
}

/// Render the full instructions document.
pub fn render_instructions(mosaic: &MosaicData, page_size: u32) -> Result<String> {
    if page_size == 0 {
        return Err(ExportError::Config("page size must be a positive integer".to_string()));
    }

    let symbols: HashMap<&PaletteColor, char> = mosaic
        .piece_count
        .iter()
        .enumerate()
        .map(|(i, piece)| (&piece.color, symbol_for(i)))
        .collect();

    let width = mosaic.width() as usize;
    let mut grid = vec![' '; width * mosaic.height() as usize];
    for cell in mosaic.cells() {
        if cell.x < mosaic.width() && cell.y < mosaic.height() {
            grid[cell.y as usize * width + cell.x as usize] =
                symbols.get(&cell.color).copied().unwrap_or(OVERFLOW_SYMBOL);
        }
    }

    let pages = paginate(mosaic.width(), mosaic.height(), page_size);
    let mut output = String::new();

    output.push_str("# Brick Mosaic Instructions\n\n");
    output.push_str(&format!("- Size: {}×{} studs\n", mosaic.width(), mosaic.height()));
    output.push_str(&format!("- Total pieces: {}\n", mosaic.total_pieces));
    output.push_str(&format!("- Colors: {}\n", mosaic.piece_count.len()));
    output.push_str(&format!("- Pages: {}\n\n", pages.len()));

    output.push_str("## Color Key\n\n");
    output.push_str("| Symbol | Color | Hex | Pieces |\n");
    output.push_str("|--------|-------|-----|--------|\n");
    for (i, piece) in mosaic.piece_count.iter().enumerate() {
        output.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            symbol_for(i),
            piece.color.name,
            piece.color.hex,
            piece.count
        ));
    }

    output.push_str("\n## Base Plates\n\n");
    output.push_str("| Plates | Size | Color |\n");
    output.push_str("|--------|------|-------|\n");
    for plate in &mosaic.base_requirements {
        output.push_str(&format!("| {} | {} | {} |\n", plate.count, plate.size, plate.color));
    }

    for page in &pages {
        output.push_str("\n---\n\n");
        render_page(&mut output, page, pages.len(), &grid, width);
    }

    Ok(output)
}

fn render_page(output: &mut String, page: &Page, page_count: usize, grid: &[char], width: usize) {
    output.push_str(&format!(
        "## Page {} of {}: columns {}-{}, rows {}-{}\n\n",
        page.number,
        page_count,
        page.x,
        page.x + page.width - 1,
        page.y,
        page.y + page.height - 1
    ));

    output.push_str("```text\n");
    let units: String = (page.x..page.x + page.width)
        .map(|x| char::from_digit(x % 10, 10).unwrap_or(' '))
        .collect();
    output.push_str(&format!("      {}\n", units));

    let mut used: Vec<(char, usize)> = Vec::new();
    for y in page.y..page.y + page.height {
        let start = y as usize * width + page.x as usize;
        let row = &grid[start..start + page.width as usize];
        output.push_str(&format!("{:>4}  {}\n", y, row.iter().collect::<String>()));

        for &symbol in row {
            match used.iter_mut().find(|(s, _)| *s == symbol) {
                Some(entry) => entry.1 += 1,
                None => used.push((symbol, 1)),
            }
        }
    }
    output.push_str("```\n\n");

    used.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let summary: Vec<String> =
        used.iter().map(|(symbol, count)| format!("`{}` x{}", symbol, count)).collect();
    output.push_str(&format!("Pieces on this page: {}\n", summary.join(", ")));
}

fn symbol_for(index: usize) -> char {
    SYMBOLS.get(index).map(|&b| b as char).unwrap_or(OVERFLOW_SYMBOL)
}
