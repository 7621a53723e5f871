//! Mosaic data model, assembly and piece manifests
//!
//! [`assemble`] turns a [`SampleGrid`] into a [`MosaicData`] bundle: one
//! palette-matched [`Cell`] per grid position, a piece inventory sorted by
//! count, and the base plates needed to mount it.
//!
//! # Base plates
//!
//! Plates are packed greedily from a stud total of `size * size`, where
//! `size` is the longer grid side. Non-square grids are therefore counted as
//! their bounding square.
//!
//! | Plate | Studs |
//! |-------|-------|
//! | 32×32 | 1024 |
//! | 16×16 | 256 |
//! | 8×16 | 128 |
//!
//! Any remainder below 128 studs rounds up to one more 8×16 plate, listed as
//! its own entry after the greedy ones.

use crate::matcher::ColorMatcher;
use crate::palette::{Palette, PaletteColor};
use crate::sampler::{GridDimensions, SampleGrid};
use serde::{Deserialize, Serialize};

/// Standard plate sizes, largest first: (label, studs).
const BASE_PLATES: &[(&str, u32)] = &[("32×32", 32 * 32), ("16×16", 16 * 16), ("8×16", 8 * 16)];

/// Label and stud count of the smallest plate, used for the round-up.
const SMALLEST_PLATE: (&str, u32) = ("8×16", 8 * 16);

/// Color of every base plate.
const BASE_PLATE_COLOR: &str = "Gray";

/// One grid position and the palette color assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub color: PaletteColor,
}

/// The complete cell grid, row-major, exactly `width * height` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicGrid {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<Cell>,
}

impl MosaicGrid {
    /// Grid dimensions
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions { width: self.width, height: self.height }
    }

    /// The cell at `(x, y)`, if any
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.x == x && c.y == y)
    }

    /// Rows of cells, top to bottom, as slices into the row-major list
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

/// How many pieces of one color the mosaic needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCount {
    pub color: PaletteColor,
    pub count: usize,
}

/// A number of identical base plates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRequirement {
    /// Plate size label, e.g. "32×32"
    pub size: String,
    pub count: u32,
    pub color: String,
}

/// Everything a conversion produces, handed to previews and exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicData {
    #[serde(flatten)]
    pub grid: MosaicGrid,
    /// Longer grid side, for consumers that assume a square grid
    pub size: u32,
    pub piece_count: Vec<PieceCount>,
    pub base_requirements: Vec<BaseRequirement>,
    pub total_pieces: usize,
}

impl MosaicData {
    pub fn width(&self) -> u32 {
        self.grid.width
    }

    pub fn height(&self) -> u32 {
        self.grid.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.grid.cells
    }

    /// The color at `(x, y)`, if the cell exists
    pub fn color_at(&self, x: u32, y: u32) -> Option<&PaletteColor> {
        self.grid.cell(x, y).map(|c| &c.color)
    }

    /// Total number of base plates across all sizes
    pub fn total_plates(&self) -> u32 {
        self.base_requirements.iter().map(|b| b.count).sum()
    }

    /// Check the structural invariants a deserialized mosaic must satisfy.
    ///
    /// Returns a list of problems; empty means consistent.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let expected = self.grid.width as usize * self.grid.height as usize;

        if self.grid.cells.len() != expected {
            problems.push(format!(
                "{} cells for a {}x{} grid (expected {})",
                self.grid.cells.len(),
                self.grid.width,
                self.grid.height,
                expected
            ));
        }
        if self.total_pieces != self.grid.cells.len() {
            problems.push(format!(
                "total_pieces is {} but there are {} cells",
                self.total_pieces,
                self.grid.cells.len()
            ));
        }
        let longest = self.grid.width.max(self.grid.height);
        if self.size != longest {
            problems.push(format!("size is {} but the longer grid side is {}", self.size, longest));
        }
        if self.base_requirements != base_requirements(longest) {
            problems.push(format!("base_requirements do not match a {}-stud grid", longest));
        }
        let counted: usize = self.piece_count.iter().map(|p| p.count).sum();
        if counted != self.grid.cells.len() {
            problems.push(format!("piece counts sum to {} instead of {}", counted, expected));
        }
        for (i, cell) in self.grid.cells.iter().enumerate() {
            let x = (i % self.grid.width.max(1) as usize) as u32;
            let y = (i / self.grid.width.max(1) as usize) as u32;
            if (cell.x, cell.y) != (x, y) {
                problems.push(format!("cell {} is at ({}, {}), expected ({}, {})", i, cell.x, cell.y, x, y));
                break;
            }
        }
        problems
    }
}

/// Build the mosaic for `samples`, matching every cell against `palette`.
pub fn assemble(samples: &SampleGrid, palette: &Palette) -> MosaicData {
    let matcher = ColorMatcher::new(palette);
    let cells: Vec<Cell> = samples
        .iter()
        .map(|((x, y), rgb)| Cell { x, y, color: matcher.closest(rgb).clone() })
        .collect();

    let grid = MosaicGrid { width: samples.width(), height: samples.height(), cells };
    let size = grid.width.max(grid.height);
    let piece_count = count_pieces(&grid.cells);
    let total_pieces = grid.cells.len();

    tracing::debug!(
        width = grid.width,
        height = grid.height,
        total_pieces,
        colors = piece_count.len(),
        "Assembled mosaic"
    );

    MosaicData { grid, size, piece_count, base_requirements: base_requirements(size), total_pieces }
}

/// Count cells per color, most used first.
///
/// Colors are keyed by the whole [`PaletteColor`], so two entries sharing a
/// hex value are still counted apart. Equal counts are ordered by palette
/// id, then hex, then name, so the result never depends on iteration order.
pub fn count_pieces(cells: &[Cell]) -> Vec<PieceCount> {
    let mut counts: Vec<PieceCount> = Vec::new();
    for cell in cells {
        match counts.iter_mut().find(|p| p.color == cell.color) {
            Some(entry) => entry.count += 1,
            None => counts.push(PieceCount { color: cell.color.clone(), count: 1 }),
        }
    }

    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.color.id.cmp(&b.color.id))
            .then_with(|| a.color.hex.cmp(&b.color.hex))
            .then_with(|| a.color.name.cmp(&b.color.name))
    });
    counts
}

/// Base plates for a mosaic whose longer side is `size` studs.
///
/// ```
/// use brickmosaic::mosaic::base_requirements;
///
/// let plates = base_requirements(32);
/// assert_eq!(plates.len(), 1);
/// assert_eq!((plates[0].size.as_str(), plates[0].count), ("32×32", 1));
/// ```
pub fn base_requirements(size: u32) -> Vec<BaseRequirement> {
    let mut remaining = size as u64 * size as u64;
    let mut requirements: Vec<BaseRequirement> = Vec::new();

    for &(label, studs) in BASE_PLATES {
        let count = remaining / studs as u64;
        if count > 0 {
            requirements.push(plate(label, count as u32));
            remaining -= count * studs as u64;
        }
    }

    if remaining > 0 {
        let (label, studs) = SMALLEST_PLATE;
        requirements.push(plate(label, remaining.div_ceil(studs as u64) as u32));
    }

    requirements
}

fn plate(label: &str, count: u32) -> BaseRequirement {
    BaseRequirement { size: label.to_string(), count, color: BASE_PLATE_COLOR.to_string() }
}

/// Override the color of the cell at `(x, y)` and recount pieces.
///
/// A coordinate outside the grid leaves the mosaic unchanged. Base plates
/// and `total_pieces` depend only on dimensions and are not touched.
pub fn edit_cell(mut mosaic: MosaicData, x: u32, y: u32, color: PaletteColor) -> MosaicData {
    let Some(index) = mosaic.grid.cells.iter().position(|c| c.x == x && c.y == y) else {
        tracing::debug!(x, y, "Edit outside mosaic grid ignored");
        return mosaic;
    };

    let cell = &mut mosaic.grid.cells[index];
    tracing::debug!(x, y, from = %cell.color.name, to = %color.name, "Editing cell");
    cell.color = color;
    mosaic.piece_count = count_pieces(&mosaic.grid.cells);
    mosaic
}
