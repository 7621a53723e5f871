//! brickmosaic - Library for turning images into brick mosaics
//!
//! This library provides functionality to:
//! - Decode an image, optionally downscale it and sample it onto a stud grid
//! - Match every cell to the closest color of a brick palette
//! - Count the pieces and base plates needed to build the result
//! - Export mosaics as PNG, build instructions, shopping lists and JSON

pub mod cli;
pub mod color;
pub mod config;
pub mod downscale;
pub mod error;
pub mod export;
pub mod logging;
pub mod matcher;
pub mod mosaic;
pub mod output;
pub mod palette;
pub mod palettes;
pub mod pipeline;
pub mod sampler;
pub mod terminal;

pub use error::{MosaicError, Result};
pub use mosaic::{edit_cell, BaseRequirement, Cell, MosaicData, MosaicGrid, PieceCount};
pub use palette::{Palette, PaletteColor};
pub use pipeline::{convert, convert_file, convert_image, ConvertOptions};
pub use sampler::{GridDimensions, SizePolicy};
