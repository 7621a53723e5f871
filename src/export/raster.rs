//! Flat color PNG rendering.
//!
//! Every cell becomes a `scale x scale` block of its palette color. With grid
//! lines enabled (and blocks at least 3px wide) each block gets a 1px border
//! in a darker shade of its own color, which reads like the seams between
//! physical pieces.

use crate::color::darken;
use crate::export::{ExportError, ExportOptions, Exporter, Result};
use crate::mosaic::MosaicData;
use crate::output::save_png;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// How much darker cell borders are than the cell itself.
const GRID_LINE_SHADE: f64 = 0.25;

/// PNG image exporter.
#[derive(Debug, Default)]
pub struct RasterExporter;

impl RasterExporter {
    /// Create a new PNG exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for RasterExporter {
    fn export(
        &self,
        mosaic: &MosaicData,
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<()> {
        let image = render_mosaic(mosaic, options.scale, options.grid_lines)?;
        save_png(&image, output_path)
    }

    fn format_name(&self) -> &'static str {
        "png"
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}

/// Render the mosaic to an image, `scale` pixels per cell side.
pub fn render_mosaic(mosaic: &MosaicData, scale: u32, grid_lines: bool) -> Result<RgbaImage> {
    if scale == 0 {
        return Err(ExportError::Config("scale must be a positive integer".to_string()));
    }
    let (width, height) = match (mosaic.width().checked_mul(scale), mosaic.height().checked_mul(scale))
    {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(ExportError::Config(format!(
                "{}x{} cells at scale {} is too large",
                mosaic.width(),
                mosaic.height(),
                scale
            )))
        }
    };

    let mut image = RgbaImage::new(width, height);
    let outline = grid_lines && scale >= 3;

    for cell in mosaic.cells() {
        if cell.x >= mosaic.width() || cell.y >= mosaic.height() {
            continue;
        }
        let [r, g, b] = cell.color.rgb;
        let fill = Rgba([r, g, b, 255]);
        let [er, eg, eb] = darken(cell.color.rgb, GRID_LINE_SHADE);
        let edge = Rgba([er, eg, eb, 255]);

        let x0 = cell.x * scale;
        let y0 = cell.y * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                let on_edge = dx == 0 || dy == 0 || dx == scale - 1 || dy == scale - 1;
                let pixel = if outline && on_edge { edge } else { fill };
                image.put_pixel(x0 + dx, y0 + dy, pixel);
            }
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::{assemble, edit_cell};
    use crate::palettes::lego;
    use crate::sampler::SampleGrid;
    use tempfile::TempDir;

    fn white_mosaic() -> MosaicData {
        let samples = SampleGrid::new(16, 16, vec![[255, 255, 255]; 256]).unwrap();
        assemble(&samples, &lego())
    }

    #[test]
    fn test_render_dimensions() {
        let image = render_mosaic(&white_mosaic(), 4, false).unwrap();
        assert_eq!(image.dimensions(), (64, 64));
    }

    #[test]
    fn test_render_scale_one_is_one_pixel_per_cell() {
        let palette = lego();
        let mosaic = edit_cell(white_mosaic(), 2, 3, palette.find("Bright Red").unwrap().clone());
        let image = render_mosaic(&mosaic, 1, true).unwrap();
        assert_eq!(image.get_pixel(2, 3), &Rgba([212, 40, 42, 255]));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_render_grid_lines() {
        let image = render_mosaic(&white_mosaic(), 8, true).unwrap();
        // Border pixel is darkened, interior keeps the cell color
        assert_eq!(image.get_pixel(0, 0), &Rgba([191, 191, 191, 255]));
        assert_eq!(image.get_pixel(3, 3), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(7, 4), &Rgba([191, 191, 191, 255]));
    }

    #[test]
    fn test_render_zero_scale_is_error() {
        assert!(matches!(render_mosaic(&white_mosaic(), 0, false), Err(ExportError::Config(_))));
    }

    #[test]
    fn test_export_writes_png() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mosaic.png");
        let options = ExportOptions { scale: 2, ..Default::default() };
        RasterExporter::new().export(&white_mosaic(), &path, &options).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (32, 32));
    }
}
