//! Image to mosaic conversion pipeline
//!
//! ```text
//! bytes -> decode -> downscale (optional) -> size policy -> sample -> assemble
//! ```
//!
//! Every call is independent: nothing is cached or shared between
//! conversions, so separate images can be converted from separate threads
//! and a caller may drop a conversion at any point.
//!
//! # Example
//!
//! ```no_run
//! use brickmosaic::pipeline::{convert_file, ConvertOptions};
//! use brickmosaic::sampler::SizePolicy;
//!
//! let options = ConvertOptions { size: SizePolicy::Explicit(32), ..Default::default() };
//! let mosaic = convert_file("photo.jpg", &options)?;
//! assert_eq!(mosaic.total_pieces, 32 * 32);
//! # Ok::<(), brickmosaic::MosaicError>(())
//! ```

use crate::downscale::{downscale, DEFAULT_MAX_SIDE};
use crate::error::{MosaicError, Result};
use crate::mosaic::{assemble, MosaicData};
use crate::palette::Palette;
use crate::palettes;
use crate::sampler::{sample, ResampleFilter, SizePolicy};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Sources whose longest side is below this many pixels give coarse mosaics.
pub const LOW_RESOLUTION_SIDE: u32 = 800;

/// True if the longest side of a `width x height` source is below
/// [`LOW_RESOLUTION_SIDE`].
pub fn is_low_resolution(width: u32, height: u32) -> bool {
    width.max(height) < LOW_RESOLUTION_SIDE
}

/// Settings for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Grid sizing policy
    pub size: SizePolicy,
    /// Longest side allowed into the sampler; None disables the downscaler
    pub max_side: Option<u32>,
    /// Filter used when shrinking the image to grid resolution
    pub filter: ResampleFilter,
    /// Colors available for cells
    pub palette: Palette,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            size: SizePolicy::AutoFit,
            max_side: Some(DEFAULT_MAX_SIDE),
            filter: ResampleFilter::default(),
            palette: palettes::lego(),
        }
    }
}

/// Decode raw image bytes, rejecting 0-sized bitmaps.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(MosaicError::ImageDecode(format!(
            "degenerate image dimensions {}x{}",
            width, height
        )));
    }
    tracing::debug!(width, height, "Decoded source image");
    Ok(image)
}

/// Convert encoded image bytes into a mosaic.
pub fn convert(bytes: &[u8], options: &ConvertOptions) -> Result<MosaicData> {
    convert_image(decode(bytes)?, options)
}

/// Convert an already decoded image into a mosaic.
pub fn convert_image(image: DynamicImage, options: &ConvertOptions) -> Result<MosaicData> {
    let (source_width, source_height) = image.dimensions();
    if is_low_resolution(source_width, source_height) {
        tracing::warn!(
            width = source_width,
            height = source_height,
            recommended = LOW_RESOLUTION_SIDE,
            "Low resolution source image, mosaic detail may suffer"
        );
    }

    let image = match options.max_side {
        Some(0) => return Err(MosaicError::invalid("max_side must be positive")),
        Some(max_side) => downscale(image, max_side),
        None => image,
    };

    let (width, height) = image.dimensions();
    let dims = options.size.dimensions(width, height)?;
    tracing::info!(source = %format!("{}x{}", width, height), grid = %dims, "Sampling image");

    let samples = sample(&image, dims.width, dims.height, options.filter)?;
    Ok(assemble(&samples, &options.palette))
}

/// Read and convert an image file.
pub fn convert_file(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<MosaicData> {
    let bytes = std::fs::read(path.as_ref())?;
    convert(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_convert_explicit_size() {
        let options = ConvertOptions { size: SizePolicy::Explicit(24), ..Default::default() };
        let mosaic = convert(&png_bytes(300, 100, [255, 255, 255]), &options).unwrap();
        assert_eq!((mosaic.width(), mosaic.height()), (24, 24));
        assert_eq!(mosaic.total_pieces, 576);
        assert_eq!(mosaic.piece_count.len(), 1);
        assert_eq!(mosaic.piece_count[0].color.name, "White");
    }

    #[test]
    fn test_convert_auto_fit() {
        let mosaic = convert(&png_bytes(600, 300, [0, 0, 0]), &ConvertOptions::default()).unwrap();
        assert_eq!((mosaic.width(), mosaic.height()), (48, 24));
        assert_eq!(mosaic.size, 48);
        assert_eq!(mosaic.piece_count[0].color.name, "Black");
    }

    #[test]
    fn test_convert_downscales_before_sizing() {
        // 2000x1000 is shrunk to 1024x512 first; both give a 64x32 grid
        let mosaic = convert(&png_bytes(2000, 1000, [212, 40, 42]), &ConvertOptions::default())
            .unwrap();
        assert_eq!((mosaic.width(), mosaic.height()), (64, 32));
    }

    #[test]
    fn test_convert_without_downscaler() {
        let options = ConvertOptions { max_side: None, ..Default::default() };
        let mosaic = convert(&png_bytes(100, 100, [0, 85, 183]), &options).unwrap();
        assert_eq!(mosaic.total_pieces, 32 * 32);
    }

    #[test]
    fn test_convert_garbage_is_decode_error() {
        let err = convert(b"not an image at all", &ConvertOptions::default()).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_convert_zero_max_side_is_invalid() {
        let options = ConvertOptions { max_side: Some(0), ..Default::default() };
        let err = convert(&png_bytes(16, 16, [0, 0, 0]), &options).unwrap_err();
        assert!(matches!(err, MosaicError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_low_resolution_threshold() {
        assert!(is_low_resolution(799, 600));
        assert!(is_low_resolution(16, 16));
        assert!(!is_low_resolution(800, 10));
        assert!(!is_low_resolution(300, 1200));
    }

    #[test]
    fn test_convert_file_missing_is_io_error() {
        let err = convert_file("/nonexistent/brickmosaic/input.png", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, MosaicError::Io(_)));
    }
}
