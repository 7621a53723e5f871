//! Pre-processing size guard
//!
//! Very large uploads are shrunk before sampling so that decoding to RGB and
//! resampling stay cheap. This only bounds cost; the mosaic's look is decided
//! by the sampler.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Default longest side allowed into the sampler.
pub const DEFAULT_MAX_SIDE: u32 = 1024;

/// Output dimensions for fitting `width x height` inside `max_side`.
///
/// The longer side becomes `max_side` and the shorter one is scaled in
/// proportion (truncated, never below 1). Images already within bounds keep
/// their size.
pub fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let max_side = max_side.max(1);
    if width <= max_side && height <= max_side {
        return (width, height);
    }

    if width > height {
        let scaled = (height as u64 * max_side as u64 / width as u64) as u32;
        (max_side, scaled.max(1))
    } else {
        let scaled = (width as u64 * max_side as u64 / height as u64) as u32;
        (scaled.max(1), max_side)
    }
}

/// Shrink `image` so neither side exceeds `max_side`, keeping aspect ratio.
///
/// Returns the input untouched when it already fits.
pub fn downscale(image: DynamicImage, max_side: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (new_width, new_height) = fit_within(width, height, max_side);
    if (new_width, new_height) == (width, height) {
        return image;
    }

    tracing::debug!(width, height, new_width, new_height, "Downscaling source image");
    image.resize_exact(new_width, new_height, FilterType::Triangle)
}
