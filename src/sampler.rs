//! Grid sizing and per-cell color sampling
//!
//! Two sizing policies exist side by side:
//!
//! | Policy | Grid | Aspect ratio |
//! |--------|------|--------------|
//! | `Explicit(n)` | `n x n` | ignored, the image is stretched |
//! | `AutoFit` | base side on the long axis, proportional short axis | preserved |
//!
//! The auto-fit base side depends on the longest image dimension:
//! more than 800px gives 64, more than 400px gives 48, anything else 32.
//! Both axes are floored at [`MIN_GRID_SIDE`].
//!
//! Sampling rescales the whole image to exactly one pixel per cell with a
//! standard resampling filter; each output pixel's RGB becomes that cell's
//! sample and alpha is dropped.

use crate::color::Rgb;
use crate::error::{MosaicError, Result};
use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

/// Smallest grid side either policy will produce.
pub const MIN_GRID_SIDE: u32 = 16;

/// Resampling filter used to shrink the image to grid resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Nearest neighbor, sharp but noisy
    Nearest,
    /// Linear (tent) filter, the default
    #[default]
    Triangle,
    /// Cubic filter
    CatmullRom,
    /// Gaussian filter, softest result
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// How the grid resolution is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePolicy {
    /// Square `n x n` grid regardless of the image's aspect ratio
    Explicit(u32),
    /// Aspect-preserving grid derived from the image dimensions
    #[default]
    AutoFit,
}

impl SizePolicy {
    /// Resolve the grid dimensions for an image of `width x height` pixels.
    pub fn dimensions(&self, width: u32, height: u32) -> Result<GridDimensions> {
        match *self {
            SizePolicy::Explicit(side) => {
                if side < MIN_GRID_SIDE {
                    return Err(MosaicError::invalid(format!(
                        "grid size {} is below the minimum of {}",
                        side, MIN_GRID_SIDE
                    )));
                }
                Ok(GridDimensions { width: side, height: side })
            }
            SizePolicy::AutoFit => auto_fit_dimensions(width, height),
        }
    }
}

/// Target grid resolution in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    /// The longer side, reported as `size` for square-grid consumers
    pub fn size(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Base grid side for auto-fit sizing, from the image's longest dimension.
pub fn base_resolution(max_dimension: u32) -> u32 {
    if max_dimension > 800 {
        64
    } else if max_dimension > 400 {
        48
    } else {
        32
    }
}

/// Aspect-preserving grid dimensions for an image of `width x height` pixels.
///
/// The long axis gets the base resolution; the short axis is the base scaled
/// by the aspect ratio and rounded. Both are floored at [`MIN_GRID_SIDE`].
///
/// ```
/// use brickmosaic::sampler::auto_fit_dimensions;
///
/// let dims = auto_fit_dimensions(1000, 500).unwrap();
/// assert_eq!((dims.width, dims.height), (64, 32));
/// ```
pub fn auto_fit_dimensions(width: u32, height: u32) -> Result<GridDimensions> {
    if width == 0 || height == 0 {
        return Err(MosaicError::ImageDecode(format!(
            "degenerate image dimensions {}x{}",
            width, height
        )));
    }

    let base = base_resolution(width.max(height));
    let aspect_ratio = width as f64 / height as f64;

    let (grid_width, grid_height) = if width >= height {
        (base, (base as f64 / aspect_ratio).round() as u32)
    } else {
        ((base as f64 * aspect_ratio).round() as u32, base)
    };

    Ok(GridDimensions {
        width: grid_width.max(MIN_GRID_SIDE),
        height: grid_height.max(MIN_GRID_SIDE),
    })
}

/// One RGB sample per grid cell, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    samples: Vec<Rgb>,
}

impl SampleGrid {
    /// Wrap row-major samples; the length must be exactly `width * height`.
    pub fn new(width: u32, height: u32, samples: Vec<Rgb>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MosaicError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(MosaicError::invalid(format!(
                "expected {} samples for a {}x{} grid, got {}",
                expected,
                width,
                height,
                samples.len()
            )));
        }
        Ok(Self { width, height, samples })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions { width: self.width, height: self.height }
    }

    /// Sample at `(x, y)`, or None when out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// All samples in row-major order
    pub fn samples(&self) -> &[Rgb] {
        &self.samples
    }

    /// `((x, y), rgb)` for every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), Rgb)> + '_ {
        let width = self.width as usize;
        self.samples
            .iter()
            .enumerate()
            .map(move |(i, rgb)| (((i % width) as u32, (i / width) as u32), *rgb))
    }
}

/// Rescale `image` to `width x height` and take one RGB sample per pixel.
///
/// Alpha is discarded before resampling so transparent regions do not bleed
/// into their neighbors.
pub fn sample(
    image: &DynamicImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<SampleGrid> {
    if width == 0 || height == 0 {
        return Err(MosaicError::invalid(format!(
            "grid dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    let (source_width, source_height) = image.dimensions();
    if source_width == 0 || source_height == 0 {
        return Err(MosaicError::ImageDecode(format!(
            "degenerate image dimensions {}x{}",
            source_width, source_height
        )));
    }

    let rgb = image.to_rgb8();
    let resized = if (source_width, source_height) == (width, height) {
        rgb
    } else {
        imageops::resize(&rgb, width, height, filter.into())
    };

    let samples = resized.pixels().map(|p| p.0).collect();
    SampleGrid::new(width, height, samples)
}
