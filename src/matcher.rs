//! Nearest palette color lookup
//!
//! Plain Euclidean distance in RGB space with a linear scan. Palettes are
//! small (16 entries by default), so no spatial index is needed.

use crate::color::{color_distance, Rgb};
use crate::palette::{Palette, PaletteColor};

/// Maps sampled RGB values onto the closest entry of a palette.
#[derive(Debug, Clone, Copy)]
pub struct ColorMatcher<'p> {
    palette: &'p Palette,
}

impl<'p> ColorMatcher<'p> {
    /// Create a matcher over `palette`.
    pub fn new(palette: &'p Palette) -> Self {
        Self { palette }
    }

    /// The palette being matched against
    pub fn palette(&self) -> &'p Palette {
        self.palette
    }

    /// Find the palette color closest to `rgb`.
    ///
    /// Ties keep the earlier palette entry: the scan starts from the first
    /// color and only replaces the candidate on a strictly smaller distance.
    ///
    /// ```
    /// use brickmosaic::matcher::ColorMatcher;
    /// use brickmosaic::palettes::lego;
    ///
    /// let palette = lego();
    /// let matcher = ColorMatcher::new(&palette);
    /// assert_eq!(matcher.closest([0, 0, 0]).name, "Black");
    /// ```
    pub fn closest(&self, rgb: Rgb) -> &'p PaletteColor {
        self.closest_index(rgb).1
    }

    /// Same as [`closest`](Self::closest) but also returns the palette index.
    pub fn closest_index(&self, rgb: Rgb) -> (usize, &'p PaletteColor) {
        let colors = self.palette.colors();
        let mut best = 0;
        let mut min_distance = color_distance(rgb, colors[0].rgb);

        for (idx, color) in colors.iter().enumerate().skip(1) {
            let distance = color_distance(rgb, color.rgb);
            if distance < min_distance {
                min_distance = distance;
                best = idx;
            }
        }

        (best, &colors[best])
    }
}
