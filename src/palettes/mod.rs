//! Built-in palette definitions.
//!
//! Provides the brick color palettes that can be selected by name from
//! `mosaic.toml` or the `--palette` flag.

use crate::palette::{Palette, PaletteColor};

/// Name of the palette used when nothing else is configured.
pub const DEFAULT_PALETTE: &str = "lego";

/// List of all available built-in palette names.
const BUILTIN_NAMES: &[&str] = &["lego"];

/// Standard brick colors: (id, name, hex, rgb).
///
/// Black is stored as a dark charcoal rather than pure black, matching the
/// actual plastic; pure black input still maps to it as the darkest entry.
const LEGO_COLORS: &[(u32, &str, &str, [u8; 3])] = &[
    (1, "White", "#FFFFFF", [255, 255, 255]),
    (2, "Black", "#1E1E1E", [30, 30, 30]),
    (3, "Bright Red", "#D4282A", [212, 40, 42]),
    (4, "Bright Blue", "#0055B7", [0, 85, 183]),
    (5, "Bright Yellow", "#FFDE00", [255, 222, 0]),
    (6, "Dark Green", "#237841", [35, 120, 65]),
    (7, "Orange", "#FF6600", [255, 102, 0]),
    (8, "Medium Blue", "#4B9FD1", [75, 159, 209]),
    (9, "Light Gray", "#9B9B9B", [155, 155, 155]),
    (10, "Dark Gray", "#595959", [89, 89, 89]),
    (11, "Purple", "#6B1C7A", [107, 28, 122]),
    (12, "Pink", "#F5989D", [245, 152, 157]),
    (13, "Lime Green", "#9BCA3C", [155, 202, 60]),
    (14, "Tan", "#DEB887", [222, 184, 135]),
    (15, "Brown", "#5C4037", [92, 64, 55]),
    (16, "Magenta", "#E91E63", [233, 30, 99]),
];

/// Returns a list of all available built-in palette names.
pub fn list_builtins() -> Vec<&'static str> {
    BUILTIN_NAMES.to_vec()
}

/// Returns a built-in palette by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<Palette> {
    match name {
        "lego" => Some(lego()),
        _ => None,
    }
}

/// The 16-color brick palette.
pub fn lego() -> Palette {
    let colors = LEGO_COLORS
        .iter()
        .map(|&(id, name, hex, rgb)| PaletteColor {
            id,
            name: name.to_string(),
            hex: hex.to_string(),
            rgb,
        })
        .collect();

    Palette::builtin("lego", colors)
}
