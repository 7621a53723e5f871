//! Palette types.
//!
//! A [`Palette`] is an ordered, non-empty list of [`PaletteColor`]s. Order
//! matters only for tie-breaking: when two entries are equally close to a
//! sampled color, the earlier one wins.

use crate::color::{to_hex, Rgb};
use crate::error::{MosaicError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single named color available for mosaic pieces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Stable identifier, also used as the tie-break key for piece counts
    pub id: u32,
    /// Display name (e.g., "Bright Red")
    pub name: String,
    /// Uppercase `#RRGGBB` form of `rgb`
    pub hex: String,
    /// 8-bit channel values
    pub rgb: Rgb,
}

impl PaletteColor {
    /// Create a color, deriving `hex` from `rgb`.
    pub fn new(id: u32, name: impl Into<String>, rgb: Rgb) -> Self {
        Self { id, name: name.into(), hex: to_hex(rgb), rgb }
    }
}

impl std::fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.hex)
    }
}

/// An ordered, non-empty set of palette colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPalette")]
pub struct Palette {
    name: String,
    colors: Vec<PaletteColor>,
}

#[derive(Deserialize)]
struct RawPalette {
    name: String,
    colors: Vec<PaletteColor>,
}

impl TryFrom<RawPalette> for Palette {
    type Error = MosaicError;

    fn try_from(raw: RawPalette) -> Result<Self> {
        Palette::new(raw.name, raw.colors)
    }
}

impl Palette {
    /// Build a palette, rejecting empty color lists, duplicate ids and
    /// duplicate colors.
    pub fn new(name: impl Into<String>, colors: Vec<PaletteColor>) -> Result<Self> {
        let name = name.into();
        if colors.is_empty() {
            return Err(MosaicError::invalid(format!("palette '{}' has no colors", name)));
        }

        let mut ids = HashSet::new();
        let mut hexes = HashSet::new();
        for color in &colors {
            if !ids.insert(color.id) {
                return Err(MosaicError::invalid(format!(
                    "palette '{}' has duplicate color id {}",
                    name, color.id
                )));
            }
            if !hexes.insert(color.hex.to_ascii_uppercase()) {
                return Err(MosaicError::invalid(format!(
                    "palette '{}' has duplicate color {} ({})",
                    name, color.hex, color.name
                )));
            }
        }

        Ok(Self { name, colors })
    }

    /// Wrap a static table that is known to be non-empty with unique ids and colors.
    pub(crate) fn builtin(name: &str, colors: Vec<PaletteColor>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { name: name.to_string(), colors }
    }

    /// Palette name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All colors, in palette order
    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    /// Number of colors (always at least 1)
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The first entry, used as the matcher's starting candidate
    pub fn first(&self) -> &PaletteColor {
        &self.colors[0]
    }

    /// Iterate colors in palette order
    pub fn iter(&self) -> std::slice::Iter<'_, PaletteColor> {
        self.colors.iter()
    }

    /// Look up a color by id
    pub fn by_id(&self, id: u32) -> Option<&PaletteColor> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// Resolve a user-supplied reference to a palette color.
    ///
    /// Accepts a numeric id, a hex string (`#RRGGBB`, case-insensitive) or a
    /// color name (case-insensitive, spaces/dashes/underscores interchangeable).
    pub fn find(&self, query: &str) -> Option<&PaletteColor> {
        let query = query.trim();
        if let Ok(id) = query.parse::<u32>() {
            return self.by_id(id);
        }
        if query.starts_with('#') {
            return self.colors.iter().find(|c| c.hex.eq_ignore_ascii_case(query));
        }
        let wanted = normalize_name(query);
        self.colors.iter().find(|c| normalize_name(&c.name) == wanted)
    }

    /// Up to three color names within `max_distance` edits of `query`, closest first.
    pub fn suggest(&self, query: &str, max_distance: usize) -> Vec<&str> {
        let wanted = normalize_name(query);
        let mut scored: Vec<(usize, &str)> = self
            .colors
            .iter()
            .map(|c| (edit_distance(&wanted, &normalize_name(&c.name)), c.name.as_str()))
            .filter(|(distance, _)| *distance <= max_distance)
            .collect();
        scored.sort_by_key(|(distance, _)| *distance);
        scored.into_iter().take(3).map(|(_, name)| name).collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteColor;
    type IntoIter = std::slice::Iter<'a, PaletteColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' | '-' | '_' => None,
            c => Some(c.to_ascii_lowercase()),
        })
        .collect()
}

/// Levenshtein distance over chars, two rows at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
