//! Color parsing and comparison utilities
//!
//! Palette entries may be written in config files as:
//! - Hex: `#RGB`, `#RRGGBB`
//! - Functional: `rgb()`, `hsl()`, `hwb()`, `oklch()`
//! - Named: `red`, `tan`, `purple`, etc.
//!
//! Mosaic cells are opaque, so alpha is parsed but discarded.

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a color string into an RGB triple.
///
/// Hex strings (`#RGB`, `#RRGGBB`) take a fast path; every other form is
/// handed to lightningcss.
///
/// # Examples
///
/// ```
/// use brickmosaic::color::parse_color;
///
/// assert_eq!(parse_color("#D4282A").unwrap(), [212, 40, 42]);
/// assert_eq!(parse_color("#FFF").unwrap(), [255, 255, 255]);
/// assert_eq!(parse_color("rgb(0, 85, 183)").unwrap(), [0, 85, 183]);
/// assert_eq!(parse_color("tan").unwrap(), [210, 180, 140]);
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgb, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Format an RGB triple as an uppercase `#RRGGBB` string.
///
/// ```
/// use brickmosaic::color::to_hex;
///
/// assert_eq!(to_hex([30, 30, 30]), "#1E1E1E");
/// ```
pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Euclidean distance between two colors in RGB space.
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Darken a color by a factor in `0.0..=1.0` (0 = unchanged, 1 = black).
pub fn darken(rgb: Rgb, amount: f64) -> Rgb {
    let keep = (1.0 - amount).clamp(0.0, 1.0);
    [
        (rgb[0] as f64 * keep).round() as u8,
        (rgb[1] as f64 * keep).round() as u8,
        (rgb[2] as f64 * keep).round() as u8,
    ]
}

/// Parse the digits of a hex color (without the leading '#')
fn parse_hex_color(hex: &str) -> Result<Rgb, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();
    match digits.len() {
        // #RGB -> #RRGGBB (doubled digits)
        3 => Ok([digits[0] * 17, digits[1] * 17, digits[2] * 17]),
        6 => Ok([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
        ]),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Value of an ASCII hex digit already checked with `is_ascii_hexdigit`
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgb, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgb(css_color)
}

/// Convert a lightningcss CssColor to RGB
fn css_color_to_rgb(color: CssColor) -> Result<Rgb, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok([rgba.red, rgba.green, rgba.blue]),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok([
                (rgb.r * 255.0).round() as u8,
                (rgb.g * 255.0).round() as u8,
                (rgb.b * 255.0).round() as u8,
            ]),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6_digit() {
        assert_eq!(parse_color("#5C4037"), Ok([92, 64, 55]));
        assert_eq!(parse_color("#e91e63"), Ok([233, 30, 99]));
    }

    #[test]
    fn test_parse_hex_3_digit() {
        assert_eq!(parse_color("#F00"), Ok([255, 0, 0]));
        assert_eq!(parse_color("#abc"), Ok([170, 187, 204]));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_color("  #000000 "), Ok([0, 0, 0]));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#FFFFFFFF"), Err(ColorError::InvalidLength(8)));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
        assert!(matches!(parse_color("not-a-color"), Err(ColorError::CssParse(_))));
    }

    #[test]
    fn test_parse_css_forms() {
        assert_eq!(parse_color("rgb(255, 102, 0)"), Ok([255, 102, 0]));
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), Ok([255, 0, 0]));
        assert_eq!(parse_color("white"), Ok([255, 255, 255]));
    }

    #[test]
    fn test_to_hex_round_trips_palette_hex() {
        for hex in ["#FFFFFF", "#1E1E1E", "#0055B7", "#9BCA3C"] {
            assert_eq!(to_hex(parse_color(hex).unwrap()), hex);
        }
    }

    #[test]
    fn test_color_distance() {
        assert_eq!(color_distance([0, 0, 0], [0, 0, 0]), 0.0);
        assert_eq!(color_distance([0, 0, 0], [3, 4, 0]), 5.0);
        assert_eq!(color_distance([10, 20, 30], [40, 60, 30]), color_distance([40, 60, 30], [10, 20, 30]));
    }

    #[test]
    fn test_darken() {
        assert_eq!(darken([200, 100, 50], 0.5), [100, 50, 25]);
        assert_eq!(darken([200, 100, 50], 0.0), [200, 100, 50]);
    }
}
