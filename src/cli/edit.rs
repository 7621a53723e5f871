//! Edit command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::color::parse_color;
use crate::config::CliOverrides;
use crate::export::{load_mosaic, ExportOptions, Exporter, JsonExporter};
use crate::matcher::ColorMatcher;
use crate::mosaic::edit_cell;
use crate::palette::{Palette, PaletteColor};
use crate::terminal::render_ansi_mosaic;

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Resolve `query` to a palette color.
///
/// Names, ids and exact hex values are looked up directly; any other parsable
/// color snaps to the closest palette entry.
fn resolve_color(palette: &Palette, query: &str) -> Result<PaletteColor, String> {
    if let Some(color) = palette.find(query) {
        return Ok(color.clone());
    }

    match parse_color(query) {
        Ok(rgb) => {
            let color = ColorMatcher::new(palette).closest(rgb);
            tracing::info!(requested = query, matched = %color, "Snapped color to palette");
            Ok(color.clone())
        }
        Err(_) => {
            let mut msg = format!("Unknown color '{}' in palette '{}'", query, palette.name());
            let suggestions = palette.suggest(query, 3);
            if !suggestions.is_empty() {
                msg.push_str(&format!("\nDid you mean {}?", quote_list(&suggestions)));
            }
            Err(msg)
        }
    }
}

fn quote_list(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} or {}", rest.join(", "), last),
    }
}

/// Execute the edit command
pub fn run_edit(
    input: &Path,
    x: u32,
    y: u32,
    color: &str,
    output: Option<&Path>,
    preview: bool,
    config_path: Option<&Path>,
) -> ExitCode {
    let mosaic = match load_mosaic(input) {
        Ok(mosaic) => mosaic,
        Err(e) => {
            eprintln!("Error: Cannot read mosaic '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if x >= mosaic.width() || y >= mosaic.height() {
        eprintln!(
            "Error: Cell ({}, {}) is outside the {}×{} mosaic",
            x,
            y,
            mosaic.width(),
            mosaic.height()
        );
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let config = match resolve_config(config_path, &CliOverrides::default()) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let palette = match config.palette.resolve() {
        Ok(palette) => palette,
        Err(errors) => {
            for e in errors {
                eprintln!("Error: {}", e);
            }
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let new_color = match resolve_color(&palette, color) {
        Ok(color) => color,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let previous = mosaic.color_at(x, y).map(|c| c.name.clone()).unwrap_or_default();
    let edited = edit_cell(mosaic, x, y, new_color.clone());

    let target = output.unwrap_or(input);
    let options = ExportOptions::default();
    if let Err(e) = JsonExporter::new().export(&edited, target, &options) {
        eprintln!("Error: Failed to write '{}': {}", target.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if preview {
        let (grid, legend) = render_ansi_mosaic(&edited);
        print!("{}{}", grid, legend);
    }
    println!("({}, {}): {} -> {}", x, y, previous, new_color);
    println!("Saved: {}", target.display());
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palettes::lego;

    #[test]
    fn test_resolve_color_by_name_id_hex() {
        let palette = lego();
        assert_eq!(resolve_color(&palette, "Tan").unwrap().id, 14);
        assert_eq!(resolve_color(&palette, "7").unwrap().name, "Orange");
        assert_eq!(resolve_color(&palette, "#e91e63").unwrap().name, "Magenta");
    }

    #[test]
    fn test_resolve_color_snaps_off_palette() {
        let palette = lego();
        assert_eq!(resolve_color(&palette, "#FE0000").unwrap().name, "Bright Red");
        assert_eq!(resolve_color(&palette, "rgb(250, 250, 250)").unwrap().name, "White");
    }

    #[test]
    fn test_resolve_color_unknown_suggests() {
        let err = resolve_color(&lego(), "Brigt Yelow").unwrap_err();
        assert!(err.contains("Unknown color 'Brigt Yelow'"));
        assert!(err.contains("Did you mean 'Bright Yellow'?"));
    }

    #[test]
    fn test_quote_list() {
        assert_eq!(quote_list(&["Tan"]), "'Tan'");
        assert_eq!(quote_list(&["Tan", "Pink"]), "'Tan' or 'Pink'");
        assert_eq!(quote_list(&["A", "B", "C"]), "'A', 'B' or 'C'");
    }
}
