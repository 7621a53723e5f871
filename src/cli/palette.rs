//! Palette command implementation

use std::path::Path;
use std::process::ExitCode;

use clap::Subcommand;

use crate::config::CliOverrides;
use crate::palette::Palette;
use crate::palettes;
use crate::terminal::{color_to_ansi_bg, ANSI_RESET};

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum PaletteAction {
    /// List all available built-in palettes
    List,
    /// Show the colors of a palette
    Show {
        /// Built-in palette name (default: the palette selected by mosaic.toml)
        name: Option<String>,
    },
}

/// One line per color: swatch, id, name and hex.
pub(crate) fn format_palette(palette: &Palette) -> String {
    let mut output = format!("Palette: {} ({} colors)\n\n", palette.name(), palette.len());
    for color in palette {
        output.push_str(&format!(
            "  {}  {} {:>3}  {:16} {}\n",
            color_to_ansi_bg(color.rgb),
            ANSI_RESET,
            color.id,
            color.name,
            color.hex
        ));
    }
    output
}

/// Execute the palette command
pub fn run_palette(action: PaletteAction, config_path: Option<&Path>) -> ExitCode {
    match action {
        PaletteAction::List => {
            println!("Built-in palettes:");
            for name in palettes::list_builtins() {
                let marker = if name == palettes::DEFAULT_PALETTE { " (default)" } else { "" };
                println!("  {}{}", name, marker);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PaletteAction::Show { name: Some(name) } => match palettes::get_builtin(&name) {
            Some(palette) => {
                print!("{}", format_palette(&palette));
                ExitCode::from(EXIT_SUCCESS)
            }
            None => {
                eprintln!("Error: Unknown palette '{}'", name);
                eprintln!();
                eprintln!("Available palettes:");
                for builtin_name in palettes::list_builtins() {
                    eprintln!("  {}", builtin_name);
                }
                ExitCode::from(EXIT_ERROR)
            }
        },
        PaletteAction::Show { name: None } => {
            let config = match resolve_config(config_path, &CliOverrides::default()) {
                Ok(config) => config,
                Err(code) => return code,
            };
            match config.palette.resolve() {
                Ok(palette) => {
                    print!("{}", format_palette(&palette));
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(errors) => {
                    for e in errors {
                        eprintln!("Error: {}", e);
                    }
                    ExitCode::from(EXIT_INVALID_ARGS)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_palette() {
        let text = format_palette(&palettes::lego());
        assert!(text.starts_with("Palette: lego (16 colors)\n"));
        assert!(text.contains("  1  White            #FFFFFF"));
        assert!(text.contains(" 16  Magenta          #E91E63"));
        assert_eq!(text.lines().count(), 18);
    }
}
