//! Configuration schema types for `mosaic.toml`
//!
//! Defines the structure and validation rules for brickmosaic configuration.

use crate::color::parse_color;
use crate::downscale::DEFAULT_MAX_SIDE;
use crate::palette::{Palette, PaletteColor};
use crate::palettes;
use crate::pipeline::ConvertOptions;
use crate::sampler::{ResampleFilter, SizePolicy, MIN_GRID_SIDE};
use serde::{Deserialize, Serialize};

/// Full contents of a `mosaic.toml` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MosaicConfig {
    /// Conversion settings
    #[serde(default)]
    pub convert: ConvertConfig,
    /// Palette selection
    #[serde(default)]
    pub palette: PaletteConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[convert]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Square grid side; absent means auto-fit from the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Longest side allowed into the sampler (0 disables downscaling)
    #[serde(default = "default_max_side")]
    pub max_side: u32,
    /// Resampling filter
    #[serde(default)]
    pub filter: ResampleFilter,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self { size: None, max_side: default_max_side(), filter: ResampleFilter::default() }
    }
}

fn default_max_side() -> u32 {
    DEFAULT_MAX_SIDE
}

/// `[palette]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Built-in palette name, used when `colors` is absent
    #[serde(default = "default_builtin")]
    pub builtin: String,
    /// Inline palette replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<PaletteEntry>>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { builtin: default_builtin(), colors: None }
    }
}

fn default_builtin() -> String {
    palettes::DEFAULT_PALETTE.to_string()
}

/// One inline palette color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Identifier; defaults to the 1-based position in the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Display name
    pub name: String,
    /// Any CSS color string ("#D4282A", "rgb(212, 40, 42)", "tan")
    pub color: String,
}

/// `[export]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pixels per cell in PNG output
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Draw a darker outline around each cell in PNG output
    #[serde(default = "default_true")]
    pub grid_lines: bool,
    /// Cells per side of one instructions page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { scale: default_scale(), grid_lines: true, page_size: default_page_size() }
    }
}

fn default_scale() -> u32 {
    16
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> u32 {
    32
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "palette.colors[2].color")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mosaic.toml: '{}' {}", self.field, self.message)
    }
}

impl MosaicConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Some(size) = self.convert.size {
            if size < MIN_GRID_SIDE {
                errors.push(ConfigValidationError {
                    field: "convert.size".to_string(),
                    message: format!("must be at least {}", MIN_GRID_SIDE),
                });
            }
        }

        if self.export.scale == 0 {
            errors.push(ConfigValidationError {
                field: "export.scale".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.export.page_size == 0 {
            errors.push(ConfigValidationError {
                field: "export.page_size".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if let Err(palette_errors) = self.palette.resolve() {
            errors.extend(palette_errors);
        }

        errors
    }

    /// Conversion options described by this configuration
    pub fn convert_options(&self) -> Result<ConvertOptions, Vec<ConfigValidationError>> {
        Ok(ConvertOptions {
            size: match self.convert.size {
                Some(side) => SizePolicy::Explicit(side),
                None => SizePolicy::AutoFit,
            },
            max_side: (self.convert.max_side > 0).then_some(self.convert.max_side),
            filter: self.convert.filter,
            palette: self.palette.resolve()?,
        })
    }
}

impl PaletteConfig {
    /// Build the palette this section describes.
    pub fn resolve(&self) -> Result<Palette, Vec<ConfigValidationError>> {
        let Some(entries) = &self.colors else {
            return palettes::get_builtin(&self.builtin).ok_or_else(|| {
                vec![ConfigValidationError {
                    field: "palette.builtin".to_string(),
                    message: format!(
                        "unknown palette '{}' (available: {})",
                        self.builtin,
                        palettes::list_builtins().join(", ")
                    ),
                }]
            });
        };

        let mut errors = Vec::new();
        let mut colors = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            match parse_color(&entry.color) {
                Ok(rgb) => {
                    let id = entry.id.unwrap_or(i as u32 + 1);
                    colors.push(PaletteColor::new(id, entry.name.clone(), rgb));
                }
                Err(e) => errors.push(ConfigValidationError {
                    field: format!("palette.colors[{}].color", i),
                    message: e.to_string(),
                }),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Palette::new("custom", colors).map_err(|e| {
            vec![ConfigValidationError { field: "palette.colors".to_string(), message: e.to_string() }]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: MosaicConfig = toml::from_str("").unwrap();
        assert_eq!(config.convert.size, None);
        assert_eq!(config.convert.max_side, 1024);
        assert_eq!(config.convert.filter, ResampleFilter::Triangle);
        assert_eq!(config.palette.builtin, "lego");
        assert_eq!(config.export.scale, 16);
        assert!(config.export.grid_lines);
        assert_eq!(config.export.page_size, 32);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r##"
[convert]
size = 48
max_side = 2048
filter = "catmull-rom"

[palette]
colors = [
    { name = "Snow", color = "#FFFFFF" },
    { id = 9, name = "Ink", color = "rgb(20, 20, 20)" },
]

[export]
scale = 8
grid_lines = false
page_size = 16
"##;
        let config: MosaicConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_empty());

        let options = config.convert_options().unwrap();
        assert_eq!(options.size, SizePolicy::Explicit(48));
        assert_eq!(options.max_side, Some(2048));
        assert_eq!(options.filter, ResampleFilter::CatmullRom);
        assert_eq!(options.palette.len(), 2);
        assert_eq!(options.palette.colors()[0].id, 1);
        assert_eq!(options.palette.colors()[1].id, 9);
        assert_eq!(options.palette.colors()[1].rgb, [20, 20, 20]);
        assert!(!config.export.grid_lines);
    }

    #[test]
    fn test_zero_max_side_disables_downscaler() {
        let config: MosaicConfig = toml::from_str("[convert]\nmax_side = 0").unwrap();
        assert_eq!(config.convert_options().unwrap().max_side, None);
    }

    #[test]
    fn test_validation_errors() {
        let toml = r#"
[convert]
size = 4

[export]
scale = 0
page_size = 0
"#;
        let config: MosaicConfig = toml::from_str(toml).unwrap();
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["convert.size", "export.scale", "export.page_size"]);
    }

    #[test]
    fn test_empty_inline_palette_is_rejected() {
        let config: MosaicConfig = toml::from_str("[palette]\ncolors = []").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "palette.colors");
        assert!(errors[0].message.contains("no colors"));
    }

    #[test]
    fn test_same_color_twice_is_rejected() {
        let toml = r##"
[palette]
colors = [
    { name = "Red", color = "#FF0000" },
    { name = "Signal Red", color = "red" },
]
"##;
        let config: MosaicConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "palette.colors");
        assert!(errors[0].message.contains("duplicate color #FF0000 (Signal Red)"));
    }

    #[test]
    fn test_bad_inline_color_is_reported() {
        let toml = r##"
[palette]
colors = [{ name = "Oops", color = "#12" }]
"##;
        let config: MosaicConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert_eq!(errors[0].field, "palette.colors[0].color");
        assert!(errors[0].to_string().starts_with("mosaic.toml: 'palette.colors[0].color'"));
    }

    #[test]
    fn test_unknown_builtin() {
        let config: MosaicConfig = toml::from_str("[palette]\nbuiltin = \"neon\"").unwrap();
        let errors = config.validate();
        assert!(errors[0].message.contains("unknown palette 'neon'"));
    }
}
