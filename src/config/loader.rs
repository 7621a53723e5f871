//! Configuration loading and discovery for `mosaic.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::MosaicConfig;
use crate::sampler::ResampleFilter;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE_NAME: &str = "mosaic.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse mosaic.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override grid size (explicit square grid)
    pub size: Option<u32>,
    /// Override downscale limit
    pub max_side: Option<u32>,
    /// Override resampling filter
    pub filter: Option<ResampleFilter>,
    /// Select a built-in palette, discarding any inline colors
    pub palette: Option<String>,
    /// Override PNG pixels per cell
    pub scale: Option<u32>,
    /// Disable grid lines in PNG output
    pub no_grid_lines: bool,
}

/// Find mosaic.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for mosaic.toml
/// 2. Check XDG_CONFIG_HOME/brickmosaic/mosaic.toml (or ~/.config/brickmosaic/mosaic.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find mosaic.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("brickmosaic").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find mosaic.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a mosaic.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let options = config.convert_options()?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<MosaicConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "Loading config");
            load_config_file(&p)
        }
        None => Ok(MosaicConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<MosaicConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: MosaicConfig = toml::from_str(&contents)?;
    check(config)
}

/// Run validation, turning any findings into `ConfigError::Validation`.
pub fn check(config: MosaicConfig) -> Result<MosaicConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The result should
/// be re-validated with [`check`].
pub fn merge_cli_overrides(config: &mut MosaicConfig, overrides: &CliOverrides) {
    if let Some(size) = overrides.size {
        config.convert.size = Some(size);
    }

    if let Some(max_side) = overrides.max_side {
        config.convert.max_side = max_side;
    }

    if let Some(filter) = overrides.filter {
        config.convert.filter = filter;
    }

    if let Some(ref palette) = overrides.palette {
        config.palette.builtin = palette.clone();
        config.palette.colors = None;
    }

    if let Some(scale) = overrides.scale {
        config.export.scale = scale;
    }

    if overrides.no_grid_lines {
        config.export.grid_lines = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[convert]\nsize = 32");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[convert]\nsize = 32");

        let subdir = temp.path().join("photos").join("2026");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("brickmosaic");
        fs::create_dir_all(&dir).expect("should create config dir");
        let config_path = write_config(&dir, b"");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(value) => env::set_var("XDG_CONFIG_HOME", value),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[convert]
size = 64
filter = "lanczos3"

[export]
scale = 4
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.convert.size, Some(64));
        assert_eq!(config.convert.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.export.scale, 4);
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[palette]\ncolors = []\n");

        let result = load_config(Some(&config_path));
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("palette.colors"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config: MosaicConfig = toml::from_str(
            r##"
[palette]
colors = [{ name = "Snow", color = "#FFFFFF" }]
"##,
        )
        .unwrap();
        let overrides = CliOverrides {
            size: Some(48),
            max_side: Some(512),
            filter: Some(ResampleFilter::Nearest),
            palette: Some("lego".to_string()),
            scale: Some(2),
            no_grid_lines: true,
        };
        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.convert.size, Some(48));
        assert_eq!(config.convert.max_side, 512);
        assert_eq!(config.convert.filter, ResampleFilter::Nearest);
        assert!(config.palette.colors.is_none());
        assert_eq!(config.palette.builtin, "lego");
        assert_eq!(config.export.scale, 2);
        assert!(!config.export.grid_lines);
    }

    #[test]
    fn test_merge_empty_overrides_keeps_config() {
        let mut config = MosaicConfig::default();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.convert.size, None);
        assert!(config.export.grid_lines);
        assert!(check(config).is_ok());
    }
}
