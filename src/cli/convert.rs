//! Convert command implementation

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;
use rayon::prelude::*;

use crate::config::CliOverrides;
use crate::error::MosaicError;
use crate::export::{ExportError, ExportFormat, ExportOptions};
use crate::mosaic::MosaicData;
use crate::output::generate_output_path;
use crate::pipeline::{convert_file, ConvertOptions};
use crate::terminal::render_ansi_mosaic;

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Why one input failed to convert
#[derive(Debug)]
enum ConvertFailure {
    Mosaic(MosaicError),
    Export(PathBuf, ExportError),
}

/// A converted input and the files written for it
struct Converted {
    mosaic: MosaicData,
    written: Vec<PathBuf>,
}

/// True if `input` contains glob metacharacters.
fn is_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Expand glob patterns, keeping plain paths as given.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut paths = Vec::new();
    for input in inputs {
        if !is_pattern(input) {
            paths.push(PathBuf::from(input));
            continue;
        }
        let entries = glob(input).map_err(|e| format!("Invalid pattern '{}': {}", input, e))?;
        let before = paths.len();
        paths.extend(entries.filter_map(Result::ok).filter(|p| p.is_file()));
        if paths.len() == before {
            return Err(format!("No files match pattern '{}'", input));
        }
    }
    Ok(paths)
}

/// Two inputs that would be written to the same output file
#[derive(Debug, PartialEq)]
struct OutputCollision {
    path: PathBuf,
    first: PathBuf,
    second: PathBuf,
}

/// Find the first output path claimed by more than one input.
fn find_output_collision(
    inputs: &[PathBuf],
    formats: &[ExportFormat],
    output: Option<&Path>,
    is_single_input: bool,
) -> Option<OutputCollision> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    for input in inputs {
        for format in formats {
            let path =
                generate_output_path(input, format.exporter().extension(), output, is_single_input);
            if let Some(first) = claimed.get(&path) {
                return Some(OutputCollision {
                    path,
                    first: first.to_path_buf(),
                    second: input.clone(),
                });
            }
            claimed.insert(path, input);
        }
    }
    None
}

fn convert_one(
    input: &Path,
    options: &ConvertOptions,
    formats: &[ExportFormat],
    export_options: &ExportOptions,
    output: Option<&Path>,
    is_single_input: bool,
) -> Result<Converted, ConvertFailure> {
    let mosaic = convert_file(input, options).map_err(ConvertFailure::Mosaic)?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let exporter = format.exporter();
        let path = generate_output_path(input, exporter.extension(), output, is_single_input);
        exporter
            .export(&mosaic, &path, export_options)
            .map_err(|e| ConvertFailure::Export(path.clone(), e))?;
        tracing::debug!(format = exporter.format_name(), path = %path.display(), "Exported");
        written.push(path);
    }

    Ok(Converted { mosaic, written })
}

/// Execute the convert command
pub fn run_convert(
    inputs: &[String],
    output: Option<&Path>,
    formats: &[ExportFormat],
    preview: bool,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let inputs = match expand_inputs(inputs) {
        Ok(paths) => paths,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let config = match resolve_config(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let options = match config.convert_options() {
        Ok(options) => options,
        Err(errors) => {
            for e in errors {
                eprintln!("Error: {}", e);
            }
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let export_options = ExportOptions::from(&config.export);

    let mut unique_formats: Vec<ExportFormat> = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique_formats.contains(format) {
            unique_formats.push(*format);
        }
    }

    let is_single_input = inputs.len() == 1;
    let collision = find_output_collision(&inputs, &unique_formats, output, is_single_input);
    if let Some(collision) = collision {
        eprintln!(
            "Error: {} and {} would both be written to {}",
            collision.first.display(),
            collision.second.display(),
            collision.path.display()
        );
        eprintln!("Hint: rename one of the inputs or convert them separately");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let results: Vec<(PathBuf, Result<Converted, ConvertFailure>)> = inputs
        .par_iter()
        .map(|input| {
            let result = convert_one(
                input,
                &options,
                &unique_formats,
                &export_options,
                output,
                is_single_input,
            );
            (input.clone(), result)
        })
        .collect();

    let mut failures = 0;
    let mut invalid = false;
    for (input, result) in results {
        match result {
            Ok(converted) => {
                let mosaic = &converted.mosaic;
                println!(
                    "{}: {}×{} studs, {} pieces in {} colors, {} base plates",
                    input.display(),
                    mosaic.width(),
                    mosaic.height(),
                    mosaic.total_pieces,
                    mosaic.piece_count.len(),
                    mosaic.total_plates()
                );
                if preview {
                    let (grid, legend) = render_ansi_mosaic(mosaic);
                    print!("{}{}", grid, legend);
                }
                for path in &converted.written {
                    println!("Saved: {}", path.display());
                }
            }
            Err(ConvertFailure::Mosaic(e)) => {
                failures += 1;
                eprintln!("Error: {}: {}", input.display(), e);
                if e.is_decode_error() {
                    eprintln!("Hint: the file is not a readable image, try a different image");
                } else if matches!(e, MosaicError::InvalidConfiguration(_)) {
                    invalid = true;
                }
            }
            Err(ConvertFailure::Export(path, e)) => {
                failures += 1;
                eprintln!("Error: {}: failed to write {}: {}", input.display(), path.display(), e);
            }
        }
    }

    if failures == 0 {
        ExitCode::from(EXIT_SUCCESS)
    } else if invalid {
        ExitCode::from(EXIT_INVALID_ARGS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_pattern() {
        assert!(is_pattern("photos/*.png"));
        assert!(is_pattern("img?.jpg"));
        assert!(!is_pattern("photos/cat.png"));
    }

    #[test]
    fn test_expand_inputs_plain_paths_kept() {
        let inputs = vec!["missing.png".to_string()];
        assert_eq!(expand_inputs(&inputs).unwrap(), vec![PathBuf::from("missing.png")]);
    }

    #[test]
    fn test_expand_inputs_glob() {
        let temp = TempDir::new().unwrap();
        for name in ["a.png", "b.png", "notes.txt"] {
            std::fs::write(temp.path().join(name), b"x").unwrap();
        }
        let pattern = format!("{}/*.png", temp.path().display());
        let mut paths = expand_inputs(&[pattern]).unwrap();
        paths.sort();
        assert_eq!(paths, vec![temp.path().join("a.png"), temp.path().join("b.png")]);
    }

    #[test]
    fn test_expand_inputs_no_match_is_error() {
        let temp = TempDir::new().unwrap();
        let pattern = format!("{}/*.gif", temp.path().display());
        let err = expand_inputs(&[pattern]).unwrap_err();
        assert!(err.contains("No files match"));
    }

    #[test]
    fn test_output_collision_same_stem_into_directory() {
        let inputs = vec![PathBuf::from("a/cat.png"), PathBuf::from("b/cat.png")];
        let collision =
            find_output_collision(&inputs, &[ExportFormat::List], Some(Path::new("out/")), false)
                .unwrap();
        assert_eq!(
            collision,
            OutputCollision {
                path: PathBuf::from("out/cat_mosaic.txt"),
                first: PathBuf::from("a/cat.png"),
                second: PathBuf::from("b/cat.png"),
            }
        );
    }

    #[test]
    fn test_no_collision_for_sibling_outputs() {
        let inputs = vec![PathBuf::from("a/cat.png"), PathBuf::from("b/cat.png")];
        let formats = [ExportFormat::Png, ExportFormat::Json];
        assert_eq!(find_output_collision(&inputs, &formats, None, false), None);
    }

    #[test]
    fn test_collision_across_extensions_of_one_stem() {
        let inputs = vec![PathBuf::from("cat.png"), PathBuf::from("cat.jpg")];
        let collision = find_output_collision(&inputs, &[ExportFormat::Png], None, false).unwrap();
        assert_eq!(collision.path, PathBuf::from("cat_mosaic.png"));
    }
}
