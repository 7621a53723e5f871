//! File output and output path generation

use image::RgbaImage;
use std::path::{Path, PathBuf};

use crate::export::ExportError;

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Write text to a file, creating parent directories.
pub fn write_text(contents: &str, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Generate the output path for one export of one input image.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input}_mosaic.{ext}` next to the input |
/// | `-o dir/` | `dir/{input}_mosaic.{ext}` |
/// | `-o out.png`, single input | `out.{ext}` |
/// | `-o out.png`, several inputs | `out_{input}.{ext}` |
///
/// A directory is recognised by a trailing `/` or by already existing.
pub fn generate_output_path(
    input: &Path,
    extension: &str,
    output_arg: Option<&Path>,
    is_single_input: bool,
) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();

            if is_dir {
                output.join(format!("{}_mosaic.{}", input_stem, extension))
            } else if is_single_input {
                output.with_extension(extension)
            } else {
                let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
                sibling(output, format!("{}_{}.{}", stem, input_stem, extension))
            }
        }
        None => sibling(input, format!("{}_mosaic.{}", input_stem, extension)),
    }
}

/// `name` placed in the same directory as `path`
fn sibling(path: &Path, name: String) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
