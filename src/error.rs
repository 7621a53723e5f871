//! Error types for the image to mosaic pipeline

use thiserror::Error;

/// Errors produced while converting an image into a mosaic.
///
/// Conversion is all-or-nothing: any of these aborts the pipeline and no
/// partial `MosaicData` is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MosaicError {
    /// Source bytes are not a decodable image, or decode to a 0-sized bitmap
    #[error("could not decode image: {0}")]
    ImageDecode(String),
    /// Empty palette, non-positive grid dimension or similar programmer error
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Failure reading the source file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MosaicError {
    /// Shorthand for an `InvalidConfiguration` error
    pub fn invalid(message: impl Into<String>) -> Self {
        MosaicError::InvalidConfiguration(message.into())
    }

    /// Whether a different input image could succeed where this one failed
    pub fn is_decode_error(&self) -> bool {
        matches!(self, MosaicError::ImageDecode(_))
    }
}

// Decoding happens from memory, so an IO error from a decoder means truncated
// or corrupt data, not a filesystem problem.
impl From<image::ImageError> for MosaicError {
    fn from(e: image::ImageError) -> Self {
        MosaicError::ImageDecode(e.to_string())
    }
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, MosaicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let decode = MosaicError::ImageDecode("unsupported format".to_string());
        assert_eq!(decode.to_string(), "could not decode image: unsupported format");

        let config = MosaicError::invalid("palette is empty");
        assert_eq!(config.to_string(), "invalid configuration: palette is empty");
    }

    #[test]
    fn test_is_decode_error() {
        assert!(MosaicError::ImageDecode(String::new()).is_decode_error());
        assert!(!MosaicError::invalid("x").is_decode_error());
    }

    #[test]
    fn test_from_image_error_maps_to_decode() {
        let err = image::load_from_memory(b"definitely not an image").unwrap_err();
        assert!(MosaicError::from(err).is_decode_error());
    }
}
