//! Error types for the emoji-maker crate.

/// Errors that can occur while taking in an image, rendering variants or exporting them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The upload does not declare an `image/*` media type.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The upload claimed to be an image but its bytes could not be decoded.
    #[error("could not read image: {0}")]
    Decode(image::ImageError),

    /// The decoded image has no pixels.
    #[error("image has zero width or height")]
    EmptyImage,

    /// The requested crop size is outside the supported range.
    #[error("crop size {size} is outside {min}..={max}")]
    InvalidCropSize {
        /// Requested edge length in pixels.
        size: u32,
        /// Smallest accepted edge length.
        min: u32,
        /// Largest accepted edge length.
        max: u32,
    },

    /// A rendered variant could not be encoded as PNG.
    #[error("failed to encode variant: {0}")]
    Encode(image::ImageError),

    /// A render was requested before any image was loaded.
    #[error("no image loaded")]
    NoSourceImage,

    /// No filter with the given identifier exists.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let unsupported = Error::UnsupportedMediaType("text/plain".to_string());
        assert!(unsupported.to_string().contains("text/plain"));

        let bad_size = Error::InvalidCropSize {
            size: 64,
            min: 128,
            max: 1024,
        };
        let msg = bad_size.to_string();
        assert!(msg.contains("64"));
        assert!(msg.contains("128..=1024"));

        assert_eq!(Error::UnknownFilter("sparkle".into()).to_string(), "unknown filter: sparkle");
    }
}
