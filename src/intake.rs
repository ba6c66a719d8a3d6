//! Image intake: accepting one upload and decoding it into a [`SourceImage`].

use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// MIME type used when neither the extension nor the content identify an image.
const FALLBACK_MIME: &str = "application/octet-stream";

/// A single file handed to the intake: its declared type and raw bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name, if known.
    pub name: Option<String>,
    /// Declared MIME type, e.g. `image/png`.
    pub mime: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload from a declared MIME type and its bytes.
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: None,
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, deriving its MIME type from the extension and
    /// falling back to sniffing the content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime = ImageFormat::from_path(path)
            .or_else(|_| image::guess_format(&bytes))
            .map_or_else(|_| FALLBACK_MIME.to_string(), |f| f.to_mime_type().to_string());

        Ok(Self {
            name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
            mime,
            bytes,
        })
    }

    /// Whether the declared type is in the `image/*` category.
    #[must_use]
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }
}

/// Check whether a MIME type names an image.
#[must_use]
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// A decoded, immutable RGBA bitmap.
///
/// Cloning is cheap: the pixels are shared.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: Arc<RgbaImage>,
}

impl SourceImage {
    /// Decode an upload.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedMediaType`] if the upload is not declared as an image.
    /// - [`Error::Decode`] if the bytes cannot be decoded.
    /// - [`Error::EmptyImage`] if the decoded image has no pixels.
    pub fn decode(upload: &Upload) -> Result<Self> {
        if !upload.is_image() {
            return Err(Error::UnsupportedMediaType(upload.mime.clone()));
        }
        let decoded = image::load_from_memory(&upload.bytes).map_err(Error::Decode)?;
        Self::from_rgba(decoded.to_rgba8())
    }

    /// Wrap an already-decoded bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] if either dimension is zero.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(Error::EmptyImage);
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The decoded pixels.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
