//! In-memory editing session: the current image, crop size and rendered variants.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::intake::{SourceImage, Upload};
use crate::render::{self, CropSize, RenderOptions, VariantOutput};

/// What happened to an upload handed to [`Session::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// The upload was not an image; nothing changed.
    Ignored,
    /// The upload was decoded and this many variants were rendered.
    Rendered(usize),
}

/// Holds at most one source image and the variants last rendered from it.
///
/// Both are replaced whole, never mutated in place. Clones of the variant
/// list taken through [`Session::variants`] stay valid across re-renders.
#[derive(Debug, Default)]
pub struct Session {
    options: RenderOptions,
    source: Option<SourceImage>,
    variants: Arc<[VariantOutput]>,
}

impl Session {
    /// Create an empty session.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            source: None,
            variants: Arc::from(Vec::new()),
        }
    }

    /// Take in one upload.
    ///
    /// Non-image uploads are ignored. Otherwise the image is decoded, replaces
    /// the current one and is rendered at the configured crop size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] or [`Error::EmptyImage`] if the image cannot be
    /// read, or [`Error::Encode`] if rendering fails. The session is left as it
    /// was before the call in every error case.
    pub fn submit(&mut self, upload: &Upload) -> Result<IntakeOutcome> {
        if !upload.is_image() {
            log::warn!(
                "ignoring {} ({})",
                upload.name.as_deref().unwrap_or("upload"),
                upload.mime
            );
            return Ok(IntakeOutcome::Ignored);
        }

        let source = SourceImage::decode(upload)?;
        log::info!(
            "loaded {} ({}x{}, {} bytes)",
            upload.name.as_deref().unwrap_or("upload"),
            source.width(),
            source.height(),
            upload.bytes.len()
        );

        let variants = render::render_variants(&source, self.options.crop_size)?;
        let count = variants.len();
        self.source = Some(source);
        self.variants = variants.into();
        Ok(IntakeOutcome::Rendered(count))
    }

    /// Change the crop size used by the next render. Does not re-render.
    pub fn set_crop_size(&mut self, crop_size: CropSize) {
        self.options.crop_size = crop_size;
    }

    /// Re-render the current image at the current crop size.
    ///
    /// Returns the number of variants rendered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSourceImage`] if nothing has been loaded, or
    /// [`Error::Encode`] if rendering fails (the previous variants are kept).
    pub fn regenerate(&mut self) -> Result<usize> {
        let source = self.source.as_ref().ok_or(Error::NoSourceImage)?;
        let variants = render::render_variants(source, self.options.crop_size)?;
        let count = variants.len();
        self.variants = variants.into();
        Ok(count)
    }

    /// Drop the current image and all variants.
    pub fn reset(&mut self) {
        self.source = None;
        self.variants = Arc::from(Vec::new());
    }

    /// The currently loaded image, if any.
    #[must_use]
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Snapshot of the most recently rendered variants.
    #[must_use]
    pub fn variants(&self) -> Arc<[VariantOutput]> {
        Arc::clone(&self.variants)
    }

    /// The crop size the next render will use.
    #[must_use]
    pub fn crop_size(&self) -> CropSize {
        self.options.crop_size
    }
}
