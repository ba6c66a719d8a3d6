//! Variant rendering: one circular, filtered PNG per entry of [`FILTERS`].

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, RgbaImage};

use crate::crop;
use crate::error::{Error, Result};
use crate::filters::{self, FilterDefinition, FILTERS};
use crate::intake::SourceImage;

/// Smallest supported crop size in pixels.
pub const MIN_CROP_SIZE: u32 = 128;
/// Largest supported crop size in pixels.
pub const MAX_CROP_SIZE: u32 = 1024;
/// Crop size used when none is configured.
pub const DEFAULT_CROP_SIZE: u32 = 512;

/// Edge length of the square output, validated to `128..=1024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CropSize(u32);

impl CropSize {
    /// Increment used by interactive size pickers.
    pub const STEP: u32 = 64;

    /// Validate a crop size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCropSize`] if `size` is outside `128..=1024`.
    pub fn new(size: u32) -> Result<Self> {
        if (MIN_CROP_SIZE..=MAX_CROP_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(Error::InvalidCropSize {
                size,
                min: MIN_CROP_SIZE,
                max: MAX_CROP_SIZE,
            })
        }
    }

    /// The size in pixels.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CropSize {
    fn default() -> Self {
        Self(DEFAULT_CROP_SIZE)
    }
}

impl TryFrom<u32> for CropSize {
    type Error = Error;

    fn try_from(size: u32) -> Result<Self> {
        Self::new(size)
    }
}

/// Options controlling variant rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Output edge length.
    pub crop_size: CropSize,
}

/// One rendered emoji.
#[derive(Debug, Clone)]
pub struct VariantOutput {
    /// Identifier of the filter that produced this variant.
    pub id: &'static str,
    /// Display name of that filter.
    pub name: &'static str,
    /// The clipped, filtered `size x size` bitmap.
    pub bitmap: RgbaImage,
    /// PNG encoding of `bitmap`.
    pub png: Vec<u8>,
    /// `data:image/png;base64,...` form of `png`, ready for embedding.
    pub data_url: String,
}

impl VariantOutput {
    /// Decode the stored PNG back into pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the stored bytes are not a valid PNG.
    pub fn decode_png(&self) -> Result<RgbaImage> {
        image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map(|img| img.to_rgba8())
            .map_err(Error::Decode)
    }
}

/// Render every filter in [`FILTERS`] for `source` at `crop_size`.
///
/// The result is in table order. Uses the rayon pool when the `parallel`
/// feature is enabled; each variant only reads the shared cover-fitted square.
///
/// # Errors
///
/// Returns [`Error::Encode`] if any variant fails to encode. No partial list
/// is returned in that case.
pub fn render_variants(source: &SourceImage, crop_size: CropSize) -> Result<Vec<VariantOutput>> {
    let size = crop_size.get();
    let placement = crop::CoverPlacement::compute(source.width(), source.height(), size);
    log::info!(
        "rendering {} variants at {size}x{size} from {}x{} (scale {:.4}, offset {:.1},{:.1})",
        FILTERS.len(),
        source.width(),
        source.height(),
        placement.scale,
        placement.offset_x,
        placement.offset_y,
    );

    let base = crop::cover_square(source.pixels(), size);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        FILTERS
            .par_iter()
            .map(|filter| render_one(&base, filter))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        FILTERS
            .iter()
            .map(|filter| render_one(&base, filter))
            .collect()
    }
}

/// Render a single filter onto a copy of the cover-fitted square.
///
/// # Errors
///
/// Returns [`Error::Encode`] if PNG encoding fails.
pub fn render_one(base: &RgbaImage, filter: &FilterDefinition) -> Result<VariantOutput> {
    let mut bitmap = base.clone();
    filters::apply_effect(&mut bitmap, filter.effect);
    crop::apply_circle_clip(&mut bitmap);

    let png = encode_png(&bitmap)?;
    let data_url = png_data_url(&png);
    log::debug!("rendered '{}' ({} bytes)", filter.id, png.len());

    Ok(VariantOutput {
        id: filter.id,
        name: filter.name,
        bitmap,
        png,
        data_url,
    })
}

/// Encode a bitmap as PNG bytes.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the PNG encoder fails.
pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    bitmap
        .write_to(&mut out, ImageFormat::Png)
        .map_err(Error::Encode)?;
    Ok(out.into_inner())
}

/// Wrap PNG bytes in a self-contained `data:` URL.
#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png)
    )
}
