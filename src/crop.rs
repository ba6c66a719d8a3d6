//! Cover-fit placement and circular clipping.
//!
//! The source is scaled so it fully covers the target square, centered,
//! and then everything outside the inscribed circle is made transparent.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Where a source image lands when cover-fitted into a `size x size` square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPlacement {
    /// Uniform scale factor: `max(size / width, size / height)`.
    pub scale: f64,
    /// Source width after scaling.
    pub scaled_width: f64,
    /// Source height after scaling.
    pub scaled_height: f64,
    /// Horizontal draw offset, zero or negative.
    pub offset_x: f64,
    /// Vertical draw offset, zero or negative.
    pub offset_y: f64,
}

impl CoverPlacement {
    /// Compute the placement of a `width x height` source in a `size` square.
    #[must_use]
    pub fn compute(width: u32, height: u32, size: u32) -> Self {
        let (w, h, s) = (f64::from(width), f64::from(height), f64::from(size));
        let scale = (s / w).max(s / h);
        let scaled_width = w * scale;
        let scaled_height = h * scale;
        Self {
            scale,
            scaled_width,
            scaled_height,
            offset_x: (s - scaled_width) / 2.0,
            offset_y: (s - scaled_height) / 2.0,
        }
    }

    /// The centered region of the source, in whole source pixels, that maps
    /// onto the target square: `(x, y, width, height)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn source_window(&self, width: u32, height: u32, size: u32) -> (u32, u32, u32, u32) {
        let extent = f64::from(size) / self.scale;
        let w = (extent.round() as u32).clamp(1, width);
        let h = (extent.round() as u32).clamp(1, height);
        ((width - w) / 2, (height - h) / 2, w, h)
    }
}

/// Scale `source` to cover a `size x size` square and crop the centered window.
///
/// Only the visible window of the source is resampled, so memory stays
/// bounded by `size * size` whatever the source aspect ratio.
#[must_use]
pub fn cover_square(source: &RgbaImage, size: u32) -> RgbaImage {
    let placement = CoverPlacement::compute(source.width(), source.height(), size);
    let (x, y, w, h) = placement.source_window(source.width(), source.height(), size);

    let window = imageops::crop_imm(source, x, y, w, h);
    if (w, h) == (size, size) {
        window.to_image()
    } else {
        imageops::resize(&*window, size, size, FilterType::Triangle)
    }
}

/// Clip a square image to its inscribed circle in place.
///
/// Coverage is estimated from the distance of each pixel center to the circle
/// center, giving a one-pixel anti-aliased rim. Pixels further than half a
/// pixel outside the circle end up fully transparent.
pub fn apply_circle_clip(image: &mut RgbaImage) {
    let size = image.width().min(image.height());
    let radius = f64::from(size) / 2.0;
    let center = radius;

    for (x, y, px) in image.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - center;
        let dy = f64::from(y) + 0.5 - center;
        let coverage = (radius - dx.hypot(dy) + 0.5).clamp(0.0, 1.0);
        if coverage < 1.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                px[3] = (f64::from(px[3]) * coverage).round() as u8;
            }
        }
    }
}
