//! The fixed table of emoji filters and the colour math behind it.
//!
//! Each [`Adjustment`] mirrors one CSS filter function and follows the
//! W3C Filter Effects definitions: colour-matrix operations work on
//! non-premultiplied RGB, component transfers map each channel
//! independently, and blur averages colour in premultiplied space.
//! Alpha is never modified.

use std::fmt;

use image::{Rgba, Rgba32FImage, RgbaImage};

use crate::error::{Error, Result};

/// Row-major 3x3 colour matrix applied to `[r, g, b]`.
type ColorMatrix = [[f32; 3]; 3];

/// One image-adjustment operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Multiply every channel; `1.0` is identity.
    Brightness(f32),
    /// Scale distance from mid-grey; `1.0` is identity.
    Contrast(f32),
    /// Saturation multiplier; `0.0` is fully desaturated.
    Saturate(f32),
    /// Rotate hue by the given number of degrees.
    HueRotate(f32),
    /// Blend towards sepia tone by `0.0..=1.0`.
    Sepia(f32),
    /// Blend towards luminance grey by `0.0..=1.0`.
    Grayscale(f32),
    /// Blend towards the inverted colour by `0.0..=1.0`.
    Invert(f32),
    /// Gaussian blur of the colour channels, standard deviation in pixels.
    Blur(f32),
}

impl Adjustment {
    /// Apply this adjustment to `image` in place.
    pub fn apply(self, image: &mut RgbaImage) {
        match self {
            Self::Brightness(amount) => map_channels(image, |c| c * amount),
            Self::Contrast(amount) => map_channels(image, |c| (c - 127.5) * amount + 127.5),
            Self::Invert(amount) => {
                let amount = amount.clamp(0.0, 1.0);
                map_channels(image, |c| 255.0 * amount + c * (1.0 - 2.0 * amount));
            }
            Self::Saturate(amount) => apply_matrix(image, &saturate_matrix(amount)),
            Self::HueRotate(degrees) => apply_matrix(image, &hue_rotate_matrix(degrees)),
            Self::Sepia(amount) => apply_matrix(image, &sepia_matrix(amount)),
            Self::Grayscale(amount) => apply_matrix(image, &grayscale_matrix(amount)),
            Self::Blur(sigma) => {
                if sigma > 0.0 {
                    blur_colour(image, sigma);
                }
            }
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness(v) => write!(f, "brightness({v})"),
            Self::Contrast(v) => write!(f, "contrast({v})"),
            Self::Saturate(v) => write!(f, "saturate({v})"),
            Self::HueRotate(v) => write!(f, "hue-rotate({v}deg)"),
            Self::Sepia(v) => write!(f, "sepia({v})"),
            Self::Grayscale(v) => write!(f, "grayscale({v})"),
            Self::Invert(v) => write!(f, "invert({v})"),
            Self::Blur(v) => write!(f, "blur({v}px)"),
        }
    }
}

/// A named emoji style: an identifier, a display name and its effect chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDefinition {
    /// Unique identifier, also used in export file names.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Adjustments applied left to right. Empty means identity.
    pub effect: &'static [Adjustment],
}

impl FilterDefinition {
    /// Render the effect chain in CSS `filter` syntax (`"none"` when empty).
    #[must_use]
    pub fn css(&self) -> String {
        if self.effect.is_empty() {
            return "none".to_string();
        }
        self.effect
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Every emoji style, in display order.
pub static FILTERS: [FilterDefinition; 12] = [
    FilterDefinition {
        id: "original",
        name: "Original",
        effect: &[],
    },
    FilterDefinition {
        id: "bright",
        name: "Bright",
        effect: &[Adjustment::Brightness(1.3), Adjustment::Contrast(1.1)],
    },
    FilterDefinition {
        id: "vibrant",
        name: "Vibrant",
        effect: &[Adjustment::Saturate(1.5), Adjustment::Contrast(1.2)],
    },
    FilterDefinition {
        id: "cool",
        name: "Cool",
        effect: &[Adjustment::HueRotate(180.0), Adjustment::Saturate(1.2)],
    },
    FilterDefinition {
        id: "warm",
        name: "Warm",
        effect: &[Adjustment::Sepia(0.3), Adjustment::Saturate(1.3)],
    },
    FilterDefinition {
        id: "vintage",
        name: "Vintage",
        effect: &[
            Adjustment::Sepia(0.5),
            Adjustment::Contrast(0.9),
            Adjustment::Brightness(1.1),
        ],
    },
    FilterDefinition {
        id: "grayscale",
        name: "Grayscale",
        effect: &[Adjustment::Grayscale(1.0), Adjustment::Contrast(1.1)],
    },
    FilterDefinition {
        id: "inverted",
        name: "Inverted",
        effect: &[Adjustment::Invert(1.0)],
    },
    FilterDefinition {
        id: "pop",
        name: "Pop Art",
        effect: &[Adjustment::Saturate(2.0), Adjustment::Contrast(1.5)],
    },
    FilterDefinition {
        id: "dreamy",
        name: "Dreamy",
        effect: &[
            Adjustment::Blur(1.0),
            Adjustment::Brightness(1.1),
            Adjustment::Saturate(0.8),
        ],
    },
    FilterDefinition {
        id: "sharp",
        name: "Sharp",
        effect: &[Adjustment::Contrast(1.4), Adjustment::Brightness(0.95)],
    },
    FilterDefinition {
        id: "soft",
        name: "Soft",
        effect: &[
            Adjustment::Brightness(1.05),
            Adjustment::Contrast(0.85),
            Adjustment::Saturate(0.9),
        ],
    },
];

/// Look up a filter by identifier.
///
/// # Errors
///
/// Returns [`Error::UnknownFilter`] if no filter has that identifier.
pub fn find(id: &str) -> Result<&'static FilterDefinition> {
    FILTERS
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| Error::UnknownFilter(id.to_string()))
}

/// Apply an effect chain to `image` in place, left to right.
pub fn apply_effect(image: &mut RgbaImage, effect: &[Adjustment]) {
    for adjustment in effect {
        adjustment.apply(image);
    }
}

/// Gaussian blur in premultiplied space, writing back colour only.
///
/// Colour is weighted by alpha so hidden transparent pixels never bleed into
/// visible ones; the alpha channel itself keeps its original values.
fn blur_colour(image: &mut RgbaImage, sigma: f32) {
    let premultiplied = Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let px = image.get_pixel(x, y);
        let a = f32::from(px[3]) / 255.0;
        Rgba([
            f32::from(px[0]) * a,
            f32::from(px[1]) * a,
            f32::from(px[2]) * a,
            a,
        ])
    });
    let blurred = image::imageops::blur(&premultiplied, sigma);

    for (px, b) in image.pixels_mut().zip(blurred.pixels()) {
        if b[3] > f32::EPSILON {
            for ch in 0..3 {
                px[ch] = to_channel(b[ch] / b[3]);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn map_channels(image: &mut RgbaImage, f: impl Fn(f32) -> f32) {
    for px in image.pixels_mut() {
        for ch in 0..3 {
            px[ch] = to_channel(f(f32::from(px[ch])));
        }
    }
}

fn apply_matrix(image: &mut RgbaImage, m: &ColorMatrix) {
    for px in image.pixels_mut() {
        let rgb = [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])];
        for (ch, row) in m.iter().enumerate() {
            px[ch] = to_channel(row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);
        }
    }
}

fn saturate_matrix(s: f32) -> ColorMatrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> ColorMatrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn sepia_matrix(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn grayscale_matrix(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}
