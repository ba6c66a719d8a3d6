//! Turn a single photo into a set of circular, filter-styled emoji.
//!
//! One decoded image is cover-fitted into a square, run through each of the
//! twelve fixed [`FILTERS`], clipped to the inscribed circle and encoded as
//! PNG (plus a `data:` URL for embedding).
//!
//! # Quick Start
//!
//! ```no_run
//! use emoji_maker::{Session, Upload};
//!
//! let mut session = Session::default();
//! let upload = Upload::from_path("face.jpg".as_ref()).unwrap();
//! session.submit(&upload).unwrap();
//! for variant in session.variants().iter() {
//!     println!("{} -> {} bytes", variant.id, variant.png.len());
//! }
//! ```
//!
//! # Regenerating at another size
//!
//! ```no_run
//! use emoji_maker::{export, CropSize, Session, Upload};
//!
//! let mut session = Session::default();
//! session.submit(&Upload::from_path("face.jpg".as_ref()).unwrap()).unwrap();
//! session.set_crop_size(CropSize::new(256).unwrap());
//! session.regenerate().unwrap();
//! export::download_all(&session.variants(), "out".as_ref(), export::DEFAULT_STAGGER).unwrap();
//! ```

#![deny(missing_docs)]

pub mod crop;
pub mod error;
pub mod export;
pub mod filters;
mod intake;
mod render;
mod session;

pub use error::{Error, Result};
pub use filters::{Adjustment, FilterDefinition, FILTERS};
pub use intake::{is_image_mime, SourceImage, Upload};
pub use render::{
    encode_png, png_data_url, render_one, render_variants, CropSize, RenderOptions,
    VariantOutput, DEFAULT_CROP_SIZE, MAX_CROP_SIZE, MIN_CROP_SIZE,
};
pub use session::{IntakeOutcome, Session};
