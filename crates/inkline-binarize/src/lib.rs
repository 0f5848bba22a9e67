//! Inkline Binarize - From page pixels to an ink mask
//!
//! Converts a decoded page into a bi-level [`InkMask`](inkline_core::InkMask)
//! with ink = 1. Binarization is inverted relative to the usual document
//! convention because everything downstream measures ink, not paper.
//!
//! Two threshold variants are provided:
//!
//! - Global: Otsu's between-class-variance threshold over the whole page
//! - Local: mean-adaptive threshold over a square window
//!
//! [`binarize_auto`] runs both and keeps the candidate whose ink ratio is
//! plausible for a handwritten page, which protects against the all-black
//! and all-white masks that extreme scans produce under a single method.

mod error;
pub mod threshold;

pub use error::{BinarizeError, BinarizeResult};
pub use threshold::{
    BinarizeOptions, binarize_adaptive, binarize_at, binarize_auto, otsu_level, smooth,
    to_grayscale,
};
