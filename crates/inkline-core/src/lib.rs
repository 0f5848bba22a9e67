//! Inkline Core - Basic data structures for line segmentation
//!
//! This crate provides the fundamental data structures shared by the
//! inkline crates:
//!
//! - [`Rect`] - Pixel rectangle (word boxes, band extents, crop regions)
//! - [`NormRect`] - Rectangle normalized to page size, the extractor output
//! - [`InkMask`] - Bi-level ink image with row/column projections
//! - [`profile`] - 1-D profile utilities (smoothing, valleys, rank values)
//!
//! All values are transient per-call data; nothing here caches across calls.

pub mod error;
pub mod mask;
pub mod profile;
pub mod rect;

pub use error::{Error, Result};
pub use mask::InkMask;
pub use rect::{NormRect, Rect};
