//! Inkline Slice - Line crops for a recognizer
//!
//! Slices a page image into full-width line crops resized to a fixed
//! height, ready to feed a text recognition model. The line regions are
//! found independently of any transcription, so the output count is
//! whatever the page yields; callers that need exactly one region per
//! transcription line want the alignment extractor instead.
//!
//! # Usage
//!
//! ```no_run
//! use inkline_slice::slice_lines;
//!
//! let bytes = std::fs::read("page.png").unwrap();
//! for crop in slice_lines(&bytes) {
//!     assert_eq!(crop.image.height(), 64);
//! }
//! ```

mod error;
mod slicer;

pub use error::{SliceError, SliceResult};
pub use slicer::{LineCrop, SliceOptions, slice_lines, slice_lines_with};
