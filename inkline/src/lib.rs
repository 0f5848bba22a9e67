//! Inkline - Line segmentation and alignment for scanned text pages
//!
//! Two entry points cover the two ways a transcription pipeline consumes
//! a page:
//!
//! - [`align::extract_aligned_boxes`]: given page bytes and the number of
//!   transcription lines N, returns exactly N normalized line boxes in
//!   reading order, no matter how noisy, multi-column, or blank the page
//!   is. Use this to anchor existing transcriptions onto the page.
//! - [`slice::slice_lines`]: segments a page into full-width line crops
//!   resized to a fixed height for a recognizer. The output count is
//!   whatever detection yields.
//!
//! Neither entry point fails on bad input: corrupt bytes produce an
//! empty vector.
//!
//! # Example
//!
//! ```no_run
//! use inkline::align::extract_aligned_boxes;
//!
//! let bytes = std::fs::read("page.png").unwrap();
//! let boxes = extract_aligned_boxes(&bytes, 12);
//! assert_eq!(boxes.len(), 12);
//! for b in &boxes {
//!     assert!(b.x >= 0.0 && b.right() <= 1.0);
//! }
//! ```

// Re-export core types (primary data structures used everywhere)
pub use inkline_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use inkline_align as align;
pub use inkline_binarize as binarize;
pub use inkline_morph as morph;
pub use inkline_slice as slice;
