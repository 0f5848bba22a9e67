//! Inkline Align - Line boxes aligned to an external transcription
//!
//! The alignment extractor: given raw page bytes and a line count N
//! (the number of lines in an externally produced transcription), return
//! exactly N normalized boxes in reading order, one per line, however
//! ambiguous, multi-column, noisy, or blank the page is.
//!
//! The pipeline is binarize → word detection → column split → line
//! banding → projection refinement → monotonic guard, with a fallback
//! synthesizer guaranteeing the count when the page carries no usable
//! ink. See [`extract_aligned_boxes`].
//!
//! Error contract: nothing here ever returns an error or panics on page
//! input. Corrupt bytes and N = 0 yield an empty vector; every decodable
//! page yields exactly N boxes.

mod error;

pub mod banding;
pub mod columns;
pub mod extract;
pub mod fallback;
pub mod guard;
pub mod refine;

pub use banding::{BandingStrategy, allocate_lines, band_words};
pub use columns::{ColumnSegment, split_columns};
pub use error::{AlignError, AlignResult};
pub use extract::{ExtractOptions, extract_aligned_boxes, extract_aligned_boxes_with};
pub use fallback::synthesize_boxes;
pub use guard::enforce_monotonic;
pub use refine::{RefineOptions, refine_band};
