//! Inkline Morph - Binary morphology and component analysis
//!
//! Operations on [`InkMask`](inkline_core::InkMask):
//!
//! - Brick (rectangular) dilation, erosion, opening, closing
//! - Ruled-line removal, so a printed rule cannot bridge unrelated words
//! - Connected component extraction (union-find, 4- or 8-way)
//! - The word detector that turns an ink mask into word boxes

mod error;

pub mod binary;
pub mod conncomp;
pub mod words;

pub use binary::{close_brick, dilate_brick, erode_brick, open_brick, remove_horizontal_rules};
pub use conncomp::{Component, Connectivity, find_connected_components};
pub use error::{MorphError, MorphResult};
pub use words::{WordDetectOptions, detect_words};
