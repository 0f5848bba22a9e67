//! Error types for inkline-slice
//!
//! Internal only: the public slicer swallows every failure into an
//! empty result.

use thiserror::Error;

/// Errors that can occur inside the slicing pipeline
#[derive(Debug, Error)]
pub enum SliceError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkline_core::Error),

    /// Binarization error
    #[error("binarize error: {0}")]
    Binarize(#[from] inkline_binarize::BinarizeError),

    /// Morphology error
    #[error("morph error: {0}")]
    Morph(#[from] inkline_morph::MorphError),
}

/// Result type for slicing operations
pub type SliceResult<T> = Result<T, SliceError>;
