//! Error types for inkline-align
//!
//! Internal only: the public extractor swallows every failure into an
//! empty result or fallback synthesis, per the always-N contract.

use thiserror::Error;

/// Errors that can occur inside the alignment pipeline
#[derive(Debug, Error)]
pub enum AlignError {
    /// Page bytes did not decode to an image
    #[error("page decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkline_core::Error),

    /// Binarization error
    #[error("binarize error: {0}")]
    Binarize(#[from] inkline_binarize::BinarizeError),

    /// Morphology error
    #[error("morph error: {0}")]
    Morph(#[from] inkline_morph::MorphError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
