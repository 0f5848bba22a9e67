//! Error types for inkline-binarize

use thiserror::Error;

/// Errors that can occur during binarization
#[derive(Debug, Error)]
pub enum BinarizeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkline_core::Error),

    /// Empty image
    #[error("empty image: no pixels to process")]
    EmptyImage,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for binarization operations
pub type BinarizeResult<T> = Result<T, BinarizeError>;
