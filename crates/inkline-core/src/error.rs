//! Error types for inkline-core
//!
//! Provides a unified error type for the core data structures. The public
//! engine entry points never surface these; they exist for the library
//! internals, where degenerate geometry is a bug rather than bad input.

use thiserror::Error;

/// Inkline core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid mask dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Rectangle does not fit inside the mask
    #[error("rect {rect} out of bounds for {width}x{height}")]
    RectOutOfBounds {
        rect: String,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty input where at least one element is required
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}

/// Result type alias for inkline-core operations
pub type Result<T> = std::result::Result<T, Error>;
