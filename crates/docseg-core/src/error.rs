//! Error types for docseg-core
//!
//! Provides a unified error type for the core data structures. Each variant
//! captures enough context for diagnostics without exposing internal
//! implementation details.

use thiserror::Error;

/// docseg core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Pixel coordinate outside the image
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Result type alias for docseg core operations
pub type Result<T> = std::result::Result<T, Error>;
