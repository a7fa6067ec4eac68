//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test inputs or comparing results
#[derive(Debug, Error)]
pub enum TestError {
    /// An ASCII raster has rows of different lengths
    #[error("ragged ASCII raster: row {row} has {len} columns, expected {expected}")]
    RaggedRaster {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Invalid generator parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Box list comparison failed
    #[error("box comparison failed at index {index}")]
    BoxMismatch { index: usize },

    /// Raster construction failed in the core crate
    #[error("core error: {0}")]
    Core(#[from] docseg_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
