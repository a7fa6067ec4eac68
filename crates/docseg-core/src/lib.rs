//! docseg Core - Basic data structures for document image analysis
//!
//! This crate provides the fundamental data structures shared by the
//! docseg analysis crates:
//!
//! - [`BitImage`] - Packed bitonal raster
//! - [`Box`] - Rectangle regions
//! - [`Polygon`] - Closed region outlines
//! - [`Raster`] / [`Outline`] / [`StopSignal`] / [`ProgressReporter`] -
//!   Interfaces through which algorithms reach images, geometry and callers

pub mod bitmap;
pub mod box_;
pub mod error;
pub mod polygon;
pub mod traits;

pub use bitmap::BitImage;
pub use box_::Box;
pub use error::{Error, Result};
pub use polygon::Polygon;
pub use traits::{GRAY_BLACK_THRESHOLD, Outline, ProgressReporter, Raster, StopSignal};

// Re-export so callers can name the grayscale raster type without a direct dependency
pub use image;
