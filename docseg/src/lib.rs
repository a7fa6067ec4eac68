//! docseg - Document image analysis built on run-length connected components
//!
//! # Overview
//!
//! docseg scans bitonal page images and groups their black pixels into
//! connected components, the building block for binarization background
//! estimation, text-line histograms and layout analysis.
//!
//! # Example
//!
//! ```
//! use docseg::{BitImage, Box};
//! use docseg::region::{ExtractOptions, find_components};
//!
//! let mut page = BitImage::new(64, 32).unwrap();
//! page.fill_rect(&Box::new(4, 4, 10, 6).unwrap(), true);
//! page.fill_rect(&Box::new(20, 4, 2, 2).unwrap(), true);
//!
//! let ccs = find_components(&page, &ExtractOptions::new()).unwrap();
//! assert_eq!(ccs.len(), 2);
//! assert_eq!(ccs.average_area(10), 60.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use docseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use docseg_region as region;
