//! docseg-region - Run-length connected component analysis
//!
//! This crate groups the black pixels of a bitonal raster into connected
//! components, each stored as a list of horizontal runs, and provides the
//! queries document layout code builds on:
//!
//! - **Extraction** - Single-pass 4- or 8-connected labeling with optional
//!   noise filtering while scanning
//! - **Collections** - Stable component IDs, merge, delete and compaction
//! - **Subsets** - Selection by outline or by another component's pixels
//! - **Nearest neighbours** - k nearest components by bounding-box centre
//! - **Statistics** - Noise-filtered averages and size histograms
//!
//! # Examples
//!
//! ## Finding connected components
//!
//! ```
//! use docseg_region::{ExtractOptions, find_components};
//! use docseg_region::docseg_core::BitImage;
//!
//! let mut img = BitImage::new(100, 100).unwrap();
//! img.set_pixel(10, 10, true).unwrap();
//! img.set_pixel(11, 10, true).unwrap();
//! img.set_pixel(50, 50, true).unwrap();
//!
//! let components = find_components(&img, &ExtractOptions::new()).unwrap();
//! assert_eq!(components.len(), 2);
//! assert_eq!(components.get(0).unwrap().width(), 2);
//! ```
//!
//! ## Selecting components inside a region
//!
//! ```
//! use docseg_region::{ExtractOptions, find_components};
//! use docseg_region::docseg_core::{BitImage, Box, Polygon};
//!
//! let mut img = BitImage::new(40, 20).unwrap();
//! img.fill_rect(&Box::new(2, 2, 4, 4).unwrap(), true);
//! img.fill_rect(&Box::new(30, 2, 4, 4).unwrap(), true);
//!
//! let ccs = find_components(&img, &ExtractOptions::new()).unwrap();
//! let left_half = Polygon::from_box(&Box::new(0, 0, 20, 20).unwrap());
//! let subset = ccs.create_subset(&left_half, 0, true).unwrap();
//! assert_eq!(subset.len(), 1);
//! ```

pub mod collection;
pub mod component;
pub mod conncomp;
pub mod error;
pub mod neighbours;
pub mod run;
pub mod stats;
pub mod subset;
mod unionfind;

// Re-export core types
pub use docseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export component types
pub use collection::{ComponentCollection, Iter};
pub use component::{ComponentId, ComponentView, ConnectedComponent, Neighbour};
pub use run::{Run, RunIndex};

// Re-export extraction types and functions
pub use conncomp::{ConnectivityType, ExtractOptions, Extractor, find_components};
