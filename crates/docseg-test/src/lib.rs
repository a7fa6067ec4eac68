//! docseg-test - Regression test framework for docseg
//!
//! Provides the [`RegParams`] check tracker used by the `*_reg.rs`
//! integration tests, plus builders for small synthetic rasters:
//!
//! - [`ascii_raster`] - Rasters drawn as text, `#` or `X` for black
//! - [`random_raster`] - Deterministic noise for invariant checks
//! - [`filled_rects`] - Rasters made of solid rectangles
//!
//! # Usage
//!
//! ```
//! use docseg_test::{RegParams, ascii_raster};
//!
//! let img = ascii_raster(&["##..", "...#"]).unwrap();
//!
//! let mut rp = RegParams::new("ascii");
//! rp.compare_values(3.0, img.count_black() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use docseg_core::{BitImage, Box};

/// Build a raster from rows of text.
///
/// `#` and `X` are black; any other character is white.
///
/// # Errors
///
/// Returns [`TestError::RaggedRaster`] if the rows differ in length.
pub fn ascii_raster(rows: &[&str]) -> TestResult<BitImage> {
    let width = rows.first().map_or(0, |r| r.chars().count());
    for (row, line) in rows.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            return Err(TestError::RaggedRaster {
                row,
                len,
                expected: width,
            });
        }
    }

    let mut img = BitImage::new(width as u32, rows.len() as u32)?;
    for (y, line) in rows.iter().enumerate() {
        for (x, c) in line.chars().enumerate() {
            if matches!(c, '#' | 'X') {
                img.set_pixel(x as u32, y as u32, true)?;
            }
        }
    }
    Ok(img)
}

/// Build a `width` x `height` raster where each pixel is black with
/// probability `density`.
///
/// The same seed always yields the same raster.
///
/// # Errors
///
/// Returns [`TestError::InvalidParameter`] unless `0.0 <= density <= 1.0`.
pub fn random_raster(width: u32, height: u32, density: f64, seed: u64) -> TestResult<BitImage> {
    if !(0.0..=1.0).contains(&density) {
        return Err(TestError::InvalidParameter(format!(
            "density must be in [0, 1], got {density}"
        )));
    }
    // Compare against the top 32 bits of a 64-bit LCG
    let threshold = (density * f64::from(u32::MAX)) as u64;
    let mut state = seed;
    let mut img = BitImage::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            if (state >> 32) < threshold {
                img.set_pixel_unchecked(x, y, true);
            }
        }
    }
    Ok(img)
}

/// Build a `width` x `height` raster with the given `(x, y, w, h)`
/// rectangles filled black. Parts outside the raster are clipped.
///
/// # Errors
///
/// Returns [`TestError::InvalidParameter`] for a rectangle with negative
/// size.
pub fn filled_rects(width: u32, height: u32, rects: &[(i32, i32, i32, i32)]) -> TestResult<BitImage> {
    let mut img = BitImage::new(width, height)?;
    for &(x, y, w, h) in rects {
        let rect = Box::new(x, y, w, h)
            .map_err(|e| TestError::InvalidParameter(e.to_string()))?;
        img.fill_rect(&rect, true);
    }
    Ok(img)
}
