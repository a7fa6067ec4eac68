//! BitImage - packed bitonal raster
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - A set bit is a black (foreground) pixel
//!
//! Unlike most image containers, zero-sized images are allowed: analysing
//! one simply yields no components.

use crate::box_::Box;
use crate::error::{Error, Result};
use crate::traits::Raster;

/// Packed 1-bit image.
///
/// # Examples
///
/// ```
/// use docseg_core::{BitImage, Raster};
///
/// let mut img = BitImage::new(40, 10).unwrap();
/// img.set_pixel(33, 2, true).unwrap();
/// assert!(img.is_black(33, 2));
/// assert_eq!(img.count_black(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitImage {
    width: u32,
    height: u32,
    /// 32-bit words per line
    wpl: u32,
    data: Vec<u32>,
}

impl BitImage {
    /// Create a white (all background) image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the pixel buffer size overflows
    /// and [`Error::AllocationFailed`] if it cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let wpl = width.div_ceil(32);
        let words = (wpl as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;

        let mut data = Vec::new();
        data.try_reserve_exact(words)
            .map_err(|_| Error::AllocationFailed)?;
        data.resize(words, 0);

        Ok(Self {
            width,
            height,
            wpl,
            data,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.wpl
    }

    /// Get the packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = y as usize * self.wpl as usize;
        &self.data[start..start + self.wpl as usize]
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; an out-of-range `x` reads padding or the
    /// next row.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> bool {
        get_data_bit(self.row_data(y), x)
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, black: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_pixel_unchecked(x, y, black);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, black: bool) {
        let start = y as usize * self.wpl as usize;
        let line = &mut self.data[start..start + self.wpl as usize];
        set_data_bit(line, x, black);
    }

    /// Paint the part of `rect` that lies inside the image.
    pub fn fill_rect(&mut self, rect: &Box, black: bool) {
        let x1 = rect.x.max(0);
        let y1 = rect.y.max(0);
        let x2 = rect.right().min(self.width as i32);
        let y2 = rect.bottom().min(self.height as i32);
        for y in y1..y2 {
            for x in x1..x2 {
                self.set_pixel_unchecked(x as u32, y as u32, black);
            }
        }
    }

    /// Count the black pixels.
    pub fn count_black(&self) -> u64 {
        (0..self.height)
            .map(|y| {
                let line = self.row_data(y);
                let full = (self.width / 32) as usize;
                let mut count: u64 = line[..full].iter().map(|w| w.count_ones() as u64).sum();
                let tail = self.width % 32;
                if tail != 0 {
                    let mask = !0u32 << (32 - tail);
                    count += (line[full] & mask).count_ones() as u64;
                }
                count
            })
            .sum()
    }
}

impl Raster for BitImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        self.get_pixel_unchecked(x, y)
    }
}

/// Get a 1-bit pixel value.
///
/// Pixels are packed MSB to LSB within each 32-bit word.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> bool {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1 == 1
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, black: bool) {
    let mask = 0x8000_0000u32 >> (x & 31);
    let word = &mut line[(x >> 5) as usize];
    if black {
        *word |= mask;
    } else {
        *word &= !mask;
    }
}
