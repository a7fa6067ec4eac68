//! Box - Rectangle regions
//!
//! Axis-aligned rectangles in pixel coordinates. A box covers the pixel
//! columns `x..x + w` and rows `y..y + h`; [`Box::x2`] and [`Box::y2`] give
//! the last covered column and row, so a box built from a single pixel has
//! `w == h == 1`.

use crate::error::{Error, Result};

/// A rectangle region
///
/// This is a simple `Copy` type since it's small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box from its first and last covered pixel, both inclusive.
    ///
    /// The corners may be given in any order.
    pub fn from_extent(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (left, right) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (top, bottom) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self {
            x: left,
            y: top,
            w: right - left + 1,
            h: bottom - top + 1,
        }
    }

    /// Single-row box covering columns `x1..=x2` of `row`.
    #[inline]
    pub fn from_span(row: i32, x1: i32, x2: i32) -> Self {
        Self::from_extent(x1, row, x2, row)
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Last covered column (inclusive)
    #[inline]
    pub fn x2(&self) -> i32 {
        self.right() - 1
    }

    /// Last covered row (inclusive)
    #[inline]
    pub fn y2(&self) -> i32 {
        self.bottom() - 1
    }

    /// Get the center as floating-point coordinates.
    ///
    /// The center of a box spanning columns `x..=x2` is `(x + x2) / 2`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x as f64 + self.x2() as f64) / 2.0,
            (self.y as f64 + self.y2() as f64) / 2.0,
        )
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this box contains another box
    ///
    /// Shared edges count as contained.
    pub fn contains_box(&self, other: &Box) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this box overlaps with another
    ///
    /// Boxes sharing a single pixel column or row overlap.
    pub fn overlaps(&self, other: &Box) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the union (bounding box) of two boxes
    pub fn union(&self, other: &Box) -> Box {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Box {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }

    /// Grow the box so that it also covers columns `x1..=x2` of `row`.
    pub fn include_span(&mut self, row: i32, x1: i32, x2: i32) {
        *self = self.union(&Box::from_span(row, x1, x2));
    }

    /// Translate the box by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Box {
        Box {
            x: self.x + dx,
            y: self.y + dy,
            w: self.w,
            h: self.h,
        }
    }

    /// Expand the box by a margin on all sides
    pub fn expand(&self, margin: i32) -> Box {
        Box {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2 * margin,
            h: self.h + 2 * margin,
        }
    }
}
