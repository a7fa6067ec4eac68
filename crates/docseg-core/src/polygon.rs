//! Polygon - closed outlines of page regions
//!
//! A polygon is an ordered list of integer vertices; the last vertex is
//! implicitly joined to the first. Membership follows the even-odd rule.
//! Integer points lying exactly on an edge are detected separately so the
//! caller decides whether the contour belongs to the region.

use crate::box_::Box;
use crate::error::{Error, Result};
use crate::traits::Outline;

/// Closed polygon with integer vertices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    points: Vec<(i32, i32)>,
}

impl Polygon {
    /// Create a new empty polygon.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polygon from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if fewer than three vertices are
    /// given.
    pub fn from_points(points: Vec<(i32, i32)>) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::InvalidParameter(format!(
                "polygon needs at least 3 vertices, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Axis-aligned rectangle covering `b`, as a four-vertex polygon.
    pub fn from_box(b: &Box) -> Self {
        Self {
            points: vec![(b.x, b.y), (b.x2(), b.y), (b.x2(), b.y2()), (b.x, b.y2())],
        }
    }

    /// Get the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a vertex.
    pub fn push(&mut self, x: i32, y: i32) {
        self.points.push((x, y));
    }

    /// Get all vertices as a slice.
    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    /// Compute the bounding box, or `None` if empty.
    pub fn bounding_box(&self) -> Option<Box> {
        let (&(fx, fy), rest) = self.points.split_first()?;
        let (mut x1, mut y1, mut x2, mut y2) = (fx, fy, fx, fy);
        for &(x, y) in rest {
            x1 = x1.min(x);
            y1 = y1.min(y);
            x2 = x2.max(x);
            y2 = y2.max(y);
        }
        Some(Box::from_extent(x1, y1, x2, y2))
    }

    /// Iterate over the closing edges `(p[i], p[i+1])`, wrapping around.
    fn edges(&self) -> impl Iterator<Item = ((i32, i32), (i32, i32))> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Whether (x, y) lies exactly on one of the edges.
    pub fn is_on_contour(&self, x: i32, y: i32) -> bool {
        self.edges().any(|((x0, y0), (x1, y1))| {
            let (x, y) = (x as i64, y as i64);
            let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
            let cross = (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0);
            cross == 0 && x >= x0.min(x1) && x <= x0.max(x1) && y >= y0.min(y1) && y <= y0.max(y1)
        })
    }
}

impl Outline for Polygon {
    fn is_point_inside(&self, x: i32, y: i32, include_contour: bool) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        if self.is_on_contour(x, y) {
            return include_contour;
        }

        // Even-odd rule: count crossings of a ray cast towards +x
        let (px, py) = (x as f64, y as f64);
        let mut inside = false;
        for ((x0, y0), (x1, y1)) in self.edges() {
            let (x0, y0, x1, y1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);
            if (y0 > py) != (y1 > py) {
                let xc = x0 + (py - y0) * (x1 - x0) / (y1 - y0);
                if px < xc {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl FromIterator<(i32, i32)> for Polygon {
    fn from_iter<T: IntoIterator<Item = (i32, i32)>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
