//! Horizontal pixel runs
//!
//! A run is a maximal span of black pixels on one row. Runs live in the run
//! arena of a [`ComponentCollection`](crate::ComponentCollection) and are
//! addressed by [`RunIndex`]; each one records the component that owns it.

use crate::component::ComponentId;
use crate::conncomp::ConnectivityType;

/// Position of a run in its collection's run arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunIndex(pub(crate) usize);

impl RunIndex {
    /// Arena slot of the run.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Span of black pixels `x1..=x2` on row `row`.
///
/// Equality compares coordinates only, never the owner.
#[derive(Debug, Clone, Copy)]
pub struct Run {
    row: i32,
    x1: i32,
    x2: i32,
    owner: ComponentId,
}

impl Run {
    pub(crate) fn new(row: i32, x1: i32, x2: i32, owner: ComponentId) -> Self {
        debug_assert!(x1 <= x2, "run ({row}, {x1}, {x2}) is reversed");
        Self { row, x1, x2, owner }
    }

    /// Row of the run.
    #[inline]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// First black column.
    #[inline]
    pub fn x1(&self) -> i32 {
        self.x1
    }

    /// Last black column.
    #[inline]
    pub fn x2(&self) -> i32 {
        self.x2
    }

    /// Number of pixels in the run.
    #[inline]
    pub fn len(&self) -> u32 {
        (self.x2 - self.x1 + 1) as u32
    }

    /// Runs always cover at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Component owning this run.
    #[inline]
    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: ComponentId) {
        self.owner = owner;
    }

    /// Whether the pixel (x, y) belongs to the run.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        y == self.row && x >= self.x1 && x <= self.x2
    }

    /// Whether `self` connects to `above`, a run on the preceding row.
    ///
    /// Only columns are compared; owners play no part.
    #[inline]
    pub fn is_adjacent(&self, above: &Run, connectivity: ConnectivityType) -> bool {
        above.row + 1 == self.row
            && connectivity.spans_touch(above.x1, above.x2, self.x1, self.x2)
    }
}

impl PartialEq for Run {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.x1 == other.x1 && self.x2 == other.x2
    }
}

impl Eq for Run {}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(row: i32, x1: i32, x2: i32) -> Run {
        Run::new(row, x1, x2, ComponentId(0))
    }

    #[test]
    fn test_run_accessors() {
        let r = run(3, 4, 9);
        assert_eq!(r.row(), 3);
        assert_eq!(r.len(), 6);
        assert!(r.contains(4, 3));
        assert!(r.contains(9, 3));
        assert!(!r.contains(10, 3));
        assert!(!r.contains(5, 2));
    }

    #[test]
    fn test_adjacency_four_way() {
        let above = run(0, 2, 4);
        assert!(run(1, 4, 6).is_adjacent(&above, ConnectivityType::FourWay));
        assert!(!run(1, 5, 6).is_adjacent(&above, ConnectivityType::FourWay));
        assert!(!run(1, 0, 1).is_adjacent(&above, ConnectivityType::FourWay));
        // Not on the next row
        assert!(!run(2, 2, 4).is_adjacent(&above, ConnectivityType::FourWay));
    }

    #[test]
    fn test_adjacency_eight_way() {
        let above = run(0, 2, 4);
        assert!(run(1, 5, 6).is_adjacent(&above, ConnectivityType::EightWay));
        assert!(run(1, 0, 1).is_adjacent(&above, ConnectivityType::EightWay));
        assert!(!run(1, 6, 7).is_adjacent(&above, ConnectivityType::EightWay));
    }

    #[test]
    fn test_coordinate_equality() {
        let a = Run::new(1, 2, 3, ComponentId(0));
        let b = Run::new(1, 2, 3, ComponentId(7));
        assert_eq!(a, b);
        assert_ne!(a, Run::new(1, 2, 4, ComponentId(0)));
    }
}
