//! Connected components
//!
//! A [`ConnectedComponent`] is a set of runs (stored as indices into the
//! owning collection's run arena) together with a cached bounding box that is
//! kept equal to the union of the runs' extents. Operations that need the
//! run coordinates themselves go through [`ComponentView`], which pairs a
//! component with the arena it indexes.

use crate::run::{Run, RunIndex};
use docseg_core::{Box, Raster};
use std::fmt;
use std::ops::Deref;

/// Stable identity of a component within one collection.
///
/// IDs are never reused: once a component is merged away or deleted its ID
/// stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    /// Slot of the component in its collection.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A neighbour found by the nearest-neighbour pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// The neighbouring component
    pub id: ComponentId,
    /// Euclidean distance between the two bounding-box centres
    pub distance: f64,
}

/// A connected set of black pixels, stored as runs.
#[derive(Debug, Clone)]
pub struct ConnectedComponent {
    id: ComponentId,
    runs: Vec<RunIndex>,
    bounds: Box,
    neighbours: Vec<Neighbour>,
}

impl ConnectedComponent {
    pub(crate) fn new(id: ComponentId) -> Self {
        Self {
            id,
            runs: Vec::new(),
            bounds: Box::default(),
            neighbours: Vec::new(),
        }
    }

    /// Identity of the component.
    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Arena indices of the runs, in no particular order.
    #[inline]
    pub fn run_indices(&self) -> &[RunIndex] {
        &self.runs
    }

    /// Number of runs.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Whether the component holds no runs yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Bounding box; zero-sized while the component is empty.
    #[inline]
    pub fn bounds(&self) -> Box {
        self.bounds
    }

    /// Width of the bounding box.
    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.w as u32
    }

    /// Height of the bounding box.
    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.h as u32
    }

    /// Bounding-box area `(x2 - x1 + 1) * (y2 - y1 + 1)`.
    ///
    /// This is not the number of black pixels; see
    /// [`ComponentView::pixel_count`] for that.
    #[inline]
    pub fn area(&self) -> u64 {
        self.bounds.area() as u64
    }

    /// `floor(sqrt(area))`, a scale-normalized magnitude for histograms.
    pub fn size(&self) -> u32 {
        let area = self.area();
        let mut s = (area as f64).sqrt() as u64;
        while s * s > area {
            s -= 1;
        }
        while (s + 1) * (s + 1) <= area {
            s += 1;
        }
        s as u32
    }

    /// Centre of the bounding box.
    #[inline]
    pub fn centroid(&self) -> (f64, f64) {
        self.bounds.center()
    }

    /// Whether the bounding box lies within `rect` (edges inclusive).
    pub fn is_inside_rect(&self, rect: &Box) -> bool {
        !self.is_empty() && rect.contains_box(&self.bounds)
    }

    /// Whether the bounding box shares at least one pixel with `rect`.
    pub fn is_touching_rect(&self, rect: &Box) -> bool {
        !self.is_empty() && self.bounds.overlaps(rect)
    }

    /// Neighbours from the last nearest-neighbour pass, nearest first.
    ///
    /// Empty if no pass ran since the collection last changed.
    #[inline]
    pub fn neighbours(&self) -> &[Neighbour] {
        &self.neighbours
    }

    /// Record a run and grow the bounding box over it.
    pub(crate) fn push_run(&mut self, index: RunIndex, row: i32, x1: i32, x2: i32) {
        if self.runs.is_empty() {
            self.bounds = Box::from_span(row, x1, x2);
        } else {
            self.bounds.include_span(row, x1, x2);
        }
        self.runs.push(index);
    }

    /// Take over the runs of `other`. Capacity must already be reserved.
    pub(crate) fn absorb(&mut self, other: ConnectedComponent) {
        if other.is_empty() {
            return;
        }
        self.bounds = if self.is_empty() {
            other.bounds
        } else {
            self.bounds.union(&other.bounds)
        };
        self.runs.extend(other.runs);
    }

    pub(crate) fn runs_mut(&mut self) -> &mut Vec<RunIndex> {
        &mut self.runs
    }

    pub(crate) fn set_neighbours(&mut self, neighbours: Vec<Neighbour>) {
        self.neighbours = neighbours;
    }

    pub(crate) fn clear_neighbours(&mut self) {
        self.neighbours.clear();
    }
}

/// A component together with the run arena it indexes.
///
/// Dereferences to [`ConnectedComponent`] for the bounding-box queries.
#[derive(Debug, Clone, Copy)]
pub struct ComponentView<'a> {
    component: &'a ConnectedComponent,
    arena: &'a [Run],
}

impl<'a> ComponentView<'a> {
    pub(crate) fn new(component: &'a ConnectedComponent, arena: &'a [Run]) -> Self {
        Self { component, arena }
    }

    /// The underlying component.
    #[inline]
    pub fn component(&self) -> &'a ConnectedComponent {
        self.component
    }

    /// The component's runs.
    pub fn runs(&self) -> impl Iterator<Item = &'a Run> + 'a {
        let arena = self.arena;
        self.component.runs.iter().map(move |r| &arena[r.0])
    }

    /// Whether (x, y) is a black pixel of this component.
    ///
    /// Tests the actual runs, not just the bounding box.
    pub fn is_point_inside(&self, x: i32, y: i32) -> bool {
        if !self.component.bounds.contains_point(x, y) {
            return false;
        }
        self.runs().any(|r| r.contains(x, y))
    }

    /// Number of black pixels (sum of run lengths).
    pub fn pixel_count(&self) -> u64 {
        self.runs().map(|r| r.len() as u64).sum()
    }

    /// Count the black pixels in the one-pixel frame just outside the
    /// bounding box.
    ///
    /// Frame pixels outside the raster count as black when `border_value`
    /// is set.
    pub fn count_halo_pixels<R: Raster + ?Sized>(&self, raster: &R, border_value: bool) -> u32 {
        if self.component.is_empty() {
            return 0;
        }
        let frame = self.component.bounds.expand(1);
        let (left, top, right, bottom) = (frame.x, frame.y, frame.x2(), frame.y2());

        let mut count = 0;
        for x in left..=right {
            count += raster.is_black_bordered(x, top, border_value) as u32;
            count += raster.is_black_bordered(x, bottom, border_value) as u32;
        }
        for y in top + 1..bottom {
            count += raster.is_black_bordered(left, y, border_value) as u32;
            count += raster.is_black_bordered(right, y, border_value) as u32;
        }
        count
    }
}

impl Deref for ComponentView<'_> {
    type Target = ConnectedComponent;

    fn deref(&self) -> &Self::Target {
        self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a component plus arena from `(row, x1, x2)` spans.
    fn build(spans: &[(i32, i32, i32)]) -> (ConnectedComponent, Vec<Run>) {
        let id = ComponentId(0);
        let mut cc = ConnectedComponent::new(id);
        let mut arena = Vec::new();
        for &(row, x1, x2) in spans {
            cc.push_run(RunIndex(arena.len()), row, x1, x2);
            arena.push(Run::new(row, x1, x2, id));
        }
        (cc, arena)
    }

    #[test]
    fn test_bounds_follow_runs() {
        let (cc, _) = build(&[(2, 5, 8), (3, 1, 6), (4, 7, 9)]);
        assert_eq!(cc.bounds(), Box::from_extent(1, 2, 9, 4));
        assert_eq!(cc.width(), 9);
        assert_eq!(cc.height(), 3);
        assert_eq!(cc.area(), 27);
        assert_eq!(cc.size(), 5);
    }

    #[test]
    fn test_first_run_sets_single_row_box() {
        let (cc, _) = build(&[(7, 3, 3)]);
        assert_eq!(cc.bounds(), Box::new_unchecked(3, 7, 1, 1));
        assert_eq!(cc.area(), 1);
        assert_eq!(cc.size(), 1);
    }

    #[test]
    fn test_size_is_floor_sqrt() {
        let (cc, _) = build(&[(0, 0, 3), (1, 0, 3), (2, 0, 3), (3, 0, 3)]);
        assert_eq!(cc.size(), 4);
        let (cc, _) = build(&[(0, 0, 4), (1, 0, 4), (2, 0, 4)]);
        assert_eq!(cc.size(), 3); // sqrt(15)
    }

    #[test]
    fn test_empty_component() {
        let cc = ConnectedComponent::new(ComponentId(1));
        assert!(cc.is_empty());
        assert_eq!(cc.area(), 0);
        assert_eq!(cc.size(), 0);
        assert!(!cc.is_touching_rect(&Box::from_extent(0, 0, 10, 10)));
        assert!(!cc.is_inside_rect(&Box::from_extent(0, 0, 10, 10)));
    }

    #[test]
    fn test_rect_predicates_closed() {
        let (cc, _) = build(&[(2, 2, 5), (3, 2, 5)]);
        assert!(cc.is_inside_rect(&Box::from_extent(2, 2, 5, 3)));
        assert!(!cc.is_inside_rect(&Box::from_extent(3, 2, 5, 3)));
        assert!(cc.is_touching_rect(&Box::from_extent(5, 3, 9, 9)));
        assert!(!cc.is_touching_rect(&Box::from_extent(6, 0, 9, 9)));
    }

    #[test]
    fn test_point_inside_uses_runs() {
        // L shape: the bounding box corner (4, 1) is white
        let (cc, arena) = build(&[(0, 0, 0), (1, 0, 4)]);
        let view = ComponentView::new(&cc, &arena);
        assert!(view.is_point_inside(0, 0));
        assert!(view.is_point_inside(4, 1));
        assert!(!view.is_point_inside(4, 0));
        assert!(!view.is_point_inside(9, 9));
        assert_eq!(view.pixel_count(), 6);
        assert_eq!(view.area(), 10);
    }

    #[test]
    fn test_absorb_unions_bounds() {
        let (mut a, _) = build(&[(0, 0, 1)]);
        let (b, _) = build(&[(5, 6, 8)]);
        a.absorb(b);
        assert_eq!(a.run_count(), 2);
        assert_eq!(a.bounds(), Box::from_extent(0, 0, 8, 5));

        let mut empty = ConnectedComponent::new(ComponentId(2));
        empty.absorb(a.clone());
        assert_eq!(empty.bounds(), a.bounds());
    }
}
