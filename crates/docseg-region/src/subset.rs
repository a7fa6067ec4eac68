//! Component subsets
//!
//! Subsets are independent collections: every selected component is deep
//! copied, so later changes to either collection never affect the other.

use crate::collection::ComponentCollection;
use crate::component::ComponentView;
use crate::error::RegionResult;
use docseg_core::Outline;

impl ComponentCollection {
    /// Copy the components lying in `outline` into a new collection.
    ///
    /// Both endpoints of every run are tested with the outline contour
    /// counting as inside. With `require_fully_inside` every endpoint must be
    /// inside, otherwise one is enough. Components whose bounding-box area
    /// is below `min_area` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::AllocationFailure`](crate::RegionError::AllocationFailure)
    /// if the subset cannot be stored.
    pub fn create_subset<O: Outline + ?Sized>(
        &self,
        outline: &O,
        min_area: u64,
        require_fully_inside: bool,
    ) -> RegionResult<ComponentCollection> {
        let mut subset = ComponentCollection::new();
        for cc in self.iter() {
            if cc.is_empty() || cc.area() < min_area {
                continue;
            }
            let mut endpoints = cc.runs().flat_map(|r| [(r.x1(), r.row()), (r.x2(), r.row())]);
            let selected = if require_fully_inside {
                endpoints.all(|(x, y)| outline.is_point_inside(x, y, true))
            } else {
                endpoints.any(|(x, y)| outline.is_point_inside(x, y, true))
            };
            if selected {
                subset.insert_clone(&cc)?;
            }
        }
        Ok(subset)
    }

    /// Copy the components lying entirely on black pixels of `parent`.
    ///
    /// This collection's coordinates are shifted by `(offset_x, offset_y)`
    /// into the parent's frame, e.g. when it was extracted from a crop.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::AllocationFailure`](crate::RegionError::AllocationFailure)
    /// if the subset cannot be stored.
    pub fn create_subset_inside(
        &self,
        parent: &ComponentView<'_>,
        offset_x: i32,
        offset_y: i32,
    ) -> RegionResult<ComponentCollection> {
        let mut subset = ComponentCollection::new();
        if parent.is_empty() {
            return Ok(subset);
        }
        let frame = parent.bounds();
        for cc in self.iter() {
            if cc.is_empty() || !frame.contains_box(&cc.bounds().translate(offset_x, offset_y)) {
                continue;
            }
            let inside = cc.runs().all(|r| {
                let y = r.row() + offset_y;
                (r.x1()..=r.x2()).all(|x| parent.is_point_inside(x + offset_x, y))
            });
            if inside {
                subset.insert_clone(&cc)?;
            }
        }
        Ok(subset)
    }
}
