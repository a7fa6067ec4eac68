//! Component collections
//!
//! A [`ComponentCollection`] owns every run (in one arena) and every live
//! component. It is the only place where components are created, merged or
//! deleted, which keeps run ownership consistent:
//!
//! - every run reachable from a live component names that component as
//!   owner, and no run is reachable from two components
//! - a component's bounding box is the exact union of its runs
//! - merged-away and deleted components leave a tombstone; their IDs are
//!   never handed out again
//!
//! Neighbour lists produced by
//! [`find_k_nearest_neighbours`](ComponentCollection::find_k_nearest_neighbours)
//! are a snapshot: any structural change clears them.

use crate::component::{ComponentId, ComponentView, ConnectedComponent};
use crate::error::{RegionError, RegionResult, try_push};
use crate::run::{Run, RunIndex};
use docseg_core::Box;

/// Owner of a set of connected components and their runs.
///
/// # Examples
///
/// ```
/// use docseg_region::ComponentCollection;
///
/// let mut ccs = ComponentCollection::new();
/// let a = ccs.add_component_for_run(0, 0, 4).unwrap();
/// let b = ccs.add_component_for_run(1, 3, 6).unwrap();
/// ccs.merge(a, b).unwrap();
///
/// assert_eq!(ccs.len(), 1);
/// assert!(!ccs.is_live(b));
/// assert_eq!(ccs.component(a).unwrap().area(), 14);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentCollection {
    /// Run arena; slots of deleted components stay until `compact`
    runs: Vec<Run>,
    /// One slot per ID ever issued; `None` marks a tombstone
    slots: Vec<Option<ConnectedComponent>>,
    /// Live components in insertion order
    live: Vec<ComponentId>,
    /// One past the largest column seen
    width: u32,
    /// One past the largest row seen
    height: u32,
    /// Whether any component may hold neighbours
    has_neighbours: bool,
}

impl ComponentCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live components.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether there are no live components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Largest `x2 + 1` over all runs ever added.
    ///
    /// Only a sizing hint: deletions do not shrink it.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Largest `row + 1` over all runs ever added. Only a sizing hint.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of runs held by live components.
    pub fn run_count(&self) -> usize {
        self.iter().map(|cc| cc.run_count()).sum()
    }

    /// IDs of the live components in collection order.
    #[inline]
    pub fn ids(&self) -> &[ComponentId] {
        &self.live
    }

    /// Whether `id` names a live component.
    pub fn is_live(&self, id: ComponentId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Position of `id` in collection order.
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.live.iter().position(|&l| l == id)
    }

    /// Component at position `index`.
    pub fn get(&self, index: usize) -> Option<ComponentView<'_>> {
        self.live.get(index).and_then(|&id| self.component(id))
    }

    /// Component with identity `id`, unless it was merged away or deleted.
    pub fn component(&self, id: ComponentId) -> Option<ComponentView<'_>> {
        match self.slots.get(id.index()) {
            Some(Some(cc)) => Some(ComponentView::new(cc, &self.runs)),
            _ => None,
        }
    }

    /// Run stored at `index`.
    pub fn run(&self, index: RunIndex) -> Option<&Run> {
        self.runs.get(index.0)
    }

    /// Iterate over the live components in collection order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            collection: self,
            pos: 0,
        }
    }

    fn live_slot_mut(&mut self, id: ComponentId) -> RegionResult<&mut ConnectedComponent> {
        match self.slots.get_mut(id.index()) {
            Some(Some(cc)) => Ok(cc),
            _ => Err(RegionError::StaleComponent(id)),
        }
    }

    /// Forget every neighbour list; called on each structural change.
    fn invalidate_neighbours(&mut self) {
        if !self.has_neighbours {
            return;
        }
        for cc in self.slots.iter_mut().flatten() {
            cc.clear_neighbours();
        }
        self.has_neighbours = false;
    }

    pub(crate) fn mark_neighbours_set(&mut self) {
        self.has_neighbours = true;
    }

    pub(crate) fn slot_mut(&mut self, id: ComponentId) -> Option<&mut ConnectedComponent> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Reserve room for `additional` more runs.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::AllocationFailure`] if the arena cannot grow.
    pub fn reserve_runs(&mut self, additional: usize) -> RegionResult<()> {
        self.runs
            .try_reserve(additional)
            .map_err(|_| RegionError::AllocationFailure("run"))
    }

    /// Register a new, empty component.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::AllocationFailure`] if the component tables
    /// cannot grow.
    pub fn add_component(&mut self) -> RegionResult<ComponentId> {
        let raw = u32::try_from(self.slots.len())
            .map_err(|_| RegionError::AllocationFailure("component"))?;
        let id = ComponentId(raw);
        self.live
            .try_reserve(1)
            .map_err(|_| RegionError::AllocationFailure("component"))?;
        try_push(
            &mut self.slots,
            Some(ConnectedComponent::new(id)),
            "component",
        )?;
        self.live.push(id);
        self.invalidate_neighbours();
        Ok(id)
    }

    /// Register a new component holding the single run `(row, x1, x2)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] for a reversed or negative
    /// span and [`RegionError::AllocationFailure`] if storage cannot grow.
    pub fn add_component_for_run(&mut self, row: i32, x1: i32, x2: i32) -> RegionResult<ComponentId> {
        validate_span(row, x1, x2)?;
        self.reserve_runs(1)?;
        let id = self.add_component()?;
        self.add_run(id, row, x1, x2)?;
        Ok(id)
    }

    /// Append the run `(row, x1, x2)` to component `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::StaleComponent`] if `id` is not live,
    /// [`RegionError::InvalidParameters`] for a reversed or negative span and
    /// [`RegionError::AllocationFailure`] if storage cannot grow; the
    /// collection is unchanged on error.
    pub fn add_run(&mut self, id: ComponentId, row: i32, x1: i32, x2: i32) -> RegionResult<RunIndex> {
        validate_span(row, x1, x2)?;
        self.reserve_runs(1)?;
        let index = RunIndex(self.runs.len());
        {
            let cc = self.live_slot_mut(id)?;
            cc.runs_mut()
                .try_reserve(1)
                .map_err(|_| RegionError::AllocationFailure("run"))?;
            cc.push_run(index, row, x1, x2);
        }
        self.runs.push(Run::new(row, x1, x2, id));
        self.width = self.width.max(x2 as u32 + 1);
        self.height = self.height.max(row as u32 + 1);
        self.invalidate_neighbours();
        Ok(index)
    }

    /// Move every run of `other` into `survivor` and tombstone `other`.
    ///
    /// Run owners are updated in the same call, so no run ever names a dead
    /// component.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if both IDs are the same,
    /// [`RegionError::StaleComponent`] if either is not live, and
    /// [`RegionError::AllocationFailure`] if `survivor` cannot grow; the
    /// collection is unchanged on error.
    pub fn merge(&mut self, survivor: ComponentId, other: ComponentId) -> RegionResult<()> {
        if survivor == other {
            return Err(RegionError::InvalidParameters(format!(
                "cannot merge component {survivor} into itself"
            )));
        }
        if !self.is_live(other) {
            return Err(RegionError::StaleComponent(other));
        }
        let moved = self.slots[other.index()]
            .as_ref()
            .map_or(0, ConnectedComponent::run_count);
        self.live_slot_mut(survivor)?
            .runs_mut()
            .try_reserve(moved)
            .map_err(|_| RegionError::AllocationFailure("run"))?;

        let Some(absorbed) = self.slots[other.index()].take() else {
            return Err(RegionError::StaleComponent(other));
        };
        for &r in absorbed.run_indices() {
            self.runs[r.0].set_owner(survivor);
        }
        if let Some(cc) = self.slot_mut(survivor) {
            cc.absorb(absorbed);
        }
        self.live.retain(|&id| id != other);
        self.invalidate_neighbours();
        Ok(())
    }

    /// Delete component `id`.
    ///
    /// Its runs become unreachable; [`compact`](Self::compact) reclaims
    /// their arena slots.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::StaleComponent`] if `id` is not live.
    pub fn delete_component(&mut self, id: ComponentId) -> RegionResult<()> {
        match self.slots.get_mut(id.index()) {
            Some(slot @ Some(_)) => *slot = None,
            _ => return Err(RegionError::StaleComponent(id)),
        }
        self.live.retain(|&l| l != id);
        self.invalidate_neighbours();
        Ok(())
    }

    /// Delete the component at position `index` and return its ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Core`] with an index error if `index` is out of
    /// range.
    pub fn delete_at(&mut self, index: usize) -> RegionResult<ComponentId> {
        let id = *self
            .live
            .get(index)
            .ok_or(docseg_core::Error::IndexOutOfBounds {
                index,
                len: self.live.len(),
            })?;
        self.delete_component(id)?;
        Ok(id)
    }

    /// Delete every component whose bounding-box area is below `min_area`.
    ///
    /// Returns the number of deleted components.
    pub fn remove_small(&mut self, min_area: u64) -> usize {
        let small: Vec<ComponentId> = self
            .iter()
            .filter(|cc| cc.area() < min_area)
            .map(|cc| cc.id())
            .collect();
        for &id in &small {
            self.slots[id.index()] = None;
        }
        if !small.is_empty() {
            self.live.retain(|id| self.slots[id.index()].is_some());
            self.invalidate_neighbours();
        }
        small.len()
    }

    /// Drop the runs of deleted components from the arena.
    ///
    /// Run indices change; component IDs do not.
    pub fn compact(&mut self) {
        let mut runs = Vec::with_capacity(self.run_count());
        for &id in &self.live {
            if let Some(cc) = self.slots[id.index()].as_mut() {
                for r in cc.runs_mut().iter_mut() {
                    let new_index = RunIndex(runs.len());
                    runs.push(self.runs[r.0]);
                    *r = new_index;
                }
            }
        }
        self.runs = runs;
    }

    /// Deep-copy a component (possibly from another collection) into this
    /// one under a fresh ID. Neighbours are not copied.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::AllocationFailure`] if storage cannot grow;
    /// nothing is added in that case.
    pub fn insert_clone(&mut self, source: &ComponentView<'_>) -> RegionResult<ComponentId> {
        let count = source.run_count();
        self.reserve_runs(count)?;
        let id = self.add_component()?;
        let base = self.runs.len();
        {
            let cc = self.live_slot_mut(id)?;
            cc.runs_mut()
                .try_reserve_exact(count)
                .map_err(|_| RegionError::AllocationFailure("run"))?;
            for (i, r) in source.runs().enumerate() {
                cc.push_run(RunIndex(base + i), r.row(), r.x1(), r.x2());
            }
        }
        for r in source.runs() {
            self.runs.push(Run::new(r.row(), r.x1(), r.x2(), id));
        }
        if !source.is_empty() {
            let b = source.bounds();
            self.width = self.width.max(b.right() as u32);
            self.height = self.height.max(b.bottom() as u32);
        }
        Ok(id)
    }

    /// Verify run ownership and bounding boxes.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvariantViolation`] describing the first
    /// inconsistency found.
    pub fn check_invariants(&self) -> RegionResult<()> {
        let violation = |msg: String| Err(RegionError::InvariantViolation(msg));

        let tombstones = self.slots.iter().filter(|s| s.is_none()).count();
        if self.slots.len() - tombstones != self.live.len() {
            return violation(format!(
                "{} occupied slots but {} live components",
                self.slots.len() - tombstones,
                self.live.len()
            ));
        }

        let mut claimed: Vec<Option<ComponentId>> = vec![None; self.runs.len()];
        for &id in &self.live {
            let Some(cc) = self.component(id) else {
                return violation(format!("live component {id} has no slot"));
            };
            if cc.id() != id {
                return violation(format!("slot {id} holds component {}", cc.id()));
            }
            let mut union: Option<Box> = None;
            for &r in cc.run_indices() {
                let Some(run) = self.runs.get(r.0) else {
                    return violation(format!("component {id} refers to missing run {}", r.0));
                };
                if run.owner() != id {
                    return violation(format!(
                        "run {} is held by {id} but owned by {}",
                        r.0,
                        run.owner()
                    ));
                }
                if let Some(other) = claimed[r.0].replace(id) {
                    return violation(format!("run {} is claimed by {other} and {id}", r.0));
                }
                let span = Box::from_span(run.row(), run.x1(), run.x2());
                union = Some(union.map_or(span, |u| u.union(&span)));
            }
            match union {
                Some(u) if u != cc.bounds() => {
                    return violation(format!(
                        "component {id} caches bounds {:?} but its runs span {:?}",
                        cc.bounds(),
                        u
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn validate_span(row: i32, x1: i32, x2: i32) -> RegionResult<()> {
    if row < 0 || x1 < 0 || x1 > x2 {
        return Err(RegionError::InvalidParameters(format!(
            "invalid run: row={row}, x1={x1}, x2={x2}"
        )));
    }
    Ok(())
}

/// Iterator over the live components of a collection.
pub struct Iter<'a> {
    collection: &'a ComponentCollection,
    pos: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = ComponentView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.collection.get(self.pos)?;
        self.pos += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.collection.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ComponentCollection {
    type Item = ComponentView<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_component_for_run() {
        let mut ccs = ComponentCollection::new();
        let id = ccs.add_component_for_run(3, 2, 7).unwrap();
        assert_eq!(ccs.len(), 1);
        assert_eq!(ccs.width(), 8);
        assert_eq!(ccs.height(), 4);
        let cc = ccs.component(id).unwrap();
        assert_eq!(cc.bounds(), Box::from_extent(2, 3, 7, 3));
        assert_eq!(cc.run_count(), 1);
        ccs.check_invariants().unwrap();
    }

    #[test]
    fn test_add_run_rejects_bad_spans_and_stale_ids() {
        let mut ccs = ComponentCollection::new();
        let id = ccs.add_component().unwrap();
        assert!(matches!(
            ccs.add_run(id, 0, 5, 4),
            Err(RegionError::InvalidParameters(_))
        ));
        assert!(matches!(
            ccs.add_run(id, -1, 0, 4),
            Err(RegionError::InvalidParameters(_))
        ));
        ccs.delete_component(id).unwrap();
        assert!(matches!(
            ccs.add_run(id, 0, 0, 4),
            Err(RegionError::StaleComponent(_))
        ));
        assert_eq!(ccs.runs.len(), 0);
    }

    #[test]
    fn test_merge_reparents_runs() {
        let mut ccs = ComponentCollection::new();
        let a = ccs.add_component_for_run(0, 0, 1).unwrap();
        let b = ccs.add_component_for_run(0, 5, 6).unwrap();
        ccs.add_run(b, 1, 4, 9).unwrap();

        ccs.merge(a, b).unwrap();
        assert_eq!(ccs.len(), 1);
        assert!(!ccs.is_live(b));
        let cc = ccs.component(a).unwrap();
        assert_eq!(cc.run_count(), 3);
        assert_eq!(cc.bounds(), Box::from_extent(0, 0, 9, 1));
        assert!(cc.runs().all(|r| r.owner() == a));
        ccs.check_invariants().unwrap();

        assert!(matches!(ccs.merge(a, b), Err(RegionError::StaleComponent(_))));
        assert!(matches!(ccs.merge(a, a), Err(RegionError::InvalidParameters(_))));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut ccs = ComponentCollection::new();
        let a = ccs.add_component_for_run(0, 0, 0).unwrap();
        ccs.delete_component(a).unwrap();
        let b = ccs.add_component_for_run(0, 0, 0).unwrap();
        assert_ne!(a, b);
        assert!(ccs.component(a).is_none());
        assert!(matches!(
            ccs.delete_component(a),
            Err(RegionError::StaleComponent(_))
        ));
    }

    #[test]
    fn test_delete_at_and_order() {
        let mut ccs = ComponentCollection::new();
        let ids: Vec<ComponentId> = (0..4)
            .map(|i| ccs.add_component_for_run(i, 0, i).unwrap())
            .collect();
        assert_eq!(ccs.delete_at(1).unwrap(), ids[1]);
        assert_eq!(ccs.ids(), &[ids[0], ids[2], ids[3]]);
        assert_eq!(ccs.index_of(ids[3]), Some(2));
        assert!(ccs.delete_at(3).is_err());
        let rows: Vec<i32> = ccs.iter().map(|cc| cc.bounds().y).collect();
        assert_eq!(rows, vec![0, 2, 3]);
    }

    #[test]
    fn test_remove_small_and_compact() {
        let mut ccs = ComponentCollection::new();
        let big = ccs.add_component_for_run(0, 0, 9).unwrap();
        ccs.add_run(big, 1, 0, 9).unwrap();
        let small = ccs.add_component_for_run(5, 0, 1).unwrap();
        assert_eq!(ccs.remove_small(10), 1);
        assert!(!ccs.is_live(small));
        assert_eq!(ccs.runs.len(), 3);

        ccs.compact();
        assert_eq!(ccs.runs.len(), 2);
        assert_eq!(ccs.run_count(), 2);
        ccs.check_invariants().unwrap();
        assert_eq!(ccs.component(big).unwrap().area(), 20);
    }

    #[test]
    fn test_insert_clone_is_independent() {
        let mut src = ComponentCollection::new();
        let a = src.add_component_for_run(2, 1, 3).unwrap();
        src.add_run(a, 3, 2, 2).unwrap();

        let mut dst = ComponentCollection::new();
        let c = dst.insert_clone(&src.component(a).unwrap()).unwrap();
        src.delete_component(a).unwrap();

        let cc = dst.component(c).unwrap();
        assert_eq!(cc.bounds(), Box::from_extent(1, 2, 3, 3));
        assert_eq!(cc.pixel_count(), 4);
        assert_eq!(dst.width(), 4);
        assert_eq!(dst.height(), 4);
        dst.check_invariants().unwrap();
    }

    #[test]
    fn test_check_invariants_detects_foreign_owner() {
        let mut ccs = ComponentCollection::new();
        let a = ccs.add_component_for_run(0, 0, 0).unwrap();
        let b = ccs.add_component_for_run(2, 0, 0).unwrap();
        ccs.runs[0].set_owner(b);
        let err = ccs.check_invariants().unwrap_err();
        assert!(matches!(err, RegionError::InvariantViolation(_)));
        ccs.runs[0].set_owner(a);
        ccs.check_invariants().unwrap();
    }

    #[test]
    fn test_iter_len() {
        let mut ccs = ComponentCollection::new();
        for i in 0..3 {
            ccs.add_component_for_run(0, i * 3, i * 3).unwrap();
        }
        assert_eq!(ccs.iter().len(), 3);
        assert_eq!((&ccs).into_iter().count(), 3);
    }
}
