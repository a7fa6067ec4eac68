//! Connected component extraction
//!
//! Single-pass run-length labeling. Each row is split into runs of black
//! pixels, and every run is joined to the runs of the previous row it
//! touches. Provisional labels live in a disjoint-set forest, so merging two
//! components while scanning is O(1); the final run lists are materialized
//! into a [`ComponentCollection`] once the whole raster has been read.
//!
//! With [`ExtractOptions::min_area`] set, components are filtered while
//! scanning: as soon as a component can no longer grow (none of its runs
//! reached the current row) and its bounding box is smaller than the
//! threshold, it is dropped and its run storage is recycled.

use crate::collection::ComponentCollection;
use crate::error::{RegionError, RegionResult, try_push};
use crate::unionfind::{DisjointSet, Union};
use docseg_core::{Box, ProgressReporter, Raster, StopSignal};
use tracing::{debug, trace};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Whether span `x1..=x2` on one row touches span `px1..=px2` on the row
    /// directly above.
    #[inline]
    pub fn spans_touch(self, px1: i32, px2: i32, x1: i32, x2: i32) -> bool {
        let slack = self.slack();
        px1 <= x2 + slack && px2 + slack >= x1
    }

    /// Extra columns a diagonal neighbour may reach.
    #[inline]
    fn slack(self) -> i32 {
        match self {
            ConnectivityType::FourWay => 0,
            ConnectivityType::EightWay => 1,
        }
    }
}

/// Options for component extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    /// Pixel adjacency rule
    pub connectivity: ConnectivityType,
    /// Drop components whose bounding-box area is below this while scanning
    pub min_area: Option<u64>,
}

impl ExtractOptions {
    /// 4-connected extraction without filtering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the adjacency rule.
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Enable incremental noise filtering.
    pub fn with_min_area(mut self, min_area: u64) -> Self {
        self.min_area = Some(min_area);
        self
    }
}

/// Find all connected components of the black pixels in `raster`.
///
/// Components are ordered by the row-major position of their first pixel.
/// A raster with zero width or height yields an empty collection.
///
/// # Errors
///
/// Returns [`RegionError::InvalidInput`] if the raster is too large to be
/// addressed with `i32` coordinates and [`RegionError::AllocationFailure`]
/// if run or label storage cannot grow.
///
/// # Examples
///
/// ```
/// use docseg_region::{ConnectivityType, ExtractOptions, find_components};
/// use docseg_region::docseg_core::{BitImage, Box};
///
/// let mut img = BitImage::new(8, 8).unwrap();
/// img.fill_rect(&Box::new(1, 1, 2, 2).unwrap(), true);
/// img.set_pixel(3, 3, true).unwrap();
///
/// let ccs = find_components(&img, &ExtractOptions::new()).unwrap();
/// assert_eq!(ccs.len(), 2);
///
/// let options = ExtractOptions::new().with_connectivity(ConnectivityType::EightWay);
/// let ccs = find_components(&img, &options).unwrap();
/// assert_eq!(ccs.len(), 1);
/// ```
pub fn find_components<R: Raster + ?Sized>(
    raster: &R,
    options: &ExtractOptions,
) -> RegionResult<ComponentCollection> {
    Extractor::new(*options).extract(raster)
}

/// Component extraction with cancellation and progress reporting.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use docseg_region::{ExtractOptions, Extractor};
/// use docseg_region::docseg_core::BitImage;
///
/// let img = BitImage::new(16, 4).unwrap();
/// let stop = AtomicBool::new(false);
/// let mut last = 0;
/// let mut progress = |p: u32| last = p;
///
/// let ccs = Extractor::new(ExtractOptions::new())
///     .with_stop_signal(&stop)
///     .with_progress(&mut progress)
///     .extract(&img)
///     .unwrap();
/// assert!(ccs.is_empty());
/// assert_eq!(last, 100);
/// ```
pub struct Extractor<'a> {
    options: ExtractOptions,
    stop: Option<&'a dyn StopSignal>,
    progress: Option<&'a mut dyn ProgressReporter>,
}

impl<'a> Extractor<'a> {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            stop: None,
            progress: None,
        }
    }

    /// Poll `stop` once per row and abort when it is raised.
    pub fn with_stop_signal(mut self, stop: &'a dyn StopSignal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Report progress in percent once per row.
    pub fn with_progress(mut self, progress: &'a mut dyn ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Scan `raster` and build its component collection.
    ///
    /// # Errors
    ///
    /// As [`find_components`], plus [`RegionError::Cancelled`] when the stop
    /// signal was raised; no partial collection is returned in that case.
    pub fn extract<R: Raster + ?Sized>(mut self, raster: &R) -> RegionResult<ComponentCollection> {
        let width = raster.width();
        let height = raster.height();
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(RegionError::InvalidInput(format!(
                "raster {width}x{height} exceeds the addressable coordinate range"
            )));
        }
        if width == 0 || height == 0 {
            debug!(width, height, "empty raster, no components");
            return Ok(ComponentCollection::new());
        }

        let mut scan = Scan::new(self.options);
        for y in 0..height {
            if self.stop.is_some_and(|s| s.has_stop_signal()) {
                debug!(row = y, height, "component extraction cancelled");
                return Err(RegionError::Cancelled);
            }
            scan.scan_row(raster, y as i32)?;
            if let Some(progress) = self.progress.as_mut() {
                progress.set_progress(((u64::from(y) + 1) * 100 / u64::from(height)) as u32);
            }
        }
        scan.finish(height as i32)?;

        let collection = scan.materialize()?;
        debug_assert!(
            collection.check_invariants().is_ok(),
            "extraction produced an inconsistent collection"
        );
        Ok(collection)
    }
}

/// Marks the end of a run list.
const NIL: u32 = u32::MAX;

/// A run as stored during the scan.
#[derive(Debug, Clone, Copy)]
struct ScanRun {
    row: i32,
    x1: i32,
    x2: i32,
    /// Provisional label assigned when the run was found
    label: u32,
    /// Next run of the same set, or `NIL`
    next: u32,
}

/// Payload of a disjoint-set root.
#[derive(Debug, Clone, Copy)]
struct SetData {
    bounds: Box,
    /// Smallest label in the set; decides output order
    first: u32,
    head: u32,
    tail: u32,
    run_count: u32,
    /// Last row on which the set received a run
    active_row: i32,
    discarded: bool,
}

#[derive(Debug, Clone, Copy)]
enum RunState {
    OutsideRun,
    InsideRun { x_start: i32 },
}

struct Scan {
    connectivity: ConnectivityType,
    min_area: Option<u64>,
    sets: DisjointSet,
    data: Vec<SetData>,
    runs: Vec<ScanRun>,
    /// Recycled run slots of discarded sets
    free: Vec<u32>,
    prev_row: Vec<u32>,
    cur_row: Vec<u32>,
    /// Labels touched by the run being attached
    touching: Vec<u32>,
    discarded: usize,
}

impl Scan {
    fn new(options: ExtractOptions) -> Self {
        Self {
            connectivity: options.connectivity,
            min_area: options.min_area,
            sets: DisjointSet::new(),
            data: Vec::new(),
            runs: Vec::new(),
            free: Vec::new(),
            prev_row: Vec::new(),
            cur_row: Vec::new(),
            touching: Vec::new(),
            discarded: 0,
        }
    }

    /// Split row `y` into runs and attach each one.
    fn scan_row<R: Raster + ?Sized>(&mut self, raster: &R, y: i32) -> RegionResult<()> {
        let width = raster.width() as i32;
        let mut state = RunState::OutsideRun;
        // Runs of the previous row ending left of this one can be skipped
        let mut cursor = 0;

        for x in 0..width {
            let black = raster.is_black(x as u32, y as u32);
            state = match (state, black) {
                (RunState::OutsideRun, true) => RunState::InsideRun { x_start: x },
                (RunState::InsideRun { x_start }, false) => {
                    self.add_run(y, x_start, x - 1, &mut cursor)?;
                    RunState::OutsideRun
                }
                (s, _) => s,
            };
        }
        if let RunState::InsideRun { x_start } = state {
            self.add_run(y, x_start, width - 1, &mut cursor)?;
        }

        if self.min_area.is_some() {
            self.close_finished(y)?;
        }
        std::mem::swap(&mut self.prev_row, &mut self.cur_row);
        self.cur_row.clear();
        Ok(())
    }

    fn add_run(&mut self, y: i32, x1: i32, x2: i32, cursor: &mut usize) -> RegionResult<()> {
        let slack = self.connectivity.slack();
        while *cursor < self.prev_row.len()
            && self.runs[self.prev_row[*cursor] as usize].x2 + slack < x1
        {
            *cursor += 1;
        }

        self.touching.clear();
        for &slot in &self.prev_row[*cursor..] {
            let p = self.runs[slot as usize];
            if p.x1 > x2 + slack {
                break;
            }
            if self.connectivity.spans_touch(p.x1, p.x2, x1, x2) {
                self.touching.push(p.label);
            }
        }

        // Keep cur_row growth ahead of any label or slot allocation
        self.cur_row
            .try_reserve(1)
            .map_err(|_| RegionError::AllocationFailure("run"))?;

        let label = match self.touching.first() {
            Some(&l) => l,
            None => self.new_set(y, x1, x2)?,
        };
        let slot = self.alloc_run(ScanRun {
            row: y,
            x1,
            x2,
            label,
            next: NIL,
        })?;

        let root = self.sets.find(label);
        if self.touching.is_empty() {
            let d = &mut self.data[root as usize];
            d.head = slot;
            d.tail = slot;
            d.run_count = 1;
        } else {
            self.append(root, slot);
            for i in 1..self.touching.len() {
                let other = self.touching[i];
                if let Some(u) = self.sets.union(label, other) {
                    self.join(u);
                }
            }
        }
        self.cur_row.push(slot);
        Ok(())
    }

    fn new_set(&mut self, y: i32, x1: i32, x2: i32) -> RegionResult<u32> {
        self.data
            .try_reserve(1)
            .map_err(|_| RegionError::AllocationFailure("label"))?;
        let label = self.sets.make_set()?;
        self.data.push(SetData {
            bounds: Box::from_span(y, x1, x2),
            first: label,
            head: NIL,
            tail: NIL,
            run_count: 0,
            active_row: y,
            discarded: false,
        });
        Ok(label)
    }

    fn alloc_run(&mut self, run: ScanRun) -> RegionResult<u32> {
        if let Some(slot) = self.free.pop() {
            self.runs[slot as usize] = run;
            return Ok(slot);
        }
        let slot = u32::try_from(self.runs.len())
            .ok()
            .filter(|&s| s != NIL)
            .ok_or(RegionError::AllocationFailure("run"))?;
        try_push(&mut self.runs, run, "run")?;
        Ok(slot)
    }

    /// Add run `slot` to the set rooted at `root`.
    fn append(&mut self, root: u32, slot: u32) {
        let run = self.runs[slot as usize];
        let tail = self.data[root as usize].tail;
        self.runs[tail as usize].next = slot;
        let d = &mut self.data[root as usize];
        d.tail = slot;
        d.run_count += 1;
        d.bounds.include_span(run.row, run.x1, run.x2);
        d.active_row = d.active_row.max(run.row);
    }

    /// Fold the payload of `u.child` into `u.root`.
    fn join(&mut self, u: Union) {
        let child = self.data[u.child as usize];
        let root_tail = self.data[u.root as usize].tail;
        self.runs[root_tail as usize].next = child.head;

        let d = &mut self.data[u.root as usize];
        d.tail = child.tail;
        d.run_count += child.run_count;
        d.bounds = d.bounds.union(&child.bounds);
        d.first = d.first.min(child.first);
        d.active_row = d.active_row.max(child.active_row);
    }

    /// Discard small sets that received no run on row `y`.
    ///
    /// `prev_row` must still hold the runs of row `y - 1`. Roots are resolved
    /// after all merges of row `y`, so a set that grew on row `y` through a
    /// merge counts as active.
    fn close_finished(&mut self, y: i32) -> RegionResult<()> {
        let Some(min_area) = self.min_area else {
            return Ok(());
        };
        for i in 0..self.prev_row.len() {
            let label = self.runs[self.prev_row[i] as usize].label;
            let root = self.sets.find(label);
            let d = self.data[root as usize];
            if d.active_row == y || d.discarded {
                continue;
            }
            let area = d.bounds.area() as u64;
            if area >= min_area {
                continue;
            }
            trace!(label = d.first, area, min_area, "discarding small component");
            self.free
                .try_reserve(d.run_count as usize)
                .map_err(|_| RegionError::AllocationFailure("run"))?;
            let mut slot = d.head;
            while slot != NIL {
                self.free.push(slot);
                slot = self.runs[slot as usize].next;
            }
            self.data[root as usize].discarded = true;
            self.discarded += 1;
        }
        Ok(())
    }

    /// Apply the end-of-raster noise check to the sets still open.
    fn finish(&mut self, height: i32) -> RegionResult<()> {
        if self.min_area.is_some() {
            self.close_finished(height)?;
        }
        Ok(())
    }

    /// Move the surviving sets into a collection, ordered by first label.
    fn materialize(mut self) -> RegionResult<ComponentCollection> {
        let mut collection = ComponentCollection::new();
        let mut total = 0usize;
        for label in 0..self.sets.len() as u32 {
            let root = self.sets.find(label);
            let d = self.data[root as usize];
            if d.first == label && !d.discarded {
                total += d.run_count as usize;
            }
        }
        collection.reserve_runs(total)?;

        for label in 0..self.sets.len() as u32 {
            let root = self.sets.find(label);
            let d = self.data[root as usize];
            if d.first != label || d.discarded || d.run_count == 0 {
                continue;
            }
            let id = collection.add_component()?;
            let mut slot = d.head;
            while slot != NIL {
                let r = self.runs[slot as usize];
                collection.add_run(id, r.row, r.x1, r.x2)?;
                slot = r.next;
            }
        }

        debug!(
            labels = self.sets.len(),
            components = collection.len(),
            runs = total,
            discarded = self.discarded,
            "component extraction finished"
        );
        Ok(collection)
    }
}
