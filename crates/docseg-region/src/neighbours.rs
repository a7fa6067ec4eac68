//! Nearest-neighbour search between components
//!
//! Distances are Euclidean, measured between bounding-box centres. The
//! result is stored on every component and stays valid until the
//! collection next changes.

use crate::collection::ComponentCollection;
use crate::component::Neighbour;
use crate::error::{RegionError, RegionResult};
use tracing::trace;

impl ComponentCollection {
    /// Record the `k` nearest neighbours of every component, nearest first.
    ///
    /// Equal distances keep the component met first in collection order.
    /// `k` larger than `len() - 1` is clamped.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if `k` is zero and
    /// [`RegionError::AllocationFailure`] if a neighbour list cannot be
    /// allocated.
    pub fn find_k_nearest_neighbours(&mut self, k: usize) -> RegionResult<()> {
        if k == 0 {
            return Err(RegionError::InvalidParameters(
                "k must be at least 1".to_string(),
            ));
        }
        let n = self.len();
        let k = k.min(n.saturating_sub(1));
        trace!(components = n, k, "nearest neighbour pass");

        let centres: Vec<(f64, f64)> = self.iter().map(|cc| cc.centroid()).collect();
        let ids = self.ids().to_vec();

        let mut lists = Vec::new();
        lists
            .try_reserve_exact(n)
            .map_err(|_| RegionError::AllocationFailure("neighbour"))?;
        for (i, &(cx, cy)) in centres.iter().enumerate() {
            let mut window: Vec<Neighbour> = Vec::new();
            window
                .try_reserve_exact(k + 1)
                .map_err(|_| RegionError::AllocationFailure("neighbour"))?;
            for (j, &(ox, oy)) in centres.iter().enumerate() {
                if i == j {
                    continue;
                }
                let distance = (cx - ox).hypot(cy - oy);
                if window.len() == k && window.last().is_some_and(|w| distance >= w.distance) {
                    continue;
                }
                // Insert after every entry at the same or smaller distance
                let pos = window.partition_point(|w| w.distance <= distance);
                window.insert(pos, Neighbour { id: ids[j], distance });
                window.truncate(k);
            }
            lists.push(window);
        }

        for (id, list) in ids.into_iter().zip(lists) {
            if let Some(cc) = self.slot_mut(id) {
                cc.set_neighbours(list);
            }
        }
        self.mark_neighbours_set();
        Ok(())
    }
}
