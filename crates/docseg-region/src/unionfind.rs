//! Disjoint-set forest over provisional component labels
//!
//! Union by size with path halving, so each operation is close to O(1)
//! amortized. Only the forest lives here; per-set payload (bounding boxes,
//! run lists) is kept by the caller and merged according to the [`Union`]
//! result.

use crate::error::{RegionError, RegionResult, try_push};

/// Outcome of joining two different sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Union {
    /// Root of the combined set
    pub root: u32,
    /// Former root that now points at `root`
    pub child: u32,
}

#[derive(Debug, Default)]
pub(crate) struct DisjointSet {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of labels ever created.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Create a singleton set and return its label.
    pub fn make_set(&mut self) -> RegionResult<u32> {
        let label = u32::try_from(self.parent.len())
            .map_err(|_| RegionError::AllocationFailure("label"))?;
        try_push(&mut self.parent, label, "label")?;
        try_push(&mut self.size, 1, "label")?;
        Ok(label)
    }

    /// Root of the set containing `label`.
    pub fn find(&mut self, mut label: u32) -> u32 {
        while self.parent[label as usize] != label {
            let grand = self.parent[self.parent[label as usize] as usize];
            self.parent[label as usize] = grand;
            label = grand;
        }
        label
    }

    /// Join the sets containing `a` and `b`.
    ///
    /// Returns `None` if they already share a root.
    pub fn union(&mut self, a: u32, b: u32) -> Option<Union> {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return None;
        }
        let (root, child) = if self.size[ra as usize] >= self.size[rb as usize] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[child as usize] = root;
        self.size[root as usize] += self.size[child as usize];
        Some(Union { root, child })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut ds = DisjointSet::new();
        let a = ds.make_set().unwrap();
        let b = ds.make_set().unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.find(a), a);
        assert_eq!(ds.find(b), b);
    }

    #[test]
    fn test_union_by_size() {
        let mut ds = DisjointSet::new();
        let labels: Vec<u32> = (0..4).map(|_| ds.make_set().unwrap()).collect();
        let u = ds.union(labels[0], labels[1]).unwrap();
        assert_eq!(u, Union { root: 0, child: 1 });
        // Smaller singleton hangs below the larger set even when given first
        let u = ds.union(labels[2], labels[1]).unwrap();
        assert_eq!(u, Union { root: 0, child: 2 });
        assert!(ds.union(labels[2], labels[0]).is_none());
        assert_eq!(ds.find(labels[3]), 3);
    }

    #[test]
    fn test_long_chain_compresses() {
        let mut ds = DisjointSet::new();
        let labels: Vec<u32> = (0..64).map(|_| ds.make_set().unwrap()).collect();
        for pair in labels.windows(2) {
            ds.union(pair[0], pair[1]);
        }
        let root = ds.find(63);
        for &l in &labels {
            assert_eq!(ds.find(l), root);
        }
    }
}
