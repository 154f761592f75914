use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::cmp::Ordering;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the root of the parent chain in a [FxIndexMap] of search parents.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Open-list entry for the node stored at `index` in the parents map. Ordered so that a
/// [BinaryHeap](std::collections::BinaryHeap) pops the lowest `estimate` first, then the lowest
/// `cost`, then the node discovered earliest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OpenEntry {
    pub estimate: i32,
    pub cost: i32,
    pub index: usize,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn pops_lowest_estimate_then_lowest_cost() {
        let mut heap = BinaryHeap::new();
        for (index, (estimate, cost)) in [(5, 1), (3, 2), (5, 0), (3, 1), (4, 4), (3, 1)]
            .into_iter()
            .enumerate()
        {
            heap.push(OpenEntry {
                estimate,
                cost,
                index,
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![3, 5, 1, 4, 2, 0]);
    }
}
