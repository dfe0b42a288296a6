use std::cmp::Ordering;

use crate::routing::{Comparator, GraphLocation};

/// Arena slot for one finalized search record. The parent is an index into
/// the same arena, so the whole search tree is dropped in one go.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub(crate) record: GraphLocation,
    pub(crate) parent: Option<usize>,
}

/// Queued search node, ordered by the comparator chosen for the search.
///
/// `sequence` counts pushes, so equal entries pop in insertion order.
pub(super) struct State {
    pub(super) node: SearchNode,
    pub(super) sequence: usize,
    comparator: Comparator,
}

impl State {
    pub(super) fn new(node: SearchNode, sequence: usize, comparator: Comparator) -> Self {
        Self {
            node,
            sequence,
            comparator,
        }
    }
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by comparator, then by sequence (reversed from standard Rust BinaryHeap)
        (self.comparator)(&other.node.record, &self.node.record)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;
    use crate::model::{BuildingFloor, Coordinate, Location};
    use crate::routing::{compare_by_time, compare_by_time_outside_then_time};

    fn state(sequence: usize, time_outside: f64, time: f64, comparator: Comparator) -> State {
        let location = Location::new(Coordinate::new([0.0, 0.0]), BuildingFloor::new("MC", "1"));
        let mut record = GraphLocation::root(location);
        record.time = time;
        record.time_outside = time_outside;
        State::new(
            SearchNode {
                record,
                parent: None,
            },
            sequence,
            comparator,
        )
    }

    fn drain(mut heap: BinaryHeap<State>) -> Vec<usize> {
        std::iter::from_fn(|| heap.pop().map(|s| s.sequence)).collect()
    }

    #[test]
    fn pops_in_comparator_order() {
        let heap: BinaryHeap<_> = [5.0, 1.0, 4.0, 2.0, 3.0, 0.5]
            .into_iter()
            .enumerate()
            .map(|(seq, time)| state(seq, 0.0, time, compare_by_time))
            .collect();
        assert_eq!(heap.len(), 6);
        assert_eq!(drain(heap), vec![5, 1, 3, 4, 2, 0]);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut heap = BinaryHeap::new();
        for (seq, time) in [(4, 2.0), (0, 2.0), (3, 1.0), (2, 2.0), (1, 1.0)] {
            heap.push(state(seq, 0.0, time, compare_by_time));
        }
        assert_eq!(drain(heap), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn outside_time_dominates_when_preferred() {
        let heap: BinaryHeap<_> = [(10.0, 20.0), (0.0, 90.0), (0.0, 60.0)]
            .into_iter()
            .enumerate()
            .map(|(seq, (outside, time))| state(seq, outside, time, compare_by_time_outside_then_time))
            .collect();
        assert_eq!(drain(heap), vec![2, 1, 0]);
    }
}
