use std::cmp::Ordering;

use crate::vertex::Weight;

/// Heap entry ordered *reversed* by score and then by item, so that
/// [`BinaryHeap`](std::collections::BinaryHeap) pops the smallest score first.
/// Equal scores are popped in ascending item order.
///
/// Scores are compared with [`f64::total_cmp`], hence `NaN` never breaks the heap.
#[derive(Debug, Clone, Copy)]
pub struct MinScored<T>(pub Weight, pub T);

impl<T: Ord> PartialEq for MinScored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for MinScored<T> {}

impl<T: Ord> PartialOrd for MinScored<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for MinScored<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .total_cmp(&self.0)
            .then_with(|| other.1.cmp(&self.1))
    }
}

#[cfg(test)]
mod test {
    use std::collections::BinaryHeap;

    use itertools::Itertools;

    use super::*;

    #[test]
    fn pops_minimum_first() {
        let mut heap: BinaryHeap<_> = [
            MinScored(3.0, 'c'),
            MinScored(1.0, 'b'),
            MinScored(1.0, 'a'),
            MinScored(-2.0, 'z'),
            MinScored(10.0, 'd'),
        ]
        .into_iter()
        .collect();

        heap.push(MinScored(0.5, 'x'));

        let order = std::iter::from_fn(|| heap.pop()).map(|e| e.1).collect_vec();
        assert_eq!(order, vec!['z', 'x', 'a', 'b', 'c', 'd']);
    }
}
