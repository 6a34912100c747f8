/*!
# Observers

Algorithms that are meant to be visualized accept an [`Observer`]: a sink for events that is
invoked synchronously at well-defined checkpoints (a vertex was visited, an edge was added, ...).
Observers only ever receive owned copies of the algorithm state and cannot reach the graph,
so they never influence the result.

Every `FnMut(E)` is an observer, thus
```
use wgraphs::{prelude::*, algo::*};

let g: Graph<u32> = Graph::from_edges(GraphKind::Undirected, [(1, 2, 1.0), (2, 3, 1.0)]);

let mut visited = Vec::new();
let order: Vec<_> = g
    .bfs(&1)
    .with_observer(|event: TraversalEvent<u32>| {
        if let TraversalEvent::Visited(u) = event {
            visited.push(u);
        }
    })
    .collect();

assert_eq!(order, visited);
```
*/

/// A sink for algorithm events
pub trait Observer<E> {
    /// Called synchronously whenever the algorithm reaches a checkpoint
    fn notify(&mut self, event: E);
}

/// Observer ignoring all events. Default for every algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoObserver;

impl<E> Observer<E> for NoObserver {
    #[inline]
    fn notify(&mut self, _event: E) {}
}

impl<E, F> Observer<E> for F
where
    F: FnMut(E),
{
    #[inline]
    fn notify(&mut self, event: E) {
        self(event)
    }
}
