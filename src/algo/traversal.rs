/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- A generic traversal iterator [`TraversalSearch`] that is a BFS or a DFS depending
  on the frontier it is parameterized with.
- A high-level [`Traversal`] trait that exposes traversals directly as methods on graphs.

Traversals are deterministic: neighbors are always explored in ascending vertex order.
For DFS this means they are pushed onto the stack in descending order, so that the
iterative search visits vertices in exactly the order of the recursive one.
*/

use std::collections::VecDeque;

use fxhash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::*;

/// Event emitted by traversals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalEvent<V> {
    /// `v` was found as a neighbor of the current vertex and queued
    Discovered(V),
    /// `v` is output by the traversal
    Visited(V),
}

/// A frontier entry: the vertex and the vertex it was reached from
pub type Frontier<V> = (Option<V>, V);

/// Abstraction for the traversal frontier data structure.
///
/// A `VertexSequencer` stores the "to be visited" vertices during a traversal.
/// Different implementations determine the traversal order:
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait VertexSequencer<T> {
    /// If *true*, vertices are marked as visited as soon as they are pushed (BFS).
    /// Otherwise they are marked when popped (DFS), which may leave duplicates in the frontier.
    const MARK_ON_PUSH: bool;

    /// Creates a new sequencer initialized with a single item.
    fn init(item: T) -> Self;

    /// Pushes an item into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next item from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;

    /// Drops all items
    fn clear(&mut self);
}

impl<T> VertexSequencer<T> for VecDeque<T> {
    const MARK_ON_PUSH: bool = true;

    fn init(item: T) -> Self {
        Self::from(vec![item])
    }
    fn push(&mut self, item: T) {
        self.push_back(item)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
}

impl<T> VertexSequencer<T> for Vec<T> {
    const MARK_ON_PUSH: bool = false;

    fn init(item: T) -> Self {
        vec![item]
    }
    fn push(&mut self, item: T) {
        self.push(item)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

/// Generic traversal iterator supporting BFS and DFS.
///
/// Maintains an explicit frontier (queue or stack) of vertices to visit together with the
/// vertex they were reached from, and the set of visited vertices.
/// Yields every vertex reachable from the start exactly once. If the start vertex is not part
/// of the graph, the iterator is empty.
pub struct TraversalSearch<'a, G, S, O = NoObserver>
where
    G: WeightedAdjacency,
    S: VertexSequencer<Frontier<G::V>>,
{
    graph: &'a G,
    visited: FxHashSet<G::V>,
    sequencer: S,
    stop_at: Option<G::V>,
    observer: O,
}

/// A BFS traversal iterator over the graph, visiting vertices in
/// breadth-first order from a given starting vertex.
pub type BFS<'a, G, O = NoObserver> =
    TraversalSearch<'a, G, VecDeque<Frontier<<G as GraphVertexOrder>::V>>, O>;

/// A DFS traversal iterator over the graph, visiting vertices in
/// depth-first (pre-)order from a given starting vertex.
pub type DFS<'a, G, O = NoObserver> =
    TraversalSearch<'a, G, Vec<Frontier<<G as GraphVertexOrder>::V>>, O>;

impl<'a, G, S> TraversalSearch<'a, G, S, NoObserver>
where
    G: WeightedAdjacency,
    S: VertexSequencer<Frontier<G::V>>,
{
    /// Creates a new traversal iterator starting from `start`.
    pub fn new(graph: &'a G, start: &G::V) -> Self {
        let mut visited = FxHashSet::default();
        let mut sequencer = S::init((None, start.clone()));

        if !graph.has_vertex(start) {
            sequencer.clear();
        } else if S::MARK_ON_PUSH {
            visited.insert(start.clone());
        }

        Self {
            graph,
            visited,
            sequencer,
            stop_at: None,
            observer: NoObserver,
        }
    }
}

impl<'a, G, S, O> TraversalSearch<'a, G, S, O>
where
    G: WeightedAdjacency,
    S: VertexSequencer<Frontier<G::V>>,
    O: Observer<TraversalEvent<G::V>>,
{
    /// Attaches an observer that is notified about every discovered and visited vertex
    pub fn with_observer<O2>(self, observer: O2) -> TraversalSearch<'a, G, S, O2>
    where
        O2: Observer<TraversalEvent<G::V>>,
    {
        TraversalSearch {
            graph: self.graph,
            visited: self.visited,
            sequencer: self.sequencer,
            stop_at: self.stop_at,
            observer,
        }
    }

    /// Returns *true* if `u` was already visited (for BFS: already queued)
    pub fn did_visit(&self, u: &G::V) -> bool {
        self.visited.contains(u)
    }

    /// Sets a stopper vertex. If this vertex is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: G::V) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper vertex. If this vertex is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: G::V) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Tries to restart the search at the smallest yet unvisited vertex and returns
    /// true iff successful. Requires that search came to a hold earlier,
    /// i.e. self.next() returned None
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        debug_assert_eq!(self.sequencer.cardinality(), 0);
        let Some(u) = self
            .graph
            .vertices()
            .filter(|u| !self.visited.contains(*u))
            .min()
            .cloned()
        else {
            return false;
        };

        if S::MARK_ON_PUSH {
            self.visited.insert(u.clone());
        }
        self.sequencer.push((None, u));
        true
    }

    /// Returns the next vertex together with the vertex it was reached from
    pub fn next_with_predecessor(&mut self) -> Option<Frontier<G::V>> {
        let (predecessor, u) = loop {
            let item = self.sequencer.pop()?;
            if S::MARK_ON_PUSH || self.visited.insert(item.1.clone()) {
                break item;
            }
        };

        if self.stop_at.as_ref() == Some(&u) {
            self.sequencer.clear();
        } else {
            let mut neighbors = self.graph.ordered_neighbors_of(&u);
            if !S::MARK_ON_PUSH {
                // stack: push descending to pop ascending
                neighbors.reverse();
            }

            for v in neighbors {
                if self.visited.contains(&v) {
                    continue;
                }
                if S::MARK_ON_PUSH {
                    self.visited.insert(v.clone());
                }
                self.observer.notify(TraversalEvent::Discovered(v.clone()));
                self.sequencer.push((Some(u.clone()), v));
            }
        }

        self.observer.notify(TraversalEvent::Visited(u.clone()));
        Some((predecessor, u))
    }
}

impl<G, S, O> Iterator for TraversalSearch<'_, G, S, O>
where
    G: WeightedAdjacency,
    S: VertexSequencer<Frontier<G::V>>,
    O: Observer<TraversalEvent<G::V>>,
{
    type Item = G::V;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_predecessor().map(|(_, u)| u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let unvisited = self.graph.number_of_vertices() - self.visited.len();
        if S::MARK_ON_PUSH {
            let queued = self.sequencer.cardinality();
            (queued, Some(queued + unvisited))
        } else {
            (0, Some(unvisited))
        }
    }
}

/// Provides convenient traversal methods (BFS, DFS, levels, unweighted paths)
pub trait Traversal: WeightedAdjacency {
    /// Returns an iterator that traverses vertices reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g: Graph<char> = Graph::from_edges(
    ///     GraphKind::Undirected,
    ///     [('a', 'b', 1.0), ('b', 'c', 1.0), ('c', 'd', 1.0), ('d', 'e', 1.0), ('e', 'a', 1.0)],
    /// );
    ///
    /// let order: Vec<_> = g.bfs(&'a').collect();
    /// assert_eq!(order, vec!['a', 'b', 'e', 'c', 'd']);
    /// ```
    fn bfs(&self, start: &Self::V) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns an iterator that traverses vertices reachable from `start`
    /// in **depth-first search (DFS) order**.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g: Graph<u32> = Graph::from_edges(GraphKind::Undirected, [(1, 3, 1.0), (1, 2, 1.0), (2, 4, 1.0)]);
    ///
    /// let order: Vec<_> = g.dfs(&1).collect();
    /// assert_eq!(order, vec![1, 2, 4, 3]);
    /// ```
    fn dfs(&self, start: &Self::V) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    /// Recursive DFS, producing the same order as [`Traversal::dfs`].
    /// The recursion depth is bounded by the number of vertices.
    fn dfs_recursive(&self, start: &Self::V) -> Vec<Self::V> {
        fn visit<G: WeightedAdjacency>(
            graph: &G,
            u: &G::V,
            visited: &mut FxHashSet<G::V>,
            order: &mut Vec<G::V>,
        ) {
            visited.insert(u.clone());
            order.push(u.clone());
            for v in graph.ordered_neighbors_of(u) {
                if !visited.contains(&v) {
                    visit(graph, &v, visited, order);
                }
            }
        }

        let mut order = Vec::new();
        if self.has_vertex(start) {
            visit(self, start, &mut FxHashSet::default(), &mut order);
        }
        order
    }

    /// Returns the BFS layer (number of edges on a shortest path) of every vertex reachable
    /// from `start`.
    fn bfs_levels(&self, start: &Self::V) -> FxHashMap<Self::V, usize> {
        let mut levels = FxHashMap::default();
        let mut search = self.bfs(start);
        while let Some((predecessor, u)) = search.next_with_predecessor() {
            let level = predecessor.map_or(0, |p| levels[&p] + 1);
            levels.insert(u, level);
        }
        levels
    }

    /// Returns a path from `start` to `end` with the fewest edges, ignoring weights.
    /// Returns `Some(vec![start])` if `start == end` and `None` if either vertex is absent
    /// or `end` is unreachable.
    fn bfs_path(&self, start: &Self::V, end: &Self::V) -> Option<Vec<Self::V>> {
        if !self.has_vertex(end) {
            return None;
        }

        let mut parents = FxHashMap::default();
        let mut search = self.bfs(start).stop_at(end.clone());
        while let Some((predecessor, u)) = search.next_with_predecessor() {
            if let Some(p) = predecessor {
                parents.insert(u.clone(), p);
            }
            if u == *end {
                let mut path = vec![u];
                while let Some(p) = parents.get(path.last()?) {
                    path.push(p.clone());
                }
                path.reverse();
                debug!(len = path.len(), "bfs path found");
                return Some(path);
            }
        }
        None
    }

    /// Returns *true* if there is a (directed) path from `start` to `end`
    fn is_reachable(&self, start: &Self::V, end: &Self::V) -> bool {
        self.bfs(start).any(|u| u == *end)
    }
}

impl<G> Traversal for G where G: WeightedAdjacency {}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::testing::*;

    fn five_cycle() -> Graph<char> {
        Graph::from_edges(
            GraphKind::Undirected,
            [
                ('a', 'b', 1.0),
                ('b', 'c', 1.0),
                ('c', 'd', 1.0),
                ('d', 'e', 1.0),
                ('e', 'a', 1.0),
            ],
        )
    }

    #[test]
    fn bfs_order() {
        let g = five_cycle();
        assert_eq!(g.bfs(&'a').collect_vec(), vec!['a', 'b', 'e', 'c', 'd']);
        // deterministic
        assert_eq!(g.bfs(&'a').collect_vec(), g.bfs(&'a').collect_vec());
    }

    #[test]
    fn dfs_order() {
        let g = five_cycle();
        assert_eq!(g.dfs(&'a').collect_vec(), vec!['a', 'b', 'c', 'd', 'e']);
        assert_eq!(g.dfs_recursive(&'a'), vec!['a', 'b', 'c', 'd', 'e']);

        let g: Graph<u32> = Graph::from_edges(
            GraphKind::Directed,
            [(0, 2, 1.0), (0, 1, 1.0), (1, 3, 1.0), (3, 2, 1.0), (2, 4, 1.0)],
        );
        assert_eq!(g.dfs(&0).collect_vec(), vec![0, 1, 3, 2, 4]);
        assert_eq!(g.bfs(&0).collect_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn iterative_dfs_equals_recursive_dfs() {
        let mut rng = test_rng(0x1234);
        for _ in 0..50 {
            let g = random_graph(&mut rng, 20, 0.15, GraphKind::Undirected);
            for u in g.vertices() {
                assert_eq!(g.dfs(u).collect_vec(), g.dfs_recursive(u));
            }
            let g = random_graph(&mut rng, 15, 0.2, GraphKind::Directed);
            for u in g.vertices() {
                assert_eq!(g.dfs(u).collect_vec(), g.dfs_recursive(u));
            }
        }
    }

    #[test]
    fn absent_start_yields_nothing() {
        let g = five_cycle();
        assert_eq!(g.bfs(&'z').count(), 0);
        assert_eq!(g.dfs(&'z').count(), 0);
        assert!(g.dfs_recursive(&'z').is_empty());
        assert!(g.bfs_levels(&'z').is_empty());
    }

    #[test]
    fn reachability() {
        let mut rng = test_rng(7);
        for _ in 0..30 {
            let g = random_graph(&mut rng, 25, 0.08, GraphKind::Directed);
            let start = *g.vertices().next().unwrap();

            for order in [g.bfs(&start).collect_vec(), g.dfs(&start).collect_vec()] {
                assert!(order.iter().all_unique());
                for u in g.vertices() {
                    assert_eq!(order.contains(u), g.is_reachable(&start, u));
                }
            }
        }
    }

    #[test]
    fn bfs_visits_in_layer_order() {
        let mut rng = test_rng(99);
        for _ in 0..30 {
            let g = random_graph(&mut rng, 30, 0.1, GraphKind::Undirected);
            let levels = g.bfs_levels(&0);
            let order = g.bfs(&0).collect_vec();
            assert_eq!(order.len(), levels.len());
            assert!(order.windows(2).all(|w| levels[&w[0]] <= levels[&w[1]]));
        }
    }

    #[test]
    fn stopper() {
        let g = five_cycle();
        assert_eq!(g.bfs(&'a').stop_at('e').collect_vec(), vec!['a', 'b', 'e']);
    }

    #[test]
    fn restart_at_unvisited() {
        let g: Graph<u32> =
            Graph::from_parts(GraphKind::Undirected, [5, 9], [(1, 2, 1.0), (3, 4, 1.0)]);
        let mut search = g.bfs(&3);
        let mut order = search.by_ref().collect_vec();
        while search.try_restart_at_unvisited() {
            order.extend(search.by_ref());
        }
        assert_eq!(order, vec![3, 4, 1, 2, 5, 9]);
    }

    #[test]
    fn levels_and_paths() {
        let g = five_cycle();
        let levels = g.bfs_levels(&'a');
        assert_eq!(levels[&'a'], 0);
        assert_eq!(levels[&'b'], 1);
        assert_eq!(levels[&'e'], 1);
        assert_eq!(levels[&'c'], 2);
        assert_eq!(levels[&'d'], 2);

        assert_eq!(g.bfs_path(&'a', &'d'), Some(vec!['a', 'e', 'd']));
        assert_eq!(g.bfs_path(&'a', &'a'), Some(vec!['a']));
        assert_eq!(g.bfs_path(&'a', &'z'), None);

        let g: Graph<u32> = Graph::from_edges(GraphKind::Directed, [(1, 2, 1.0)]);
        assert_eq!(g.bfs_path(&2, &1), None);
    }

    #[test]
    fn observer_sees_every_vertex() {
        let g = five_cycle();
        let mut events = Vec::new();
        let order = g
            .bfs(&'a')
            .with_observer(|e: TraversalEvent<char>| events.push(e))
            .collect_vec();

        let visited = events
            .iter()
            .filter_map(|e| match e {
                TraversalEvent::Visited(u) => Some(*u),
                _ => None,
            })
            .collect_vec();
        assert_eq!(visited, order);
        assert_eq!(events.first(), Some(&TraversalEvent::Discovered('b')));
    }
}
