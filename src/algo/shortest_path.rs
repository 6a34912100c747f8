/*!
# Shortest Paths

- [`ShortestPaths::dijkstra`]: single-source distances for non-negative weights,
- [`ShortestPaths::bellman_ford`]: single-source distances for arbitrary weights including negative-cycle detection,
- [`ShortestPaths::floyd_warshall`]: all-pairs distances with next-hop path reconstruction,
- [`ShortestPaths::find_shortest_path`]: Dijkstra followed by path reconstruction.

Undirected edges can be traversed in both directions. Unreachable vertices have distance
[`INFINITY`] and no parent.
*/

use std::collections::BinaryHeap;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use tracing::{debug, trace, warn};

use super::*;

/// Event emitted by Dijkstra
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceEvent<V> {
    /// The search starts at this vertex
    Start(V),
    /// The distance of the vertex is final
    Settled(V, Weight),
    /// The tentative distance of the vertex was lowered
    Relaxed(V, Weight),
}

/// Result of a single-source shortest path computation:
/// a distance and an optional parent for every vertex of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree<V: Vertex> {
    source: V,
    distances: FxHashMap<V, Weight>,
    parents: FxHashMap<V, Option<V>>,
}

impl<V: Vertex> ShortestPathTree<V> {
    fn init<G>(graph: &G, source: &V) -> Self
    where
        G: WeightedAdjacency<V = V>,
    {
        let mut distances: FxHashMap<V, Weight> =
            graph.vertices().map(|u| (u.clone(), INFINITY)).collect();
        if let Some(d) = distances.get_mut(source) {
            *d = 0.0;
        }

        Self {
            source: source.clone(),
            distances,
            parents: graph.vertices().map(|u| (u.clone(), None)).collect(),
        }
    }

    fn update(&mut self, v: &V, distance: Weight, parent: &V) {
        self.distances.insert(v.clone(), distance);
        self.parents.insert(v.clone(), Some(parent.clone()));
    }

    /// Returns the vertex the distances are measured from
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Returns the distance of `v` or [`INFINITY`] if it is unreachable or unknown
    pub fn distance(&self, v: &V) -> Weight {
        self.distances.get(v).copied().unwrap_or(INFINITY)
    }

    /// Returns the predecessor of `v` on a shortest path
    pub fn parent(&self, v: &V) -> Option<&V> {
        self.parents.get(v)?.as_ref()
    }

    /// Returns *true* if `v` has a finite distance
    pub fn is_reachable(&self, v: &V) -> bool {
        self.distance(v) < INFINITY
    }

    /// Returns the distance map (every vertex of the graph is a key)
    pub fn distances(&self) -> &FxHashMap<V, Weight> {
        &self.distances
    }

    /// Returns the parent map (every vertex of the graph is a key)
    pub fn parents(&self) -> &FxHashMap<V, Option<V>> {
        &self.parents
    }

    /// Reconstructs a shortest path from the source to `v`
    pub fn path_to(&self, v: &V) -> Option<Vec<V>> {
        path_from_parents(&self.parents, &self.source, v)
    }

    /// Splits the tree into distance and parent map
    pub fn into_parts(self) -> (FxHashMap<V, Weight>, FxHashMap<V, Option<V>>) {
        (self.distances, self.parents)
    }
}

/// Reconstructs a path by walking parent pointers from `end` back to `start`.
///
/// Returns `None` if `end` has no parent (and differs from `start`) or the chain
/// does not terminate at `start`. Cyclic parent maps are detected and also yield `None`.
pub fn path_from_parents<V: Vertex>(
    parents: &FxHashMap<V, Option<V>>,
    start: &V,
    end: &V,
) -> Option<Vec<V>> {
    let mut path = vec![end.clone()];
    let mut current = end;
    while current != start {
        if path.len() > parents.len() {
            return None;
        }
        current = parents.get(current)?.as_ref()?;
        path.push(current.clone());
    }
    path.reverse();
    Some(path)
}

/// Result of Bellman-Ford
#[derive(Debug, Clone, PartialEq)]
pub struct BellmanFordResult<V: Vertex> {
    pub tree: ShortestPathTree<V>,
    /// If *true*, a negative cycle is reachable from the source and
    /// the distances in `tree` must not be relied upon.
    pub has_negative_cycle: bool,
}

/// All-pairs distances and next hops, computed by Floyd-Warshall
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairsShortestPaths<V: Vertex> {
    vertices: Vec<V>,
    index: FxHashMap<V, usize>,
    dist: Vec<Weight>,
    next: Vec<Option<usize>>,
}

impl<V: Vertex> AllPairsShortestPaths<V> {
    fn cell(&self, u: &V, v: &V) -> Option<usize> {
        Some(self.index.get(u)? * self.vertices.len() + self.index.get(v)?)
    }

    /// Returns the distance from `u` to `v` or [`INFINITY`] if there is no path
    pub fn distance(&self, u: &V, v: &V) -> Weight {
        self.cell(u, v).map_or(INFINITY, |c| self.dist[c])
    }

    /// Returns the vertex following `u` on a shortest path to `v`
    pub fn next_hop(&self, u: &V, v: &V) -> Option<&V> {
        self.cell(u, v)
            .and_then(|c| self.next[c])
            .map(|i| &self.vertices[i])
    }

    /// Reconstructs a shortest path from `u` to `v`.
    /// Returns `None` if there is none or if it is not well-defined due to negative cycles.
    pub fn path(&self, u: &V, v: &V) -> Option<Vec<V>> {
        let n = self.vertices.len();
        let target = *self.index.get(v)?;
        let mut current = *self.index.get(u)?;
        let mut path = vec![self.vertices[current].clone()];

        while current != target {
            current = self.next[current * n + target]?;
            path.push(self.vertices[current].clone());
            if path.len() > n {
                return None;
            }
        }
        Some(path)
    }

    /// Returns *true* if some vertex lies on a negative cycle
    pub fn has_negative_cycle(&self) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| self.dist[i * n + i] < 0.0)
    }

    /// Returns all distances keyed by `(u, v)`
    pub fn distances(&self) -> FxHashMap<(V, V), Weight> {
        self.pairs().map(|(u, v, c)| ((u, v), self.dist[c])).collect()
    }

    /// Returns all next hops keyed by `(u, v)`
    pub fn next_hops(&self) -> FxHashMap<(V, V), Option<V>> {
        self.pairs()
            .map(|(u, v, c)| ((u, v), self.next[c].map(|i| self.vertices[i].clone())))
            .collect()
    }

    fn pairs(&self) -> impl Iterator<Item = (V, V, usize)> + '_ {
        let n = self.vertices.len();
        (0..n)
            .cartesian_product(0..n)
            .map(move |(i, j)| (self.vertices[i].clone(), self.vertices[j].clone(), i * n + j))
    }
}

/// Provides shortest path algorithms on weighted graphs
pub trait ShortestPaths: WeightedAdjacency {
    /// Dijkstra's algorithm with a binary heap and lazy deletion.
    ///
    /// Weights are assumed to be non-negative. Negative weights are not rejected, but the
    /// result is unspecified; a warning is logged when one is encountered.
    fn dijkstra(&self, start: &Self::V) -> ShortestPathTree<Self::V> {
        self.dijkstra_with_observer(start, &mut NoObserver)
    }

    /// Like [`ShortestPaths::dijkstra`], reporting progress to an observer
    fn dijkstra_with_observer<O>(
        &self,
        start: &Self::V,
        observer: &mut O,
    ) -> ShortestPathTree<Self::V>
    where
        O: Observer<DistanceEvent<Self::V>>,
    {
        let mut tree = ShortestPathTree::init(self, start);
        if !self.has_vertex(start) {
            return tree;
        }

        let mut settled = FxHashSet::default();
        let mut heap = BinaryHeap::new();
        let mut warned = false;

        observer.notify(DistanceEvent::Start(start.clone()));
        heap.push(MinScored(0.0, start.clone()));

        while let Some(MinScored(dist, u)) = heap.pop() {
            if !settled.insert(u.clone()) {
                continue;
            }
            observer.notify(DistanceEvent::Settled(u.clone(), dist));

            for (v, w) in self.weighted_neighbors_of(&u) {
                if w < 0.0 && !warned {
                    warn!(?u, ?v, weight = w, "dijkstra encountered a negative edge weight");
                    warned = true;
                }

                let new_dist = dist + w;
                if new_dist < tree.distance(v) {
                    tree.update(v, new_dist, &u);
                    observer.notify(DistanceEvent::Relaxed(v.clone(), new_dist));
                    heap.push(MinScored(new_dist, v.clone()));
                }
            }
        }

        debug!(
            source = ?start,
            reached = settled.len(),
            vertices = self.number_of_vertices(),
            "dijkstra finished"
        );
        tree
    }

    /// Bellman-Ford: relaxes every edge up to `|V| - 1` times (stopping early once a pass
    /// changes nothing) and runs one more pass to detect negative cycles reachable from `start`.
    ///
    /// Undirected edges are relaxed in both directions; a negative undirected edge is thus
    /// a negative cycle.
    fn bellman_ford(&self, start: &Self::V) -> BellmanFordResult<Self::V> {
        let mut tree = ShortestPathTree::init(self, start);

        let mut arcs = Vec::with_capacity(2 * self.number_of_edges());
        for WeightedEdge(u, v, w) in self.edges() {
            if self.is_undirected() && u != v {
                arcs.push((v.clone(), u.clone(), w));
            }
            arcs.push((u, v, w));
        }

        let relax_all = |tree: &mut ShortestPathTree<Self::V>| {
            let mut updated = false;
            for (u, v, w) in &arcs {
                let du = tree.distance(u);
                if du < INFINITY && du + w < tree.distance(v) {
                    tree.update(v, du + w, u);
                    updated = true;
                }
            }
            updated
        };

        let mut passes = 0;
        for _ in 1..self.number_of_vertices() {
            passes += 1;
            if !relax_all(&mut tree) {
                break;
            }
        }

        let has_negative_cycle = self.has_vertex(start) && relax_all(&mut tree);
        if has_negative_cycle {
            warn!(source = ?start, "bellman-ford detected a negative cycle");
        }
        debug!(source = ?start, passes, has_negative_cycle, "bellman-ford finished");

        BellmanFordResult {
            tree,
            has_negative_cycle,
        }
    }

    /// Floyd-Warshall over all pairs in `O(|V|^3)`.
    ///
    /// The diagonal is initialized with `0` (or a negative self-loop weight), thus a vertex
    /// lies on a negative cycle iff its distance to itself is negative.
    fn floyd_warshall(&self) -> AllPairsShortestPaths<Self::V> {
        let vertices = self.ordered_vertices();
        let n = vertices.len();
        let index: FxHashMap<Self::V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, u)| (u.clone(), i))
            .collect();

        let mut dist = vec![INFINITY; n * n];
        let mut next = vec![None; n * n];
        for i in 0..n {
            dist[i * n + i] = 0.0;
            next[i * n + i] = Some(i);
        }

        for (i, u) in vertices.iter().enumerate() {
            for (v, w) in self.weighted_neighbors_of(u) {
                let j = index[v];
                if i == j {
                    dist[i * n + i] = dist[i * n + i].min(w);
                } else {
                    dist[i * n + j] = w;
                    next[i * n + j] = Some(j);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let dik = dist[i * n + k];
                if dik == INFINITY {
                    continue;
                }
                for j in 0..n {
                    let through_k = dik + dist[k * n + j];
                    if through_k < dist[i * n + j] {
                        dist[i * n + j] = through_k;
                        next[i * n + j] = next[i * n + k];
                    }
                }
            }
        }

        debug!(vertices = n, "floyd-warshall finished");
        AllPairsShortestPaths {
            vertices,
            index,
            dist,
            next,
        }
    }

    /// Returns a shortest path from `start` to `end` together with its length, computed by Dijkstra.
    /// Returns `(None, INFINITY)` if `end` is unreachable or either vertex is absent.
    fn find_shortest_path(
        &self,
        start: &Self::V,
        end: &Self::V,
    ) -> (Option<Vec<Self::V>>, Weight) {
        let tree = self.dijkstra(start);
        let distance = tree.distance(end);
        if distance == INFINITY {
            return (None, INFINITY);
        }

        let path = tree.path_to(end);
        trace!(?start, ?end, distance, "shortest path");
        (path, distance)
    }
}

impl<G> ShortestPaths for G where G: WeightedAdjacency {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    fn diamond() -> Graph<char> {
        Graph::from_edges(
            GraphKind::Undirected,
            [('a', 'b', 1.0), ('b', 'c', 2.0), ('c', 'd', 1.0), ('a', 'd', 5.0)],
        )
    }

    #[test]
    fn indirect_path_beats_direct_edge() {
        let g = diamond();
        assert_eq!(
            g.find_shortest_path(&'a', &'d'),
            (Some(vec!['a', 'b', 'c', 'd']), 4.0)
        );
        assert_eq!(g.find_shortest_path(&'d', &'a').1, 4.0);
        assert_eq!(g.find_shortest_path(&'a', &'a'), (Some(vec!['a']), 0.0));
    }

    #[test]
    fn unreachable_and_unknown() {
        let mut g = diamond();
        g.add_vertex('x');
        assert_eq!(g.find_shortest_path(&'a', &'x'), (None, INFINITY));
        assert_eq!(g.find_shortest_path(&'a', &'z'), (None, INFINITY));
        assert_eq!(g.find_shortest_path(&'z', &'a'), (None, INFINITY));

        let tree = g.dijkstra(&'a');
        assert_eq!(tree.distance(&'x'), INFINITY);
        assert!(!tree.is_reachable(&'x'));
        assert_eq!(tree.parent(&'x'), None);
        assert_eq!(tree.distances().len(), 5);

        let tree = g.dijkstra(&'z');
        assert!(tree.distances().values().all(|d| *d == INFINITY));
    }

    #[test]
    fn directed_distances() {
        let g: Graph<u32> = Graph::from_edges(
            GraphKind::Directed,
            [(1, 2, 4.0), (1, 3, 1.0), (3, 2, 2.0), (2, 4, 1.0), (4, 1, 1.0)],
        );
        let tree = g.dijkstra(&1);
        assert_eq!(tree.distance(&2), 3.0);
        assert_eq!(tree.distance(&4), 4.0);
        assert_eq!(tree.parent(&2), Some(&3));
        assert_eq!(tree.path_to(&4), Some(vec![1, 3, 2, 4]));

        let tree = g.dijkstra(&2);
        assert_eq!(tree.distance(&3), 3.0);
    }

    #[test]
    fn dijkstra_agrees_with_bellman_ford() {
        let mut rng = test_rng(42);
        for kind in [GraphKind::Directed, GraphKind::Undirected] {
            for _ in 0..40 {
                let g = random_graph(&mut rng, 20, 0.15, kind);
                let dijkstra = g.dijkstra(&0);
                let bf = g.bellman_ford(&0);
                assert!(!bf.has_negative_cycle);
                assert_eq!(dijkstra.distances(), bf.tree.distances());
            }
        }
    }

    #[test]
    fn floyd_warshall_agrees_with_dijkstra() {
        let mut rng = test_rng(1337);
        for kind in [GraphKind::Directed, GraphKind::Undirected] {
            for _ in 0..10 {
                let g = random_graph(&mut rng, 12, 0.25, kind);
                let apsp = g.floyd_warshall();
                assert!(!apsp.has_negative_cycle());

                for u in g.vertices() {
                    let tree = g.dijkstra(u);
                    for v in g.vertices() {
                        assert_eq!(apsp.distance(u, v), tree.distance(v));

                        match apsp.path(u, v) {
                            Some(path) => {
                                let length: Weight = path
                                    .windows(2)
                                    .map(|w| g.weight_of(&w[0], &w[1]).unwrap())
                                    .sum();
                                assert_eq!(length, tree.distance(v));
                            }
                            None => assert_eq!(tree.distance(v), INFINITY),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn floyd_warshall_maps() {
        let g = diamond();
        let apsp = g.floyd_warshall();
        assert_eq!(apsp.distance(&'a', &'d'), 4.0);
        assert_eq!(apsp.path(&'a', &'d'), Some(vec!['a', 'b', 'c', 'd']));
        assert_eq!(apsp.next_hop(&'d', &'a'), Some(&'c'));
        assert_eq!(apsp.path(&'a', &'z'), None);

        let distances = apsp.distances();
        assert_eq!(distances.len(), 16);
        assert_eq!(distances[&('b', 'd')], 3.0);
        assert_eq!(apsp.next_hops()[&('c', 'c')], Some('c'));
    }

    #[test]
    fn bellman_ford_negative_weights() {
        let g: Graph<char> = Graph::from_edges(
            GraphKind::Directed,
            [('s', 'a', 4.0), ('s', 'b', 2.0), ('b', 'a', -3.0), ('a', 't', 1.0)],
        );
        let result = g.bellman_ford(&'s');
        assert!(!result.has_negative_cycle);
        assert_eq!(result.tree.distance(&'a'), -1.0);
        assert_eq!(result.tree.distance(&'t'), 0.0);
        assert_eq!(result.tree.path_to(&'t'), Some(vec!['s', 'b', 'a', 't']));

        let apsp = g.floyd_warshall();
        assert_eq!(apsp.distance(&'s', &'t'), 0.0);
    }

    #[test]
    fn bellman_ford_negative_cycle() {
        let g: Graph<u32> = Graph::from_edges(
            GraphKind::Directed,
            [(0, 1, 1.0), (1, 2, -2.0), (2, 1, 1.0), (2, 3, 1.0)],
        );
        assert!(g.bellman_ford(&0).has_negative_cycle);
        assert!(g.floyd_warshall().has_negative_cycle());

        // the cycle is not reachable from 3
        assert!(!g.bellman_ford(&3).has_negative_cycle);

        // a negative undirected edge can be traversed back and forth
        let g: Graph<u32> = Graph::from_edges(GraphKind::Undirected, [(0, 1, -1.0)]);
        assert!(g.bellman_ford(&0).has_negative_cycle);
    }

    #[test]
    fn path_reconstruction_is_defensive() {
        let mut parents: FxHashMap<u32, Option<u32>> = FxHashMap::default();
        parents.insert(1, None);
        parents.insert(2, Some(3));
        parents.insert(3, Some(2));
        parents.insert(4, Some(1));

        assert_eq!(path_from_parents(&parents, &1, &4), Some(vec![1, 4]));
        assert_eq!(path_from_parents(&parents, &1, &1), Some(vec![1]));
        assert_eq!(path_from_parents(&parents, &1, &2), None);
        assert_eq!(path_from_parents(&parents, &4, &1), None);
    }

    #[test]
    fn observer_reports_settled_vertices() {
        let g = diamond();
        let mut settled = Vec::new();
        let mut relaxed = 0;
        g.dijkstra_with_observer(&'a', &mut |e: DistanceEvent<char>| match e {
            DistanceEvent::Settled(u, d) => settled.push((u, d)),
            DistanceEvent::Relaxed(..) => relaxed += 1,
            DistanceEvent::Start(u) => assert_eq!(u, 'a'),
        });

        assert_eq!(
            settled,
            vec![('a', 0.0), ('b', 1.0), ('c', 3.0), ('d', 4.0)]
        );
        assert_eq!(relaxed, 4);
    }
}
