/*!
# Minimum Spanning Trees

[`Prim`] grows a single tree from a start vertex, [`Kruskal`] merges a forest in order of
increasing weight. Both only apply to undirected graphs and fail with
[`GraphError::InvalidOperation`] otherwise.

On a disconnected graph the result is partial: Kruskal returns a minimum spanning forest,
Prim the minimum spanning tree of the start vertex' component. Compare the number of edges
against `|V| - 1` (see [`SpanningForest::is_spanning_tree_of`]) to detect this.

Among several minimum spanning trees the choice is deterministic: Prim prefers lighter, then
smaller edges; Kruskal sorts stably and therefore prefers edges appearing earlier in
[`WeightedAdjacency::edges`].
*/

use std::collections::BinaryHeap;

use fxhash::FxHashSet;
use itertools::Itertools;
use tracing::{debug, trace};

use super::*;

/// Event emitted by the spanning tree algorithms
#[derive(Debug, Clone, PartialEq)]
pub enum SpanningTreeEvent<V> {
    /// The edge is the next candidate
    Considering(WeightedEdge<V>),
    /// The edge was added to the tree
    Added(WeightedEdge<V>),
    /// The edge was rejected as it would close a cycle
    Rejected(WeightedEdge<V>),
}

/// Edges of a minimum spanning tree (or forest) together with their total weight
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest<V> {
    pub edges: Vec<WeightedEdge<V>>,
    pub total_weight: Weight,
}

impl<V> Default for SpanningForest<V> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            total_weight: 0.0,
        }
    }
}

impl<V: Vertex> SpanningForest<V> {
    fn push(&mut self, edge: WeightedEdge<V>) {
        self.total_weight += edge.weight();
        self.edges.push(edge);
    }

    /// Returns the number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns *true* if there are no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns *true* if the forest is a single tree spanning all vertices of `graph`
    pub fn is_spanning_tree_of<G>(&self, graph: &G) -> bool
    where
        G: GraphVertexOrder,
    {
        self.edges.len() + 1 == graph.number_of_vertices()
    }

    /// Returns the edges as `(u, v, weight)` triples
    pub fn triples(&self) -> Vec<(V, V, Weight)> {
        self.edges.iter().map(|e| e.clone().into_parts()).collect()
    }

    /// Builds an undirected graph from the forest
    pub fn to_graph(&self) -> Graph<V> {
        Graph::from_edges(GraphKind::Undirected, self.edges.iter())
    }
}

fn require_undirected<G: GraphType>(graph: &G, algorithm: &'static str) -> GraphResult<()> {
    if graph.is_directed() {
        return Err(GraphError::invalid_operation(
            algorithm,
            "minimum spanning trees require an undirected graph",
        ));
    }
    Ok(())
}

/// Configurable Prim's algorithm.
///
/// Without an explicit start vertex, the search begins at the first vertex of the graph.
#[derive(Debug, Clone)]
pub struct Prim<V> {
    start: Option<V>,
}

impl<V> Default for Prim<V> {
    fn default() -> Self {
        Self { start: None }
    }
}

impl<V: Vertex> Prim<V> {
    /// Creates a new (default) instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the start vertex
    pub fn set_start(&mut self, start: V) {
        self.start = Some(start);
    }

    /// Updates the start vertex
    pub fn start(mut self, start: V) -> Self {
        self.set_start(start);
        self
    }

    /// Runs Prim on an undirected graph
    pub fn run<G>(&self, graph: &G) -> GraphResult<SpanningForest<V>>
    where
        G: WeightedAdjacency<V = V>,
    {
        self.run_with_observer(graph, &mut NoObserver)
    }

    /// Runs Prim on an undirected graph, reporting every candidate edge
    pub fn run_with_observer<G, O>(
        &self,
        graph: &G,
        observer: &mut O,
    ) -> GraphResult<SpanningForest<V>>
    where
        G: WeightedAdjacency<V = V>,
        O: Observer<SpanningTreeEvent<V>>,
    {
        require_undirected(graph, "Prim")?;

        let mut forest = SpanningForest::default();
        let Some(start) = self.start.as_ref().or_else(|| graph.vertices().next()) else {
            return Ok(forest);
        };
        if !graph.has_vertex(start) {
            debug!(?start, "prim start vertex is not part of the graph");
            return Ok(forest);
        }

        let target = graph.number_of_vertices() - 1;
        let mut in_tree = FxHashSet::default();
        let mut heap = BinaryHeap::new();

        let grow = |u: &V, in_tree: &mut FxHashSet<V>, heap: &mut BinaryHeap<MinScored<(V, V)>>| {
            in_tree.insert(u.clone());
            for (v, w) in graph.weighted_neighbors_of(u) {
                if !in_tree.contains(v) {
                    heap.push(MinScored(w, (u.clone(), v.clone())));
                }
            }
        };

        grow(start, &mut in_tree, &mut heap);
        while forest.len() < target {
            let Some(MinScored(w, (u, v))) = heap.pop() else {
                break;
            };

            let edge = WeightedEdge(u, v, w);
            observer.notify(SpanningTreeEvent::Considering(edge.clone()));
            if in_tree.contains(&edge.1) {
                observer.notify(SpanningTreeEvent::Rejected(edge));
                continue;
            }

            trace!(?edge, "prim adds edge");
            grow(&edge.1, &mut in_tree, &mut heap);
            observer.notify(SpanningTreeEvent::Added(edge.clone()));
            forest.push(edge);
        }

        debug!(
            edges = forest.len(),
            total_weight = forest.total_weight,
            "prim finished"
        );
        Ok(forest)
    }
}

/// Configurable Kruskal's algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct Kruskal;

impl Kruskal {
    /// Creates a new (default) instance
    pub fn new() -> Self {
        Self
    }

    /// Runs Kruskal on an undirected graph
    pub fn run<G>(&self, graph: &G) -> GraphResult<SpanningForest<G::V>>
    where
        G: WeightedAdjacency,
    {
        self.run_with_observer(graph, &mut NoObserver)
    }

    /// Runs Kruskal on an undirected graph, reporting every edge in the order it is processed
    pub fn run_with_observer<G, O>(
        &self,
        graph: &G,
        observer: &mut O,
    ) -> GraphResult<SpanningForest<G::V>>
    where
        G: WeightedAdjacency,
        O: Observer<SpanningTreeEvent<G::V>>,
    {
        require_undirected(graph, "Kruskal")?;

        let mut forest = SpanningForest::default();
        let target = graph.number_of_vertices().saturating_sub(1);
        let mut components: UnionFind<G::V> = graph.vertices().cloned().collect();

        // `sorted_by` is stable: equal weights keep their order in `edges()`
        let edges = graph
            .edges()
            .sorted_by(|a, b| a.weight().total_cmp(&b.weight()));

        for edge in edges {
            if forest.len() >= target {
                break;
            }

            observer.notify(SpanningTreeEvent::Considering(edge.clone()));
            if components.union(edge.0.clone(), edge.1.clone()) {
                trace!(?edge, "kruskal adds edge");
                observer.notify(SpanningTreeEvent::Added(edge.clone()));
                forest.push(edge);
            } else {
                observer.notify(SpanningTreeEvent::Rejected(edge));
            }
        }

        debug!(
            edges = forest.len(),
            total_weight = forest.total_weight,
            components = components.number_of_sets(),
            "kruskal finished"
        );
        Ok(forest)
    }
}

/// Provides minimum spanning tree algorithms with default settings
pub trait MinimumSpanningTree: WeightedAdjacency {
    /// Runs [`Prim`] starting at the first vertex of the graph
    fn prim(&self) -> GraphResult<SpanningForest<Self::V>> {
        Prim::new().run(self)
    }

    /// Runs [`Prim`] starting at `start`
    fn prim_from(&self, start: &Self::V) -> GraphResult<SpanningForest<Self::V>> {
        Prim::new().start(start.clone()).run(self)
    }

    /// Runs [`Kruskal`]
    fn kruskal(&self) -> GraphResult<SpanningForest<Self::V>> {
        Kruskal::new().run(self)
    }
}

impl<G> MinimumSpanningTree for G where G: WeightedAdjacency {}
