/*!
# Maximum Flow and Minimum Cut

Edge weights of a directed graph are interpreted as capacities. [`EdmondsKarp`] repeatedly
searches a shortest augmenting path (by number of arcs) in the residual network and saturates
its bottleneck; this guarantees termination after `O(|V| * |E|)` augmentations.

- [`NetworkFlow::ford_fulkerson`] / [`NetworkFlow::edmonds_karp`] return the flow value together
  with the net flow on every arc of the graph,
- [`NetworkFlow::find_min_cut`] additionally splits the vertices into the source- and sink-side
  of a minimum cut.

Both fail with [`GraphError::InvalidOperation`] on undirected graphs and with
[`GraphError::VertexNotFound`] if the source or sink is missing.
If `source == sink`, the flow value is `0` and every arc carries no flow.
*/

use std::collections::VecDeque;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use tracing::{debug, trace};

use super::*;

/// Event emitted for every augmentation
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent<V> {
    AugmentingPath { path: Vec<V>, bottleneck: Weight },
}

/// A source-sink path in the residual network and the amount of flow pushed along it
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentingPath<V> {
    pub path: Vec<V>,
    pub bottleneck: Weight,
}

/// Value of a maximum flow and the net flow on every arc of the graph
#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlow<V: Vertex> {
    pub value: Weight,
    pub flows: FxHashMap<(V, V), Weight>,
}

impl<V: Vertex> MaxFlow<V> {
    /// Returns the flow on arc `(u, v)` or `None` if `(u, v)` is no arc of the graph
    pub fn flow_on(&self, u: &V, v: &V) -> Option<Weight> {
        self.flows.get(&(u.clone(), v.clone())).copied()
    }

    /// Returns all arcs carrying positive flow, sorted
    pub fn arcs_with_flow(&self) -> Vec<(V, V, Weight)> {
        self.flows
            .iter()
            .filter(|(_, f)| **f > 0.0)
            .map(|((u, v), f)| (u.clone(), v.clone(), *f))
            .sorted_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)))
            .collect()
    }
}

/// A minimum source-sink cut
#[derive(Debug, Clone, PartialEq)]
pub struct MinCut<V> {
    /// Vertices reachable from the source in the final residual network (sorted)
    pub source_side: Vec<V>,
    /// All other vertices (sorted)
    pub sink_side: Vec<V>,
    /// Arcs from the source side into the sink side together with their capacity
    pub cut_edges: Vec<WeightedEdge<V>>,
    /// Total capacity of `cut_edges`; equals the maximum flow value
    pub capacity: Weight,
}

/// Edmonds-Karp on a residual network.
///
/// Iterating yields one [`AugmentingPath`] per augmentation and applies it to the residual
/// network. Once exhausted, [`EdmondsKarp::max_flow`] and [`EdmondsKarp::min_cut`] describe the
/// result.
pub struct EdmondsKarp<V: Vertex> {
    residual: FxIndexMap<V, FxIndexMap<V, Weight>>,
    capacities: FxIndexMap<(V, V), Weight>,
    flows: FxHashMap<(V, V), Weight>,
    source: V,
    sink: V,
    value: Weight,
}

impl<V: Vertex> EdmondsKarp<V> {
    /// Builds the residual network of a directed graph.
    /// Vertices and arcs are inserted in sorted order, which fixes the BFS tie-breaking.
    pub fn new<G>(graph: &G, source: V, sink: V) -> GraphResult<Self>
    where
        G: WeightedAdjacency<V = V>,
    {
        if graph.is_undirected() {
            return Err(GraphError::invalid_operation(
                "Edmonds-Karp",
                "maximum flows require a directed graph",
            ));
        }
        for terminal in [&source, &sink] {
            if !graph.has_vertex(terminal) {
                return Err(GraphError::vertex_not_found("Edmonds-Karp", terminal));
            }
        }

        let mut residual: FxIndexMap<V, FxIndexMap<V, Weight>> = graph
            .ordered_vertices()
            .into_iter()
            .map(|u| (u, FxIndexMap::default()))
            .collect();
        let mut capacities = FxIndexMap::default();

        for WeightedEdge(u, v, capacity) in graph.ordered_edges() {
            capacities.insert((u.clone(), v.clone()), capacity);
            if u == v {
                continue;
            }

            residual[&u].insert(v.clone(), capacity);
            // the reverse arc starts empty unless it is an arc itself
            residual[&v].entry(u).or_insert(0.0);
        }

        let flows = capacities.keys().map(|arc| (arc.clone(), 0.0)).collect();
        Ok(Self {
            residual,
            capacities,
            flows,
            source,
            sink,
            value: 0.0,
        })
    }

    /// Remaining capacity of `(u, v)` in the residual network
    pub fn residual_capacity(&self, u: &V, v: &V) -> Weight {
        self.residual
            .get(u)
            .and_then(|nbs| nbs.get(v))
            .copied()
            .unwrap_or(0.0)
    }

    /// Flow value pushed so far
    pub fn value(&self) -> Weight {
        self.value
    }

    /// BFS over arcs with positive residual capacity starting at the source.
    /// Returns the predecessor of every reached vertex.
    fn residual_bfs(&self, stop_at: Option<&V>) -> FxHashMap<V, Option<V>> {
        let mut parents = FxHashMap::default();
        parents.insert(self.source.clone(), None);

        let mut queue = VecDeque::from([&self.source]);
        while let Some(u) = queue.pop_front() {
            for (v, &capacity) in &self.residual[u] {
                if capacity <= 0.0 || parents.contains_key(v) {
                    continue;
                }

                parents.insert(v.clone(), Some(u.clone()));
                if stop_at == Some(v) {
                    return parents;
                }
                queue.push_back(v);
            }
        }

        parents
    }

    fn augment(&mut self, u: &V, v: &V, amount: Weight) {
        self.residual[u][v] -= amount;
        self.residual[v][u] += amount;

        // cancel flow on the opposite arc first
        let mut remaining = amount;
        if let Some(back) = self.flows.get_mut(&(v.clone(), u.clone())) {
            let cancel = back.min(remaining);
            *back -= cancel;
            remaining -= cancel;
        }
        if remaining > 0.0
            && let Some(forward) = self.flows.get_mut(&(u.clone(), v.clone()))
        {
            *forward += remaining;
        }
    }

    /// Returns the maximum flow found so far
    pub fn max_flow(&self) -> MaxFlow<V> {
        MaxFlow {
            value: self.value,
            flows: self.flows.clone(),
        }
    }

    /// Returns the cut induced by the vertices reachable from the source in the residual network.
    /// It is minimum once the iterator is exhausted.
    pub fn min_cut(&self) -> MinCut<V> {
        let reachable: FxHashSet<V> = self.residual_bfs(None).into_keys().collect();
        let (source_side, sink_side): (Vec<V>, Vec<V>) = self
            .residual
            .keys()
            .cloned()
            .partition(|u| reachable.contains(u));

        let cut_edges: Vec<WeightedEdge<V>> = self
            .capacities
            .iter()
            .filter(|((u, v), _)| reachable.contains(u) && !reachable.contains(v))
            .map(|((u, v), c)| WeightedEdge(u.clone(), v.clone(), *c))
            .collect();
        let capacity = cut_edges.iter().map(|e| e.weight()).sum();

        MinCut {
            source_side,
            sink_side,
            cut_edges,
            capacity,
        }
    }
}

impl<V: Vertex> Iterator for EdmondsKarp<V> {
    type Item = AugmentingPath<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source == self.sink {
            return None;
        }

        let parents = self.residual_bfs(Some(&self.sink));
        if !parents.contains_key(&self.sink) {
            return None;
        }

        let mut path = vec![self.sink.clone()];
        while let Some(Some(u)) = path.last().and_then(|v| parents.get(v)) {
            path.push(u.clone());
        }
        path.reverse();

        let bottleneck = path
            .iter()
            .tuple_windows()
            .map(|(u, v)| self.residual_capacity(u, v))
            .fold(INFINITY, Weight::min);

        for (u, v) in path.iter().tuple_windows() {
            self.augment(u, v, bottleneck);
        }
        self.value += bottleneck;

        trace!(?path, bottleneck, "augmenting path");
        Some(AugmentingPath { path, bottleneck })
    }
}

/// Maximum flow algorithms on directed graphs with edge weights as capacities
pub trait NetworkFlow: WeightedAdjacency {
    /// Computes a maximum flow from `source` to `sink` using BFS augmenting paths
    fn ford_fulkerson(&self, source: &Self::V, sink: &Self::V) -> GraphResult<MaxFlow<Self::V>> {
        self.max_flow_with_observer(source, sink, &mut NoObserver)
    }

    /// Same as [`NetworkFlow::ford_fulkerson`]
    fn edmonds_karp(&self, source: &Self::V, sink: &Self::V) -> GraphResult<MaxFlow<Self::V>> {
        self.ford_fulkerson(source, sink)
    }

    /// Computes a maximum flow and reports every augmenting path
    fn max_flow_with_observer<O>(
        &self,
        source: &Self::V,
        sink: &Self::V,
        observer: &mut O,
    ) -> GraphResult<MaxFlow<Self::V>>
    where
        O: Observer<FlowEvent<Self::V>>,
    {
        let mut algo = EdmondsKarp::new(self, source.clone(), sink.clone())?;
        for AugmentingPath { path, bottleneck } in algo.by_ref() {
            observer.notify(FlowEvent::AugmentingPath { path, bottleneck });
        }

        debug!(?source, ?sink, value = algo.value(), "maximum flow computed");
        Ok(algo.max_flow())
    }

    /// Computes a minimum cut separating `source` from `sink`
    fn find_min_cut(&self, source: &Self::V, sink: &Self::V) -> GraphResult<MinCut<Self::V>> {
        let mut algo = EdmondsKarp::new(self, source.clone(), sink.clone())?;
        algo.by_ref().for_each(drop);
        Ok(algo.min_cut())
    }
}

impl<G> NetworkFlow for G where G: WeightedAdjacency {}
