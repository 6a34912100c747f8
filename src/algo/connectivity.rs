/*!
# Connectivity and Graph Statistics

Components are always *weakly* connected components: edge directions are ignored.
*/

use std::collections::VecDeque;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use serde::Serialize;

use super::*;

/// Sorted, duplicate-free neighborhoods of the underlying undirected graph.
/// For directed graphs, `v` is a neighbor of `u` if `(u, v)` or `(v, u)` is an arc.
pub(crate) fn undirected_neighborhoods<G>(graph: &G) -> FxHashMap<&G::V, Vec<&G::V>>
where
    G: WeightedAdjacency,
{
    let mut neighborhoods: FxHashMap<&G::V, Vec<&G::V>> = graph
        .vertices()
        .map(|u| (u, graph.neighbors_of(u).collect_vec()))
        .collect();

    if graph.is_directed() {
        for u in graph.vertices() {
            for v in graph.neighbors_of(u) {
                if let Some(nbs) = neighborhoods.get_mut(v) {
                    nbs.push(u);
                }
            }
        }
    }

    for nbs in neighborhoods.values_mut() {
        nbs.sort_unstable();
        nbs.dedup();
    }
    neighborhoods
}

/// Summary statistics of a graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphInfo<V> {
    pub kind: GraphKind,
    pub vertex_count: NumVertices,
    pub edge_count: NumEdges,
    /// Out-degree of every vertex, sorted by vertex
    pub degrees: Vec<(V, NumVertices)>,
    pub min_degree: NumVertices,
    pub max_degree: NumVertices,
    pub avg_degree: f64,
    pub total_weight: Weight,
    pub min_weight: Weight,
    pub max_weight: Weight,
    pub is_connected: bool,
    pub isolated_vertices: Vec<V>,
}

/// Component structure and sanity checks
pub trait Connectivity: WeightedAdjacency {
    /// Returns the weakly connected components, each sorted, ordered by their smallest vertex
    fn connected_components(&self) -> Vec<Vec<Self::V>> {
        let neighborhoods = undirected_neighborhoods(self);
        let mut visited: FxHashSet<&Self::V> = FxHashSet::default();
        let mut components = Vec::new();

        for start in self.ordered_vertices() {
            let Some((start, _)) = neighborhoods.get_key_value(&start) else {
                continue;
            };
            if !visited.insert(*start) {
                continue;
            }

            let mut component = vec![(*start).clone()];
            let mut queue = VecDeque::from([*start]);
            while let Some(u) = queue.pop_front() {
                for v in &neighborhoods[u] {
                    if visited.insert(*v) {
                        component.push((*v).clone());
                        queue.push_back(*v);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Returns *true* if there is at most one weakly connected component
    fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    /// Returns all vertices without any incident edge, sorted
    fn isolated_vertices(&self) -> Vec<Self::V> {
        let in_degrees = self.in_degrees();
        self.ordered_vertices()
            .into_iter()
            .filter(|u| self.degree_of(u) == 0 && in_degrees.get(u).is_none_or(|d| *d == 0))
            .collect()
    }

    /// Sums the weights along `path`. Steps without an edge contribute nothing.
    fn path_weight(&self, path: &[Self::V]) -> Weight {
        path.iter()
            .tuple_windows()
            .filter_map(|(u, v)| self.weight_of(u, v))
            .sum()
    }

    /// Collects summary statistics
    fn info(&self) -> GraphInfo<Self::V> {
        let degrees = self
            .ordered_vertices()
            .into_iter()
            .map(|u| {
                let d = self.degree_of(&u);
                (u, d)
            })
            .collect_vec();
        let (min_degree, max_degree) = degrees
            .iter()
            .map(|(_, d)| *d)
            .minmax()
            .into_option()
            .unwrap_or((0, 0));
        let avg_degree = if degrees.is_empty() {
            0.0
        } else {
            degrees.iter().map(|(_, d)| *d).sum::<NumVertices>() as f64 / degrees.len() as f64
        };

        let weights = self.edges().map(|e| e.weight()).collect_vec();
        let (min_weight, max_weight) = weights
            .iter()
            .copied()
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
            .unwrap_or((0.0, 0.0));

        GraphInfo {
            kind: self.kind(),
            vertex_count: self.number_of_vertices(),
            edge_count: self.number_of_edges(),
            degrees,
            min_degree,
            max_degree,
            avg_degree,
            total_weight: weights.iter().sum(),
            min_weight,
            max_weight,
            is_connected: self.is_connected(),
            isolated_vertices: self.isolated_vertices(),
        }
    }

    /// Checks that the graph has at least one vertex and no negative edge weight
    fn validate(&self) -> GraphResult<()> {
        if self.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        if let Some(edge) = self
            .ordered_edges()
            .into_iter()
            .find(|e| e.weight() < 0.0)
        {
            return Err(GraphError::NegativeWeight {
                weight: edge.weight(),
                edge: format!("{edge:?}"),
            });
        }

        Ok(())
    }
}

impl<G> Connectivity for G where G: WeightedAdjacency {}

/// Returns a copy of the graph with every arc reversed; undirected graphs are copied as is
pub fn reversed<G>(graph: &G) -> Graph<G::V>
where
    G: WeightedAdjacency,
{
    Graph::from_parts(
        graph.kind(),
        graph.vertices().cloned(),
        graph.edges().map(|e| e.reverse()),
    )
}
