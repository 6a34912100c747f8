use serde::{Deserialize, Serialize};

use super::*;

/// A flat description of a graph: its kind, all vertices (including isolated ones)
/// and every edge once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeList<V> {
    pub kind: GraphKind,
    pub vertices: Vec<V>,
    pub edges: Vec<(V, V, Weight)>,
}

impl<V: Vertex> EdgeList<V> {
    /// Extracts vertices and edges of any graph, both sorted for a stable output
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: WeightedAdjacency<V = V>,
    {
        Self {
            kind: graph.kind(),
            vertices: graph.ordered_vertices(),
            edges: graph
                .ordered_edges()
                .into_iter()
                .map(|e| e.into_parts())
                .collect(),
        }
    }

    /// Builds a graph of any editable representation
    pub fn to_graph<G>(&self) -> G
    where
        G: GraphEditing<V = V>,
    {
        G::from_parts(
            self.kind,
            self.vertices.iter().cloned(),
            self.edges.iter(),
        )
    }

    /// Returns the number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns *true* if there are no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<V: Vertex> From<&Graph<V>> for EdgeList<V> {
    fn from(graph: &Graph<V>) -> Self {
        Self::from_graph(graph)
    }
}

impl<V: Vertex> From<EdgeList<V>> for Graph<V> {
    fn from(list: EdgeList<V>) -> Self {
        Graph::from_parts(list.kind, list.vertices, list.edges)
    }
}
