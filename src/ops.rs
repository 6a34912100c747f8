/*!
# Graph Operations

The query/editing contract every algorithm in [`crate::algo`] is written against.
Algorithms never touch a representation directly: they only call the methods below,
so any type implementing them gets all algorithms for free.

Queries are *permissive*: asking for the neighbors, degree or weight of a vertex that is not
part of the graph yields an empty iterator, `0` or `None` respectively, never a panic.
*/

use std::{fmt::Display, str::FromStr};

use fxhash::FxHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{edge::*, error::ParseGraphKindError, vertex::*};

/// Whether edges have a direction. Fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Directed,
    #[default]
    Undirected,
}

impl GraphKind {
    pub fn is_directed(self) -> bool {
        self == GraphKind::Directed
    }
}

impl FromStr for GraphKind {
    type Err = ParseGraphKindError;

    /// Parses `directed` / `undirected`, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "directed" => Ok(GraphKind::Directed),
            "undirected" => Ok(GraphKind::Undirected),
            _ => Err(ParseGraphKindError(s.to_string())),
        }
    }
}

impl Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphKind::Directed => write!(f, "directed"),
            GraphKind::Undirected => write!(f, "undirected"),
        }
    }
}

/// Provides the kind of a graph
pub trait GraphType {
    /// Returns the kind the graph was created with
    fn kind(&self) -> GraphKind;

    /// Returns *true* if edges are directed
    fn is_directed(&self) -> bool {
        self.kind() == GraphKind::Directed
    }

    /// Returns *true* if edges are undirected
    fn is_undirected(&self) -> bool {
        self.kind() == GraphKind::Undirected
    }
}

/// Provides getters pertaining to the vertex-size of a graph
pub trait GraphVertexOrder {
    /// The vertex key type
    type V: Vertex;

    /// Returns the number of vertices of the graph
    fn number_of_vertices(&self) -> NumVertices;

    /// Returns an iterator over all vertices in a consistent (but unspecified) order
    fn vertices(&self) -> impl Iterator<Item = &Self::V> + '_;

    /// Returns *true* if `u` is a vertex of the graph
    fn has_vertex(&self, u: &Self::V) -> bool;

    /// Returns all vertices in ascending order
    fn ordered_vertices(&self) -> Vec<Self::V> {
        self.vertices().cloned().sorted().collect()
    }

    /// Returns *true* if the graph has no vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_vertices() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph. Undirected edges are counted once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_edgeless(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for weighted neighborhoods & edges
pub trait WeightedAdjacency: GraphType + GraphVertexOrder + GraphEdgeOrder + Sized {
    /// Returns an iterator over the (outgoing) neighbors of `u` together with the edge weights.
    /// Empty if `u` is not part of the graph.
    fn weighted_neighbors_of(&self, u: &Self::V) -> impl Iterator<Item = (&Self::V, Weight)> + '_;

    /// Returns the weight of the edge `(u, v)` or `None` if it does not exist
    fn weight_of(&self, u: &Self::V, v: &Self::V) -> Option<Weight>;

    /// Returns an iterator over all edges.
    ///
    /// Undirected edges are reported exactly once in one canonical direction;
    /// consumers must not assume any particular order.
    fn edges(&self) -> impl Iterator<Item = WeightedEdge<Self::V>> + '_;

    /// Returns an iterator over the (outgoing) neighbors of `u`
    fn neighbors_of(&self, u: &Self::V) -> impl Iterator<Item = &Self::V> + '_ {
        self.weighted_neighbors_of(u).map(|(v, _)| v)
    }

    /// Returns the (outgoing) neighbors of `u` in ascending order
    fn ordered_neighbors_of(&self, u: &Self::V) -> Vec<Self::V> {
        self.neighbors_of(u).cloned().sorted().collect()
    }

    /// Returns the (outgoing) neighbors of `u` with weights in ascending vertex order
    fn ordered_weighted_neighbors_of(&self, u: &Self::V) -> Vec<(Self::V, Weight)> {
        self.weighted_neighbors_of(u)
            .map(|(v, w)| (v.clone(), w))
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect()
    }

    /// Returns the number of adjacency entries of `u` (outgoing for directed graphs).
    /// A self-loop counts once.
    fn degree_of(&self, u: &Self::V) -> NumVertices {
        self.neighbors_of(u).count()
    }

    /// Returns the number of outgoing neighbors of `u`
    fn out_degree_of(&self, u: &Self::V) -> NumVertices {
        self.degree_of(u)
    }

    /// Returns an iterator over all vertices `v` with an edge `(v, u)`.
    ///
    /// Scans all vertices and should be avoided in loops; see [`WeightedAdjacency::in_degrees`].
    fn in_neighbors_of<'a>(&'a self, u: &'a Self::V) -> impl Iterator<Item = &'a Self::V> + 'a {
        self.vertices().filter(move |v| self.weight_of(v, u).is_some())
    }

    /// Returns the number of incoming neighbors of `u`. For undirected graphs this equals the degree.
    fn in_degree_of(&self, u: &Self::V) -> NumVertices {
        if self.is_undirected() {
            self.degree_of(u)
        } else {
            self.in_neighbors_of(u).count()
        }
    }

    /// Returns the in-degree of every vertex in a single pass over all edges
    fn in_degrees(&self) -> FxHashMap<Self::V, NumVertices> {
        let mut in_degrees: FxHashMap<Self::V, NumVertices> =
            self.vertices().map(|u| (u.clone(), 0)).collect();
        for u in self.vertices() {
            for v in self.neighbors_of(u) {
                if let Some(d) = in_degrees.get_mut(v) {
                    *d += 1;
                }
            }
        }
        in_degrees
    }

    /// Returns the maximum (outgoing) degree in the graph
    fn max_degree(&self) -> NumVertices {
        self.vertices().map(|u| self.degree_of(u)).max().unwrap_or(0)
    }

    /// Returns all edges sorted by endpoints. Undirected edges are normalized first.
    fn ordered_edges(&self) -> Vec<WeightedEdge<Self::V>> {
        let directed = self.is_directed();
        self.edges()
            .map(|e| if directed { e } else { e.normalized() })
            .sorted_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)))
            .collect()
    }

    /// Returns the sum of all edge weights (undirected edges counted once)
    fn total_weight(&self) -> Weight {
        self.edges().map(|e| e.weight()).sum()
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: WeightedAdjacency {
    /// Returns *true* if the edge (u,v) exists in the graph.
    fn has_edge(&self, u: &Self::V, v: &Self::V) -> bool {
        self.weight_of(u, v).is_some()
    }

    /// Returns *true* if a self-loop (u,u) exists.
    fn has_self_loop(&self, u: &Self::V) -> bool {
        self.has_edge(u, u)
    }

    /// Returns *true* if there exists an edge (u,v) as well as (v,u) in the graph.
    /// For undirected graphs with edge {u,v} this function always returns *true*.
    fn has_bidirected_edge(&self, u: &Self::V, v: &Self::V) -> bool {
        self.has_edge(u, v) && self.has_edge(v, u)
    }
}

impl<G: WeightedAdjacency> AdjacencyTest for G {}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph of the given kind
    fn new(kind: GraphKind) -> Self;
}

/// Provides functions to insert/delete vertices and edges.
///
/// All operations are idempotent: inserting something present (or removing something absent)
/// is never an error.
pub trait GraphEditing: GraphNew + GraphVertexOrder {
    /// Adds `u` to the graph. Returns *true* exactly if `u` was not present previously.
    fn add_vertex(&mut self, u: Self::V) -> bool;

    /// Adds the edge `(u, v)` with the given weight, adding both endpoints if absent.
    /// For undirected graphs, `(v, u)` is set as well.
    /// An existing edge has its weight overwritten; the previous weight is returned.
    fn add_edge(&mut self, u: Self::V, v: Self::V, weight: Weight) -> Option<Weight>;

    /// Adds the edge `(u, v)` with weight `1.0`
    fn add_unit_edge(&mut self, u: Self::V, v: Self::V) -> Option<Weight> {
        self.add_edge(u, v, DEFAULT_WEIGHT)
    }

    /// Adds all vertices in the collection
    fn add_vertices(&mut self, vertices: impl IntoIterator<Item = Self::V>) {
        for u in vertices {
            self.add_vertex(u);
        }
    }

    /// Adds all edges in the collection
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::V>>>) {
        for WeightedEdge(u, v, w) in edges.into_iter().map(|e| e.into()) {
            self.add_edge(u, v, w);
        }
    }

    /// Removes `u` and all incident edges. Returns *true* if `u` was present.
    fn remove_vertex(&mut self, u: &Self::V) -> bool;

    /// Removes the edge *(u,v)* (and *(v,u)* if undirected).
    /// Returns the weight of the removed edge or `None` if it did not exist.
    fn remove_edge(&mut self, u: &Self::V, v: &Self::V) -> Option<Weight>;
}

/// A super trait for creating a graph from scratch from a set of edges
pub trait GraphFromScratch: GraphVertexOrder {
    /// Create a graph of a given kind from an iterator over edges
    fn from_edges(
        kind: GraphKind,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::V>>>,
    ) -> Self;

    /// Create a graph from vertices (possibly isolated) and edges
    fn from_parts(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = Self::V>,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::V>>>,
    ) -> Self;
}

impl<G: GraphEditing> GraphFromScratch for G {
    fn from_edges(
        kind: GraphKind,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::V>>>,
    ) -> Self {
        let mut graph = Self::new(kind);
        graph.add_edges(edges);
        graph
    }

    fn from_parts(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = Self::V>,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::V>>>,
    ) -> Self {
        let mut graph = Self::new(kind);
        graph.add_vertices(vertices);
        graph.add_edges(edges);
        graph
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_kind() {
        assert_eq!(" Directed\n".parse(), Ok(GraphKind::Directed));
        assert_eq!("UNDIRECTED".parse(), Ok(GraphKind::Undirected));
        assert_eq!(
            "mixed".parse::<GraphKind>(),
            Err(ParseGraphKindError("mixed".to_string()))
        );
        assert_eq!(GraphKind::Undirected.to_string().parse(), Ok(GraphKind::Undirected));
    }
}
