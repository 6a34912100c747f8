use std::fmt::Display;

use fxhash::FxHashMap;

use super::*;

/// Dense read-only snapshot of a graph.
///
/// Vertices are sorted ascending and row/column `i` belongs to the `i`-th vertex.
/// Entry `(i, j)` holds the weight of edge `(v_i, v_j)` or `None` if absent.
/// For undirected graphs the matrix is symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix<V: Vertex> {
    kind: GraphKind,
    vertices: Vec<V>,
    index: FxHashMap<V, usize>,
    weights: Vec<Option<Weight>>,
    num_edges: NumEdges,
}

impl<V: Vertex> AdjacencyMatrix<V> {
    /// Creates a matrix from any graph
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: WeightedAdjacency<V = V>,
    {
        let vertices = graph.ordered_vertices();
        let index: FxHashMap<V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, u)| (u.clone(), i))
            .collect();

        let n = vertices.len();
        let mut weights = vec![None; n * n];
        for (i, u) in vertices.iter().enumerate() {
            for (v, w) in graph.weighted_neighbors_of(u) {
                weights[i * n + index[v]] = Some(w);
            }
        }

        Self {
            kind: graph.kind(),
            vertices,
            index,
            weights,
            num_edges: graph.number_of_edges(),
        }
    }

    /// Returns the sorted vertices, i.e. the row/column labels
    pub fn labels(&self) -> &[V] {
        &self.vertices
    }

    /// Returns the row/column of `u`
    pub fn index_of(&self, u: &V) -> Option<usize> {
        self.index.get(u).copied()
    }

    /// Returns entry `(i, j)`.
    /// ** Panics if `i >= n || j >= n` **
    pub fn entry(&self, i: usize, j: usize) -> Option<Weight> {
        self.weights[i * self.vertices.len() + j]
    }

    /// Returns row `i`.
    /// ** Panics if `i >= n` **
    pub fn row(&self, i: usize) -> &[Option<Weight>] {
        let n = self.vertices.len();
        &self.weights[i * n..(i + 1) * n]
    }

    /// Converts the matrix back into an adjacency map
    pub fn to_graph(&self) -> Graph<V> {
        Graph::from_graph(self)
    }

    /// Returns *true* if entry `(i, j)` equals entry `(j, i)` for all `i, j`
    pub fn is_symmetric(&self) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| (i + 1..n).all(|j| self.entry(i, j) == self.entry(j, i)))
    }
}

impl<V: Vertex> GraphType for AdjacencyMatrix<V> {
    fn kind(&self) -> GraphKind {
        self.kind
    }
}

impl<V: Vertex> GraphVertexOrder for AdjacencyMatrix<V> {
    type V = V;

    fn number_of_vertices(&self) -> NumVertices {
        self.vertices.len()
    }

    fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    fn has_vertex(&self, u: &V) -> bool {
        self.index.contains_key(u)
    }

    fn ordered_vertices(&self) -> Vec<V> {
        self.vertices.clone()
    }
}

impl<V: Vertex> GraphEdgeOrder for AdjacencyMatrix<V> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<V: Vertex> WeightedAdjacency for AdjacencyMatrix<V> {
    fn weighted_neighbors_of(&self, u: &V) -> impl Iterator<Item = (&V, Weight)> + '_ {
        self.index_of(u).into_iter().flat_map(move |i| {
            self.row(i)
                .iter()
                .zip(self.vertices.iter())
                .filter_map(|(w, v)| w.map(|w| (v, w)))
        })
    }

    fn weight_of(&self, u: &V, v: &V) -> Option<Weight> {
        self.entry(self.index_of(u)?, self.index_of(v)?)
    }

    fn edges(&self) -> impl Iterator<Item = WeightedEdge<V>> + '_ {
        let n = self.vertices.len();
        let directed = self.kind.is_directed();
        (0..n).flat_map(move |i| {
            let first = if directed { 0 } else { i };
            (first..n).filter_map(move |j| {
                self.entry(i, j).map(|w| {
                    WeightedEdge(self.vertices[i].clone(), self.vertices[j].clone(), w)
                })
            })
        })
    }
}

impl<V: Vertex + Display> Display for AdjacencyMatrix<V> {
    /// Renders the matrix as a table; absent edges are printed as `-`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<Vec<String>> = (0..self.vertices.len())
            .map(|i| {
                self.row(i)
                    .iter()
                    .map(|w| w.map_or_else(|| "-".to_string(), |w| w.to_string()))
                    .collect()
            })
            .collect();
        let labels: Vec<String> = self.vertices.iter().map(|v| v.to_string()).collect();

        let width = labels
            .iter()
            .chain(cells.iter().flatten())
            .map(|s| s.len())
            .max()
            .unwrap_or(1);

        write!(f, "{:>width$}", "")?;
        for label in &labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;

        for (label, row) in labels.iter().zip(cells) {
            write!(f, "{label:>width$}")?;
            for cell in row {
                write!(f, " {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
