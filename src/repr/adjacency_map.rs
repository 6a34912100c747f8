use tracing::trace;

use super::*;

/// A weighted graph stored as an insertion-ordered map `vertex -> (neighbor -> weight)`.
///
/// - For [`GraphKind::Undirected`] graphs both directions of an edge are stored with the same weight
///   and are always added/removed together.
/// - For [`GraphKind::Directed`] graphs only the outgoing direction is stored; in-neighbors are
///   derived by scanning.
///
/// Iteration order of vertices and neighbors is the insertion order. Algorithms requiring a
/// deterministic order sort explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<V: Vertex> {
    kind: GraphKind,
    adj: FxIndexMap<V, FxIndexMap<V, Weight>>,
    num_edges: NumEdges,
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::new(GraphKind::default())
    }
}

impl<V: Vertex> Graph<V> {
    /// Creates an empty directed graph
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// Creates an empty undirected graph
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    /// Copies any graph into an adjacency map.
    ///
    /// This is the explicit *working copy* algorithms use when they need to destroy edges.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: WeightedAdjacency<V = V>,
    {
        Self::from_parts(graph.kind(), graph.vertices().cloned(), graph.edges())
    }

    /// Returns the neighbor-to-weight map of `u` if `u` exists
    pub fn neighborhood(&self, u: &V) -> Option<&FxIndexMap<V, Weight>> {
        self.adj.get(u)
    }

    /// Removes all edges but keeps all vertices
    pub fn clear_edges(&mut self) {
        for nbs in self.adj.values_mut() {
            nbs.clear();
        }
        self.num_edges = 0;
    }
}

impl<V: Vertex> GraphType for Graph<V> {
    fn kind(&self) -> GraphKind {
        self.kind
    }
}

impl<V: Vertex> GraphVertexOrder for Graph<V> {
    type V = V;

    fn number_of_vertices(&self) -> NumVertices {
        self.adj.len()
    }

    fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adj.keys()
    }

    fn has_vertex(&self, u: &V) -> bool {
        self.adj.contains_key(u)
    }
}

impl<V: Vertex> GraphEdgeOrder for Graph<V> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<V: Vertex> WeightedAdjacency for Graph<V> {
    fn weighted_neighbors_of(&self, u: &V) -> impl Iterator<Item = (&V, Weight)> + '_ {
        self.adj
            .get(u)
            .into_iter()
            .flat_map(|nbs| nbs.iter().map(|(v, w)| (v, *w)))
    }

    fn weight_of(&self, u: &V, v: &V) -> Option<Weight> {
        self.adj.get(u)?.get(v).copied()
    }

    fn degree_of(&self, u: &V) -> NumVertices {
        self.adj.get(u).map_or(0, |nbs| nbs.len())
    }

    fn edges(&self) -> impl Iterator<Item = WeightedEdge<V>> + '_ {
        let directed = self.kind.is_directed();
        self.adj.iter().enumerate().flat_map(move |(i, (u, nbs))| {
            nbs.iter().filter_map(move |(v, w)| {
                // An undirected edge is reported from the endpoint inserted first
                let canonical =
                    directed || self.adj.get_index_of(v).is_some_and(|j| i <= j);
                canonical.then(|| WeightedEdge(u.clone(), v.clone(), *w))
            })
        })
    }
}

impl<V: Vertex> GraphNew for Graph<V> {
    fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            adj: FxIndexMap::default(),
            num_edges: 0,
        }
    }
}

impl<V: Vertex> GraphEditing for Graph<V> {
    fn add_vertex(&mut self, u: V) -> bool {
        if self.adj.contains_key(&u) {
            return false;
        }
        self.adj.insert(u, FxIndexMap::default());
        true
    }

    fn add_edge(&mut self, u: V, v: V, weight: Weight) -> Option<Weight> {
        trace!(?u, ?v, weight, "add edge");
        self.add_vertex(u.clone());
        self.add_vertex(v.clone());
        if self.kind == GraphKind::Undirected && u != v {
            self.adj
                .entry(v.clone())
                .or_default()
                .insert(u.clone(), weight);
        }

        let prev = self.adj.entry(u).or_default().insert(v, weight);
        if prev.is_none() {
            self.num_edges += 1;
        }
        prev
    }

    fn remove_vertex(&mut self, u: &V) -> bool {
        let Some(nbs) = self.adj.shift_remove(u) else {
            return false;
        };

        self.num_edges -= nbs.len();
        match self.kind {
            GraphKind::Undirected => {
                for v in nbs.keys() {
                    if let Some(vnbs) = self.adj.get_mut(v) {
                        vnbs.shift_remove(u);
                    }
                }
            }
            GraphKind::Directed => {
                for vnbs in self.adj.values_mut() {
                    if vnbs.shift_remove(u).is_some() {
                        self.num_edges -= 1;
                    }
                }
            }
        }
        true
    }

    fn remove_edge(&mut self, u: &V, v: &V) -> Option<Weight> {
        let weight = self.adj.get_mut(u)?.shift_remove(v)?;
        if self.kind == GraphKind::Undirected
            && u != v
            && let Some(vnbs) = self.adj.get_mut(v)
        {
            vnbs.shift_remove(u);
        }
        self.num_edges -= 1;
        Some(weight)
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::testing::test_weighted_adjacency;

    test_weighted_adjacency!(graph_queries, |g: &Graph<u32>| g.clone());
    test_weighted_adjacency!(copied_graph_queries, |g: &Graph<u32>| Graph::from_graph(g));

    fn sorted_triples(g: &Graph<char>) -> Vec<(char, char, Weight)> {
        g.ordered_edges().into_iter().map(|e| e.into()).collect_vec()
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut g: Graph<char> = Graph::undirected();
        assert!(g.add_vertex('a'));
        assert!(!g.add_vertex('a'));
        assert_eq!(g.number_of_vertices(), 1);
        assert_eq!(g.number_of_edges(), 0);
        assert!(g.has_vertex(&'a'));
        assert!(!g.has_vertex(&'b'));
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut g: Graph<char> = Graph::undirected();
        assert_eq!(g.add_edge('a', 'b', 2.0), None);
        assert_eq!(g.weight_of(&'a', &'b'), Some(2.0));
        assert_eq!(g.weight_of(&'b', &'a'), Some(2.0));
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(g.number_of_vertices(), 2);

        // last write wins, in both directions
        assert_eq!(g.add_edge('b', 'a', 7.0), Some(2.0));
        assert_eq!(g.weight_of(&'a', &'b'), Some(7.0));
        assert_eq!(g.number_of_edges(), 1);

        assert_eq!(g.remove_edge(&'b', &'a'), Some(7.0));
        assert!(!g.has_edge(&'a', &'b'));
        assert!(!g.has_edge(&'b', &'a'));
        assert_eq!(g.number_of_edges(), 0);
        assert_eq!(g.remove_edge(&'a', &'b'), None);
    }

    #[test]
    fn directed_edges_are_independent() {
        let mut g: Graph<u32> = Graph::directed();
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 1, 3.0);
        assert_eq!(g.number_of_edges(), 2);
        assert_eq!(g.weight_of(&1, &2), Some(1.0));
        assert_eq!(g.weight_of(&2, &1), Some(3.0));

        g.remove_edge(&1, &2);
        assert!(!g.has_edge(&1, &2));
        assert!(g.has_edge(&2, &1));
        assert_eq!(g.number_of_edges(), 1);
    }

    #[test]
    fn degrees() {
        let g: Graph<u32> =
            Graph::from_edges(GraphKind::Directed, [(1, 2, 1.0), (1, 3, 1.0), (3, 2, 1.0)]);
        assert_eq!(g.degree_of(&1), 2);
        assert_eq!(g.in_degree_of(&2), 2);
        assert_eq!(g.in_degree_of(&1), 0);
        assert_eq!(g.degree_of(&42), 0);
        assert_eq!(g.in_neighbors_of(&2).copied().sorted().collect_vec(), vec![1, 3]);

        let in_degrees = g.in_degrees();
        assert_eq!(in_degrees[&2], 2);
        assert_eq!(in_degrees[&3], 1);
        assert_eq!(in_degrees[&1], 0);
    }

    #[test]
    fn remove_vertex_removes_incident_edges() {
        let mut g: Graph<char> = Graph::from_edges(
            GraphKind::Undirected,
            [('a', 'b', 1.0), ('b', 'c', 1.0), ('c', 'a', 1.0), ('c', 'd', 1.0)],
        );
        assert_eq!(g.number_of_edges(), 4);
        assert!(g.remove_vertex(&'c'));
        assert!(!g.remove_vertex(&'c'));
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(g.degree_of(&'d'), 0);
        assert_eq!(sorted_triples(&g), vec![('a', 'b', 1.0)]);

        let mut g: Graph<u32> = Graph::from_edges(
            GraphKind::Directed,
            [(1, 2, 1.0), (2, 3, 1.0), (3, 2, 1.0), (4, 2, 1.0), (2, 2, 1.0)],
        );
        assert!(g.remove_vertex(&2));
        assert_eq!(g.number_of_edges(), 0);
        assert_eq!(g.number_of_vertices(), 3);
    }

    #[test]
    fn undirected_edges_are_reported_once() {
        let g: Graph<char> = Graph::from_edges(
            GraphKind::Undirected,
            [('b', 'a', 1.0), ('b', 'c', 2.0), ('c', 'c', 3.0)],
        );
        let edges = g.edges().collect_vec();
        assert_eq!(edges.len(), g.number_of_edges());
        assert_eq!(edges.len(), 3);
        assert_eq!(
            sorted_triples(&g),
            vec![('a', 'b', 1.0), ('b', 'c', 2.0), ('c', 'c', 3.0)]
        );
        assert_eq!(g.total_weight(), 6.0);
    }

    #[test]
    fn self_loops() {
        let mut g: Graph<u32> = Graph::undirected();
        g.add_edge(1, 1, 5.0);
        assert!(g.has_self_loop(&1));
        assert_eq!(g.degree_of(&1), 1);
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(g.remove_edge(&1, &1), Some(5.0));
        assert_eq!(g.number_of_edges(), 0);
    }

    #[test]
    fn unknown_vertices_are_permissive() {
        let g: Graph<char> = Graph::directed();
        assert_eq!(g.neighbors_of(&'x').count(), 0);
        assert_eq!(g.weight_of(&'x', &'y'), None);
        assert!(!g.has_edge(&'x', &'y'));
        assert!(g.is_empty());
        assert!(g.is_edgeless());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let g1: Graph<u32> =
            Graph::from_edges(GraphKind::Undirected, [(1, 2, 1.0), (2, 3, 4.0)]);
        let g2: Graph<u32> =
            Graph::from_edges(GraphKind::Undirected, [(3, 2, 4.0), (2, 1, 1.0)]);
        assert_eq!(g1, g2);
        assert_eq!(Graph::from_graph(&g1), g2);

        let g3: Graph<u32> = Graph::from_edges(GraphKind::Directed, [(1, 2, 1.0), (2, 3, 4.0)]);
        assert_ne!(g1, g3);
    }

    #[test]
    fn clear_edges_keeps_vertices() {
        let mut g: Graph<u32> = Graph::from_edges(GraphKind::Directed, [(1, 2, 1.0), (2, 3, 4.0)]);
        g.clear_edges();
        assert_eq!(g.number_of_vertices(), 3);
        assert_eq!(g.number_of_edges(), 0);
        assert_eq!(g.ordered_vertices(), vec![1, 2, 3]);
    }
}
