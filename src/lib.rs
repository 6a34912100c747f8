/*!
`wgraphs` is a graph data structure & algorithms library designed for graphs that are
- **w**eighted : Every edge carries a real-valued weight (`1.0` unless stated otherwise)
- keyed by arbitrary vertices : Any `Clone + Eq + Hash + Ord + Debug` type can act as a vertex
- **directed or undirected** : The kind is fixed when the graph is created

# Representation

A [`Graph`](crate::repr::Graph) stores a *weighted adjacency map*: every vertex maps to an
insertion-ordered map `neighbor -> weight`.
Edges are exchanged as [`WeightedEdge(u, v, weight)`](crate::edge::WeightedEdge).

### Directed vs Undirected

- In an **undirected** graph, an edge `{u, v}` is stored symmetrically: `u -> v` and `v -> u` always carry
  the same weight and are added/removed together.
- In a **directed** graph, `u -> v` and `v -> u` are two independent arcs.

Adding an edge between an existing pair overwrites its weight; there are no multi-edges.
Self-loops are permitted.

# Design

Algorithms only depend on the query traits in [`ops`] (vertices, neighbors, weights, degrees, edges)
and are implemented as extension traits on every graph satisfying them. Thus
```
use wgraphs::{prelude::*, algo::*};

let g = Graph::from_edges(GraphKind::Undirected, [('a', 'b', 1.0), ('b', 'c', 2.0), ('c', 'd', 1.0), ('a', 'd', 5.0)]);
assert_eq!(g.find_shortest_path(&'a', &'d'), (Some(vec!['a', 'b', 'c', 'd']), 4.0));
```
Algorithms with options are additionally provided as configurable structs (e.g. [`algo::Prim`],
[`algo::Hierholzer`]) that one can alter using the *Builder* / *Setter* pattern before running
them on a graph. Every algorithm with a visualization hook accepts an [`algo::Observer`] that is
invoked synchronously at well-defined checkpoints.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes vertices, edges, errors, basic graph operations and all representations,
- [`algo`] includes traversals, shortest paths, spanning trees, network flow, bipartiteness and Eulerian trails,
- [`io`] includes readers/writers for the JSON and the line-oriented text format,
- [`utils`] includes helper structures such as [`UnionFind`](crate::utils::UnionFind).

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.

All algorithms are single-threaded and treat the graph as a read-only snapshot for the duration
of one call. Mutating a graph concurrently with an algorithm call is not supported.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod io;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;
pub mod vertex;

/// `wgraphs::prelude` includes definitions for vertices, edges and errors, all basic graph operation traits as well as all representations.
pub mod prelude {
    pub use super::{edge::*, error::*, ops::*, repr::*, vertex::*};
}
