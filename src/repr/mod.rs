/*!
# Graph Representations

- [`Graph`]: the mutable weighted adjacency map every algorithm is usually run on,
- [`AdjacencyMatrix`]: a dense, read-only snapshot indexed by the sorted vertex set,
- [`EdgeList`]: a flat list of vertices and edges, handy for serialization and bulk construction.

All representations convert into each other without loss (vertex set, edge set, weights and kind).
Both [`Graph`] and [`AdjacencyMatrix`] implement the query traits of [`crate::ops`] and can thus be
passed to any algorithm.
*/

use crate::{edge::*, ops::*, utils::*, vertex::*};

mod adjacency_map;
mod edge_list;
mod matrix;

pub use adjacency_map::*;
pub use edge_list::*;
pub use matrix::*;
