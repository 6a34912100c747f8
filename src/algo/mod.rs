/*!
# Graph Algorithms

This module provides the classical algorithms on top of the query traits in [`crate::ops`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and gain access to traversals, shortest paths, spanning trees, flows, bipartiteness and Eulerian trails.
Traversals are provided as **iterators**, making it easy to consume results lazily.
*/

mod bipartite;
mod connectivity;
mod eulerian;
mod network_flow;
mod observer;
mod shortest_path;
mod spanning_tree;
mod traversal;

use crate::{prelude::*, utils::*};

pub use bipartite::*;
pub use connectivity::*;
pub use eulerian::*;
pub use network_flow::*;
pub use observer::*;
pub use shortest_path::*;
pub use spanning_tree::*;
pub use traversal::*;
