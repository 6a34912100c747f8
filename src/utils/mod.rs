/*!
# Utilities

Helper structures shared by several algorithms:
- [`UnionFind`]: disjoint sets over arbitrary vertices (used by Kruskal and connectivity checks),
- [`MinScored`]: a heap entry turning [`BinaryHeap`](std::collections::BinaryHeap) into a min-heap
  over `f64` scores (used by Dijkstra and Prim).

Additionally, the hasher aliases used throughout the crate are defined here.
*/

use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};

mod min_scored;
mod union_find;

pub use min_scored::MinScored;
pub use union_find::UnionFind;

/// Insertion-ordered map using `FxHash`
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set using `FxHash`
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;
