/*!
# Vertex Representation

Vertices are opaque keys: the algorithms only require equality, hashing and a total order.
The order is never interpreted numerically; it only serves as a deterministic tie-break
(e.g. BFS/DFS visit neighbors in ascending order) and for sorted output.

Graphs read from files do not know their key type in advance. [`Label`] covers this case by
holding either an integer or a string.
*/

use std::{
    convert::Infallible,
    fmt::{Debug, Display},
    hash::Hash,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Any type usable as a vertex key
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Ord + Debug {}

/// Edge weights (and capacities, distances) are real numbers
pub type Weight = f64;

/// Sentinel distance of unreachable vertices.
///
/// As every edge weight is finite, no finite path sum can ever collide with it.
pub const INFINITY: Weight = Weight::INFINITY;

/// Weight used if none is given explicitly
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// Number of vertices in a graph
pub type NumVertices = usize;

/// Number of edges in a graph (undirected edges are counted once)
pub type NumEdges = usize;

/// A vertex key decided at runtime: integers if the input parses as one, strings otherwise.
///
/// Integers order before strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Name(String),
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Int(x) => write!(f, "{x}"),
            Label::Name(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for Label {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Label::Name(s.to_string()), Label::Int))
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Name(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Name(value)
    }
}
