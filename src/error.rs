use std::fmt::Debug;

use thiserror::Error;

use crate::vertex::Weight;

/// Errors raised by algorithms invoked on a graph they cannot handle.
///
/// Ordinary absence (unknown start vertex, unreachable target) is never an error:
/// such queries return empty sequences, `None` paths or infinite distances instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("{algorithm} cannot be applied: {reason}")]
    InvalidOperation {
        algorithm: &'static str,
        reason: String,
    },

    #[error("{algorithm} requires vertex {vertex} which is not part of the graph")]
    VertexNotFound {
        algorithm: &'static str,
        vertex: String,
    },

    #[error("graph has no vertices")]
    EmptyGraph,

    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight { edge: String, weight: Weight },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Raised when a graph type is neither `directed` nor `undirected`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown graph type {0:?}, expected directed or undirected")]
pub struct ParseGraphKindError(pub String);

impl GraphError {
    pub(crate) fn invalid_operation(algorithm: &'static str, reason: impl Into<String>) -> Self {
        GraphError::InvalidOperation {
            algorithm,
            reason: reason.into(),
        }
    }

    pub(crate) fn vertex_not_found<V: Debug>(algorithm: &'static str, vertex: &V) -> Self {
        GraphError::VertexNotFound {
            algorithm,
            vertex: format!("{vertex:?}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GraphError::invalid_operation("Kruskal", "graph is directed").to_string(),
            "Kruskal cannot be applied: graph is directed"
        );
        assert_eq!(
            GraphError::vertex_not_found("max-flow", &"t").to_string(),
            "max-flow requires vertex \"t\" which is not part of the graph"
        );
    }
}
