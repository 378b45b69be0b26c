//! GraphError: unified error type for quiver public APIs.
//!
//! Every fallible container operation reports through this enum so callers
//! get a single, non-panicking failure taxonomy across all representations.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for graph container operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A value-domain argument violation (e.g., a matrix graph of order zero).
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An operation referenced a vertex not currently in the graph's vertex set.
    #[error("Vertex `{0}` is not in the graph")]
    VertexNotFound(String),
    /// A valid vertex was given but the incidence index exceeds its degree.
    #[error("Edge index {index} out of range for degree {degree}")]
    IndexOutOfRange {
        /// Requested incidence index.
        index: usize,
        /// Current degree of the vertex.
        degree: usize,
    },
    /// A duplicate edge was treated as a hard error (dense matrix graph only);
    /// incidence-list graphs report a rejected duplicate as `Ok(false)` instead.
    #[error("Parallel edge `{0}` rejected")]
    ParallelEdgeRejected(String),
    /// An operation structurally impossible for this representation.
    #[error("Unsupported graph operation: {0}")]
    NotSupported(&'static str),
}

impl GraphError {
    /// Render an absent vertex into the error payload.
    pub fn vertex_not_found<V: Debug>(vertex: &V) -> Self {
        GraphError::VertexNotFound(format!("{vertex:?}"))
    }

    /// Render a rejected duplicate `(source, target)` pair.
    pub fn parallel_edge_rejected<V: Debug>(source: &V, target: &V) -> Self {
        GraphError::ParallelEdgeRejected(format!("({source:?} -> {target:?})"))
    }
}
