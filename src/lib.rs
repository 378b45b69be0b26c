//! # quiver
//!
//! quiver is a library of in-memory graph containers for Rust. It provides
//! mutable directed, bidirectional, undirected, and edge-list graphs, dense
//! matrix graphs, compiled immutable snapshots (array views and a CSR
//! layout), closure-backed delegate graphs, borrowing adapter views, and a
//! clustered graph hierarchy, all behind a shared tower of capability
//! traits.
//!
//! ## Capability traits
//! Containers implement the subset of [`graph::traits`] their representation
//! can honor; algorithms bound themselves on the minimal capability they
//! need ([`IncidenceGraph`](graph::IncidenceGraph),
//! [`VertexSet`](graph::VertexSet), ...) instead of a concrete container.
//!
//! ## Identity
//! Vertex identity is plain `Eq`/`Hash` on the vertex type; edge identity is
//! `PartialEq` on the edge type. Structural edge types ([`graph::Edge`],
//! [`graph::UndirectedEdge`]) compare by endpoints; an edge type carrying a
//! unique token reproduces per-instance identity.
//!
//! ## Usage
//! ```rust
//! use quiver::prelude::*;
//!
//! let mut g = BidirectionalGraph::<u32, Edge<u32>>::new();
//! g.add_vertices_and_edge(Edge::new(1, 2))?;
//! g.add_vertices_and_edge(Edge::new(3, 2))?;
//! assert_eq!(g.in_degree(&2)?, 2);
//!
//! let frozen = CsrGraph::from_graph(&g)?;
//! assert!(frozen.contains_edge_between(&1, &2));
//! # Ok::<(), quiver::error::GraphError>(())
//! ```

pub mod error;
pub mod graph;

pub use error::GraphError;

/// One-stop import of the capability traits and the common container and
/// edge types.
pub mod prelude {
    pub use crate::error::GraphError;
    pub use crate::graph::adapters::{BidirectionalAdapter, ReversedBidirectionalGraph};
    pub use crate::graph::adjacency::AdjacencyGraph;
    pub use crate::graph::bidirectional::BidirectionalGraph;
    pub use crate::graph::bounds::VertexLike;
    pub use crate::graph::cluster::{ClusterHandle, ClusteredGraph};
    pub use crate::graph::compiled::{
        ArrayAdjacencyGraph, ArrayBidirectionalGraph, ArrayUndirectedGraph, CsrGraph,
    };
    pub use crate::graph::delegate::{DelegateIncidenceGraph, DelegateVertexAndEdgeListGraph};
    pub use crate::graph::edge::{Edge, EdgeLike, ReversedEdge, UndirectedEdge};
    pub use crate::graph::edge_list::EdgeListGraph;
    pub use crate::graph::events::{GraphEvent, SubscriptionId};
    pub use crate::graph::matrix::MatrixGraph;
    pub use crate::graph::traits::{
        BidirectionalIncidenceGraph, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph,
        MutableBidirectionalGraph, MutableEdgeSet, MutableIncidenceGraph,
        MutableVertexAndEdgeSet, MutableVertexSet, UndirectedIncidenceGraph, VertexSet,
    };
    pub use crate::graph::undirected::{
        EdgeEquality, UndirectedGraph, structural_edge_equality, undirected_edge_equality,
    };
}
