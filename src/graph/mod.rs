//! Graph containers, views, and the capability traits they implement.
//!
//! Pick a container by access pattern:
//! - [`AdjacencyGraph`]: mutable directed, out-edges only.
//! - [`BidirectionalGraph`]: mutable directed with a mirrored in-edge index.
//! - [`UndirectedGraph`]: mutable undirected, pluggable edge equality.
//! - [`EdgeListGraph`]: mutable flat edge list, derived vertex set.
//! - [`MatrixGraph`]: dense matrix, fixed vertex range, single edge per pair.
//! - [`compiled`]: immutable snapshots, including the CSR layout.
//! - [`adapters`]: borrowing views (reversed, bidirectional-over-directed).
//! - [`delegate`]: closure-backed graphs with no stored structure.
//! - [`ClusteredGraph`]: hierarchy of clusters over adjacency graphs.

pub mod adapters;
pub mod adjacency;
pub mod bidirectional;
pub mod bounds;
pub mod cluster;
pub mod compiled;
pub mod delegate;
pub mod edge;
pub mod edge_list;
pub mod events;
pub mod matrix;
pub mod traits;
pub mod undirected;

pub use adapters::{BidirectionalAdapter, ReversedBidirectionalGraph};
pub use adjacency::AdjacencyGraph;
pub use bidirectional::BidirectionalGraph;
pub use bounds::VertexLike;
pub use cluster::{ClusterHandle, ClusteredGraph};
pub use compiled::{
    ArrayAdjacencyGraph, ArrayBidirectionalGraph, ArrayUndirectedGraph, CsrGraph,
};
pub use delegate::{DelegateIncidenceGraph, DelegateVertexAndEdgeListGraph};
pub use edge::{Edge, EdgeLike, ReversedEdge, UndirectedEdge};
pub use edge_list::EdgeListGraph;
pub use events::{EventHandlers, GraphEvent, SubscriptionId};
pub use matrix::MatrixGraph;
pub use traits::{
    BidirectionalIncidenceGraph, EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph,
    MutableBidirectionalGraph, MutableEdgeSet, MutableIncidenceGraph, MutableVertexAndEdgeSet,
    MutableVertexSet, UndirectedIncidenceGraph, VertexIter, VertexSet,
};
pub use undirected::{
    EdgeEquality, UndirectedGraph, structural_edge_equality, undirected_edge_equality,
};
