//! Compiled, immutable snapshots of mutable graphs.
//!
//! A compiled graph is built once from a source graph and never mutated;
//! incidence lists collapse into boxed slices (or a single CSR arena) with
//! no spare capacity, no event machinery, and cache-friendly scans. Queries
//! observe exactly the source's structure at compilation time.

pub mod array_adjacency;
pub mod array_bidirectional;
pub mod array_undirected;
pub mod csr;

pub use array_adjacency::ArrayAdjacencyGraph;
pub use array_bidirectional::ArrayBidirectionalGraph;
pub use array_undirected::ArrayUndirectedGraph;
pub use csr::CsrGraph;
