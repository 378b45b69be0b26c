//! Capability traits consumed by graph algorithms and adapters.
//!
//! A concrete container implements the subset of capabilities its
//! representation can honor; algorithms bound themselves on the minimal set
//! they need rather than on a concrete graph type. Iterator-returning
//! methods hand back boxed iterators over *owned* items, the only contract
//! every representation (including closure-backed delegate graphs and
//! wrapping adapters) can satisfy uniformly.
//!
//! Failure contracts are uniform across representations: operations keyed on
//! a vertex fail with [`GraphError::VertexNotFound`] when the vertex is
//! absent, and indexed incidence access fails with
//! [`GraphError::IndexOutOfRange`] past the current degree.

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;

/// Boxed iterator over owned vertices, borrowed from a graph.
pub type VertexIter<'a, V> = Box<dyn Iterator<Item = V> + 'a>;
/// Boxed iterator over owned edges, borrowed from a graph.
pub type EdgeIter<'a, E> = Box<dyn Iterator<Item = E> + 'a>;

/// Root capability: associated vertex/edge types and the two fixed policies.
pub trait Graph {
    /// Vertex value type.
    type Vertex: VertexLike;
    /// Edge value type.
    type Edge: EdgeLike<Self::Vertex>;

    /// Whether edges carry intrinsic direction. Fixed for the lifetime of
    /// the representation.
    fn is_directed(&self) -> bool;

    /// Whether two distinct edges with equal `(source, target)` may coexist.
    /// Fixed for the lifetime of the representation.
    fn allows_parallel_edges(&self) -> bool;
}

/// Membership testing without requiring vertex enumeration.
///
/// Delegate-backed graphs can answer membership through their lookup
/// function even when the vertex set cannot be enumerated.
pub trait ImplicitVertexSet: Graph {
    /// `true` when `vertex` is a member of the vertex set.
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;
}

/// Enumerable, countable vertex set.
pub trait VertexSet: ImplicitVertexSet {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Iterate over all vertices, in the container's enumeration order.
    fn vertices(&self) -> VertexIter<'_, Self::Vertex>;

    /// `true` when the vertex set is empty.
    fn is_vertices_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

/// Enumerable, countable edge set.
pub trait EdgeSet: Graph {
    /// Number of edges (parallel edges counted individually).
    fn edge_count(&self) -> usize;

    /// Iterate over all edges.
    fn edges(&self) -> EdgeIter<'_, Self::Edge>;

    /// `true` when an edge equal to `edge` is in the edge set.
    fn contains_edge(&self, edge: &Self::Edge) -> bool;

    /// `true` when the edge set is empty.
    fn is_edges_empty(&self) -> bool {
        self.edge_count() == 0
    }
}

/// Directed, out-edge-only incidence access.
pub trait IncidenceGraph: ImplicitVertexSet {
    /// Out-degree of `vertex`.
    fn out_degree(&self, vertex: &Self::Vertex) -> Result<usize, GraphError>;

    /// Iterate over the out-edges of `vertex`.
    fn out_edges(&self, vertex: &Self::Vertex) -> Result<EdgeIter<'_, Self::Edge>, GraphError>;

    /// The `index`-th out-edge of `vertex`.
    fn out_edge(&self, vertex: &Self::Vertex, index: usize) -> Result<Self::Edge, GraphError>;

    /// First edge `source -> target`, if any.
    fn try_get_edge(&self, source: &Self::Vertex, target: &Self::Vertex) -> Option<Self::Edge>;

    /// `true` when at least one edge `source -> target` exists.
    fn contains_edge_between(&self, source: &Self::Vertex, target: &Self::Vertex) -> bool {
        self.try_get_edge(source, target).is_some()
    }

    /// `true` when `vertex` has no out-edges.
    fn is_out_edges_empty(&self, vertex: &Self::Vertex) -> Result<bool, GraphError> {
        Ok(self.out_degree(vertex)? == 0)
    }
}

/// Adds indexed in-edge access to [`IncidenceGraph`].
pub trait BidirectionalIncidenceGraph: IncidenceGraph {
    /// In-degree of `vertex`.
    fn in_degree(&self, vertex: &Self::Vertex) -> Result<usize, GraphError>;

    /// Iterate over the in-edges of `vertex`.
    fn in_edges(&self, vertex: &Self::Vertex) -> Result<EdgeIter<'_, Self::Edge>, GraphError>;

    /// The `index`-th in-edge of `vertex`.
    fn in_edge(&self, vertex: &Self::Vertex, index: usize) -> Result<Self::Edge, GraphError>;

    /// `true` when `vertex` has no in-edges.
    fn is_in_edges_empty(&self, vertex: &Self::Vertex) -> Result<bool, GraphError> {
        Ok(self.in_degree(vertex)? == 0)
    }

    /// Total degree: in-degree plus out-degree. A self-loop contributes to
    /// both sides and is therefore counted twice.
    fn degree(&self, vertex: &Self::Vertex) -> Result<usize, GraphError> {
        Ok(self.in_degree(vertex)? + self.out_degree(vertex)?)
    }
}

/// Undirected incidence access over a combined per-vertex incidence list.
pub trait UndirectedIncidenceGraph: ImplicitVertexSet {
    /// Length of `vertex`'s combined incidence list. A self-loop appears on
    /// both "sides" of the list and is counted twice.
    fn adjacent_degree(&self, vertex: &Self::Vertex) -> Result<usize, GraphError>;

    /// Iterate over `vertex`'s combined incidence list.
    fn adjacent_edges(&self, vertex: &Self::Vertex) -> Result<EdgeIter<'_, Self::Edge>, GraphError>;

    /// The `index`-th entry of `vertex`'s combined incidence list.
    fn adjacent_edge(&self, vertex: &Self::Vertex, index: usize)
    -> Result<Self::Edge, GraphError>;

    /// First edge joining `source` and `target` under the graph's
    /// edge-equality rule, if any.
    fn try_get_adjacent_edge(
        &self,
        source: &Self::Vertex,
        target: &Self::Vertex,
    ) -> Option<Self::Edge>;

    /// `true` when an edge joins `source` and `target` under the graph's
    /// edge-equality rule.
    fn contains_adjacent_edge(&self, source: &Self::Vertex, target: &Self::Vertex) -> bool {
        self.try_get_adjacent_edge(source, target).is_some()
    }
}

/// Vertex mutation for growable vertex sets.
pub trait MutableVertexSet: VertexSet {
    /// Insert `vertex`; `false` when an equal vertex is already a member
    /// (the set is unchanged and no event fires).
    fn add_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Insert every vertex of `vertices`, returning how many were new.
    fn add_vertex_range(&mut self, vertices: impl IntoIterator<Item = Self::Vertex>) -> usize
    where
        Self: Sized,
    {
        let mut added = 0;
        for v in vertices {
            if self.add_vertex(v) {
                added += 1;
            }
        }
        added
    }

    /// Remove `vertex` and every edge incident to it; `false` when absent.
    /// One `EdgeRemoved` event fires per removed edge, all strictly before
    /// the single `VertexRemoved` event.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> bool;

    /// Remove every vertex matching `predicate` (cascading as
    /// [`remove_vertex`](Self::remove_vertex) does), returning the count.
    fn remove_vertex_if(&mut self, mut predicate: impl FnMut(&Self::Vertex) -> bool) -> usize
    where
        Self: Sized,
    {
        let doomed: Vec<Self::Vertex> = self.vertices().filter(|v| predicate(v)).collect();
        let mut removed = 0;
        for v in &doomed {
            if self.remove_vertex(v) {
                removed += 1;
            }
        }
        removed
    }
}

/// Edge mutation.
///
/// Not bound to [`MutableVertexSet`]: fixed-vertex representations (the
/// dense matrix graph) mutate edges but structurally cannot mutate vertices,
/// which the trait system expresses by the absence of the vertex capability.
pub trait MutableEdgeSet: EdgeSet {
    /// Insert `edge`. Fails with [`GraphError::VertexNotFound`] when either
    /// endpoint is absent. Under `allows_parallel_edges() == false`, a
    /// duplicate `(source, target)` is a rejected no-op reported as
    /// `Ok(false)`, except where the representation documents a hard
    /// [`GraphError::ParallelEdgeRejected`] error instead.
    fn add_edge(&mut self, edge: Self::Edge) -> Result<bool, GraphError>;

    /// Insert every edge of `edges`, returning how many were added.
    fn add_edge_range(
        &mut self,
        edges: impl IntoIterator<Item = Self::Edge>,
    ) -> Result<usize, GraphError>
    where
        Self: Sized,
    {
        let mut added = 0;
        for e in edges {
            if self.add_edge(e)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove the first edge equal to `edge`; `false` when no such edge.
    fn remove_edge(&mut self, edge: &Self::Edge) -> bool;

    /// Remove every edge matching `predicate`, returning the count.
    /// Representations with no predicate-scan path fail with
    /// [`GraphError::NotSupported`].
    fn remove_edge_if(
        &mut self,
        mut predicate: impl FnMut(&Self::Edge) -> bool,
    ) -> Result<usize, GraphError>
    where
        Self: Sized,
    {
        let doomed: Vec<Self::Edge> = self.edges().filter(|e| predicate(e)).collect();
        let mut removed = 0;
        for e in &doomed {
            if self.remove_edge(e) {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Combined vertex-and-edge mutation, with the explicit convenience path
/// that inserts endpoints implied by an edge.
pub trait MutableVertexAndEdgeSet: MutableVertexSet + MutableEdgeSet {
    /// Insert `edge`, first inserting any absent endpoint. This is the only
    /// path on which a graph adds vertices implied by an edge.
    fn add_vertices_and_edge(&mut self, edge: Self::Edge) -> Result<bool, GraphError>
    where
        Self: Sized,
    {
        self.add_vertex(edge.source().clone());
        self.add_vertex(edge.target().clone());
        self.add_edge(edge)
    }

    /// [`add_vertices_and_edge`](Self::add_vertices_and_edge) over a range,
    /// returning how many edges were added.
    fn add_vertices_and_edge_range(
        &mut self,
        edges: impl IntoIterator<Item = Self::Edge>,
    ) -> Result<usize, GraphError>
    where
        Self: Sized,
    {
        let mut added = 0;
        for e in edges {
            if self.add_vertices_and_edge(e)? {
                added += 1;
            }
        }
        Ok(added)
    }
}

/// Out-edge-targeted mutation for directed incidence graphs.
pub trait MutableIncidenceGraph: IncidenceGraph + MutableEdgeSet {
    /// Remove every out-edge of `vertex` matching `predicate`, returning
    /// the count.
    fn remove_out_edge_if(
        &mut self,
        vertex: &Self::Vertex,
        predicate: impl FnMut(&Self::Edge) -> bool,
    ) -> Result<usize, GraphError>;

    /// Remove every out-edge of `vertex`, firing one `EdgeRemoved` each.
    fn clear_out_edges(&mut self, vertex: &Self::Vertex) -> Result<(), GraphError>;
}

/// In-edge-targeted mutation for bidirectional graphs.
pub trait MutableBidirectionalGraph:
    BidirectionalIncidenceGraph + MutableIncidenceGraph
{
    /// Remove every in-edge of `vertex` matching `predicate`, returning
    /// the count.
    fn remove_in_edge_if(
        &mut self,
        vertex: &Self::Vertex,
        predicate: impl FnMut(&Self::Edge) -> bool,
    ) -> Result<usize, GraphError>;

    /// Remove every in-edge of `vertex`, firing one `EdgeRemoved` each.
    fn clear_in_edges(&mut self, vertex: &Self::Vertex) -> Result<(), GraphError>;

    /// Remove every edge incident to `vertex` (both directions).
    fn clear_edges(&mut self, vertex: &Self::Vertex) -> Result<(), GraphError> {
        self.clear_out_edges(vertex)?;
        self.clear_in_edges(vertex)
    }
}
