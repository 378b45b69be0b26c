//! Closure-backed graphs over structure the caller computes on demand.
//!
//! Nothing is stored: every query calls back into caller-supplied functions,
//! so the graph tracks whatever external structure the closures consult.
//! Answers are only as stable as those closures; capturing interior-mutable
//! state makes a delegate graph's answers change between calls.

use std::marker::PhantomData;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::traits::{
    EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph, VertexIter, VertexSet,
};

/// Out-edge incidence computed by a lookup function.
///
/// `out_edges_fn(v)` returns `Some(out-edges of v)` for members and `None`
/// for non-members, which doubles as the membership test. The vertex set is
/// implicit and cannot be enumerated; only incidence-level capabilities are
/// offered.
///
/// # Example
/// ```rust
/// use quiver::prelude::*;
///
/// // The infinite graph n -> n + 1.
/// let g = DelegateIncidenceGraph::new(|n: &u64| Some(vec![Edge::new(*n, n + 1)]));
/// assert_eq!(g.out_degree(&41).unwrap(), 1);
/// assert!(g.contains_edge_between(&41, &42));
/// ```
pub struct DelegateIncidenceGraph<V, E, F>
where
    V: VertexLike,
    E: EdgeLike<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    out_edges_fn: F,
    _marker: PhantomData<(V, E)>,
}

impl<V, E, F> DelegateIncidenceGraph<V, E, F>
where
    V: VertexLike,
    E: EdgeLike<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    /// Wrap `out_edges_fn` as a directed incidence graph.
    pub fn new(out_edges_fn: F) -> Self {
        Self {
            out_edges_fn,
            _marker: PhantomData,
        }
    }

    fn lookup(&self, vertex: &V) -> Result<Vec<E>, GraphError> {
        (self.out_edges_fn)(vertex).ok_or_else(|| GraphError::vertex_not_found(vertex))
    }
}

impl<V, E, F> Graph for DelegateIncidenceGraph<V, E, F>
where
    V: VertexLike,
    E: EdgeLike<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    // The lookup function may legitimately return duplicates.
    fn allows_parallel_edges(&self) -> bool {
        true
    }
}

impl<V, E, F> ImplicitVertexSet for DelegateIncidenceGraph<V, E, F>
where
    V: VertexLike,
    E: EdgeLike<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn contains_vertex(&self, vertex: &V) -> bool {
        (self.out_edges_fn)(vertex).is_some()
    }
}

impl<V, E, F> IncidenceGraph for DelegateIncidenceGraph<V, E, F>
where
    V: VertexLike,
    E: EdgeLike<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        Ok(self.lookup(vertex)?.len())
    }

    fn out_edges(&self, vertex: &V) -> Result<EdgeIter<'_, E>, GraphError> {
        Ok(Box::new(self.lookup(vertex)?.into_iter()))
    }

    fn out_edge(&self, vertex: &V, index: usize) -> Result<E, GraphError> {
        let row = self.lookup(vertex)?;
        let degree = row.len();
        row.into_iter()
            .nth(index)
            .ok_or(GraphError::IndexOutOfRange { index, degree })
    }

    fn try_get_edge(&self, source: &V, target: &V) -> Option<E> {
        (self.out_edges_fn)(source)?
            .into_iter()
            .find(|e| e.target() == target)
    }
}

/// Delegate graph with an explicit vertex enumerator on top of the edge
/// lookup.
///
/// Membership is decided by the enumerator alone, and edge-level views are
/// restricted to the declared vertex set: [`EdgeSet::edges`] drops any edge
/// whose target the enumerator does not declare, so a lookup function that
/// over-answers cannot leak edges into the graph-level view.
pub struct DelegateVertexAndEdgeListGraph<V, E, VF, EF>
where
    V: VertexLike,
    E: EdgeLike<V>,
    VF: Fn() -> Vec<V>,
    EF: Fn(&V) -> Option<Vec<E>>,
{
    vertices_fn: VF,
    out_edges_fn: EF,
    _marker: PhantomData<(V, E)>,
}

impl<V, E, VF, EF> DelegateVertexAndEdgeListGraph<V, E, VF, EF>
where
    V: VertexLike,
    E: EdgeLike<V>,
    VF: Fn() -> Vec<V>,
    EF: Fn(&V) -> Option<Vec<E>>,
{
    /// Wrap a vertex enumerator and an out-edge lookup function.
    pub fn new(vertices_fn: VF, out_edges_fn: EF) -> Self {
        Self {
            vertices_fn,
            out_edges_fn,
            _marker: PhantomData,
        }
    }

    fn lookup(&self, vertex: &V) -> Result<Vec<E>, GraphError> {
        if !self.contains_vertex(vertex) {
            return Err(GraphError::vertex_not_found(vertex));
        }
        (self.out_edges_fn)(vertex).ok_or_else(|| GraphError::vertex_not_found(vertex))
    }
}

impl<V, E, VF, EF> Graph for DelegateVertexAndEdgeListGraph<V, E, VF, EF>
where
    V: VertexLike,
    E: EdgeLike<V>,
    VF: Fn() -> Vec<V>,
    EF: Fn(&V) -> Option<Vec<E>>,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allows_parallel_edges(&self) -> bool {
        true
    }
}

impl<V, E, VF, EF> ImplicitVertexSet for DelegateVertexAndEdgeListGraph<V, E, VF, EF>
where
    V: VertexLike,
    E: EdgeLike<V>,
    VF: Fn() -> Vec<V>,
    EF: Fn(&V) -> Option<Vec<E>>,
{
    fn contains_vertex(&self, vertex: &V) -> bool {
        (self.vertices_fn)().contains(vertex)
    }
}

impl<V, E, VF, EF> VertexSet for DelegateVertexAndEdgeListGraph<V, E, VF, EF>
where
    V: VertexLike,
    E: EdgeLike<V>,
    VF: Fn() -> Vec<V>,
    EF: Fn(&V) -> Option<Vec<E>>,
{
    fn vertex_count(&self) -> usize {
        (self.vertices_fn)().len()
    }

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new((self.vertices_fn)().into_iter())
    }
}

impl<V, E, VF, EF> EdgeSet for DelegateVertexAndEdgeListGraph<V, E, VF, EF>
where
    V: VertexLike,
    E: EdgeLike<V>,
    VF: Fn() -> Vec<V>,
    EF: Fn(&V) -> Option<Vec<E>>,
{
    fn edge_count(&self) -> usize {
        self.edges().count()
    }

    fn edges(&self) -> EdgeIter<'_, E> {
        let declared = (self.vertices_fn)();
        let mut collected = Vec::new();
        for v in &declared {
            if let Some(row) = (self.out_edges_fn)(v) {
                for e in row {
                    if declared.contains(e.target()) {
                        collected.push(e);
                    }
                }
            }
        }
        Box::new(collected.into_iter())
    }

    fn contains_edge(&self, edge: &E) -> bool {
        // Both endpoints must be declared before the lookup is consulted; an
        // undeclared source never reaches the lookup function.
        self.contains_vertex(edge.source())
            && self.contains_vertex(edge.target())
            && (self.out_edges_fn)(edge.source())
                .is_some_and(|row| row.iter().any(|e| e == edge))
    }
}

impl<V, E, VF, EF> IncidenceGraph for DelegateVertexAndEdgeListGraph<V, E, VF, EF>
where
    V: VertexLike,
    E: EdgeLike<V>,
    VF: Fn() -> Vec<V>,
    EF: Fn(&V) -> Option<Vec<E>>,
{
    fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        Ok(self.lookup(vertex)?.len())
    }

    fn out_edges(&self, vertex: &V) -> Result<EdgeIter<'_, E>, GraphError> {
        Ok(Box::new(self.lookup(vertex)?.into_iter()))
    }

    fn out_edge(&self, vertex: &V, index: usize) -> Result<E, GraphError> {
        let row = self.lookup(vertex)?;
        let degree = row.len();
        row.into_iter()
            .nth(index)
            .ok_or(GraphError::IndexOutOfRange { index, degree })
    }

    fn try_get_edge(&self, source: &V, target: &V) -> Option<E> {
        if !self.contains_vertex(source) {
            return None;
        }
        (self.out_edges_fn)(source)?
            .into_iter()
            .find(|e| e.target() == target)
    }
}
