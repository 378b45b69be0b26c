//! Immutable snapshot with both out- and in-edge rows.

use hashbrown::HashMap;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph,
    VertexIter, VertexSet,
};

/// Read-only bidirectional graph compiled from an in/out incidence source.
///
/// Both edge orientations are frozen at compilation, so in-degree queries
/// stay O(1) without the mirror bookkeeping of the mutable container.
#[derive(Debug, Clone)]
pub struct ArrayBidirectionalGraph<V, E>
where
    V: VertexLike,
    E: EdgeLike<V>,
{
    vertex_out_edges: HashMap<V, Box<[E]>>,
    vertex_in_edges: HashMap<V, Box<[E]>>,
    edge_count: usize,
    allow_parallel_edges: bool,
}

impl<V: VertexLike, E: EdgeLike<V>> ArrayBidirectionalGraph<V, E> {
    /// Snapshot `source`'s current structure, both directions.
    pub fn from_graph<G>(source: &G) -> Result<Self, GraphError>
    where
        G: VertexSet<Vertex = V, Edge = E> + BidirectionalIncidenceGraph,
    {
        let mut vertex_out_edges = HashMap::with_capacity(source.vertex_count());
        let mut vertex_in_edges = HashMap::with_capacity(source.vertex_count());
        let mut edge_count = 0;
        for v in source.vertices() {
            let outs: Box<[E]> = source.out_edges(&v)?.collect();
            let ins: Box<[E]> = source.in_edges(&v)?.collect();
            edge_count += outs.len();
            vertex_out_edges.insert(v.clone(), outs);
            vertex_in_edges.insert(v, ins);
        }
        Ok(Self {
            vertex_out_edges,
            vertex_in_edges,
            edge_count,
            allow_parallel_edges: source.allows_parallel_edges(),
        })
    }
}

impl<V: VertexLike, E: EdgeLike<V>> Graph for ArrayBidirectionalGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V: VertexLike, E: EdgeLike<V>> ImplicitVertexSet for ArrayBidirectionalGraph<V, E> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertex_out_edges.contains_key(vertex)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> VertexSet for ArrayBidirectionalGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.vertex_out_edges.len()
    }

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(self.vertex_out_edges.keys().cloned())
    }
}

impl<V: VertexLike, E: EdgeLike<V>> EdgeSet for ArrayBidirectionalGraph<V, E> {
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn edges(&self) -> EdgeIter<'_, E> {
        Box::new(
            self.vertex_out_edges
                .values()
                .flat_map(|row| row.iter().cloned()),
        )
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.vertex_out_edges
            .get(edge.source())
            .is_some_and(|row| row.iter().any(|e| e == edge))
    }
}

impl<V: VertexLike, E: EdgeLike<V>> IncidenceGraph for ArrayBidirectionalGraph<V, E> {
    fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.vertex_out_edges
            .get(vertex)
            .map(|row| row.len())
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    fn out_edges(&self, vertex: &V) -> Result<EdgeIter<'_, E>, GraphError> {
        let row = self
            .vertex_out_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        Ok(Box::new(row.iter().cloned()))
    }

    fn out_edge(&self, vertex: &V, index: usize) -> Result<E, GraphError> {
        let row = self
            .vertex_out_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        row.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            degree: row.len(),
        })
    }

    fn try_get_edge(&self, source: &V, target: &V) -> Option<E> {
        let row = self.vertex_out_edges.get(source)?;
        row.iter().find(|e| e.target() == target).cloned()
    }
}

impl<V: VertexLike, E: EdgeLike<V>> BidirectionalIncidenceGraph for ArrayBidirectionalGraph<V, E> {
    fn in_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.vertex_in_edges
            .get(vertex)
            .map(|row| row.len())
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    fn in_edges(&self, vertex: &V) -> Result<EdgeIter<'_, E>, GraphError> {
        let row = self
            .vertex_in_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        Ok(Box::new(row.iter().cloned()))
    }

    fn in_edge(&self, vertex: &V, index: usize) -> Result<E, GraphError> {
        let row = self
            .vertex_in_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        row.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            degree: row.len(),
        })
    }
}
