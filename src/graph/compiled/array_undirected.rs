//! Immutable undirected snapshot sharing the source's edge-equality rule.

use hashbrown::HashMap;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::traits::{
    EdgeIter, EdgeSet, Graph, ImplicitVertexSet, UndirectedIncidenceGraph, VertexIter, VertexSet,
};
use crate::graph::undirected::{EdgeEquality, UndirectedGraph};

/// Read-only undirected graph compiled from an [`UndirectedGraph`].
///
/// The source's edge-equality function is carried over, so pair lookups
/// answer exactly as the source would have at compilation time.
pub struct ArrayUndirectedGraph<V, E>
where
    V: VertexLike,
    E: EdgeLike<V>,
{
    adjacent_edges: HashMap<V, Box<[E]>>,
    edges: Box<[E]>,
    allow_parallel_edges: bool,
    edge_equality: EdgeEquality<V, E>,
}

impl<V: VertexLike, E: EdgeLike<V>> ArrayUndirectedGraph<V, E> {
    /// Snapshot `source`'s current structure and keep its equality rule.
    pub fn from_graph(source: &UndirectedGraph<V, E>) -> Result<Self, GraphError> {
        let mut adjacent_edges = HashMap::with_capacity(source.vertex_count());
        for v in source.vertices() {
            let row: Box<[E]> = source.adjacent_edges(&v)?.collect();
            adjacent_edges.insert(v, row);
        }
        Ok(Self {
            adjacent_edges,
            edges: source.edges().collect(),
            allow_parallel_edges: source.allows_parallel_edges(),
            edge_equality: source.edge_equality(),
        })
    }
}

impl<V: VertexLike, E: EdgeLike<V>> Graph for ArrayUndirectedGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        false
    }

    fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V: VertexLike, E: EdgeLike<V>> ImplicitVertexSet for ArrayUndirectedGraph<V, E> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacent_edges.contains_key(vertex)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> VertexSet for ArrayUndirectedGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.adjacent_edges.len()
    }

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(self.adjacent_edges.keys().cloned())
    }
}

impl<V: VertexLike, E: EdgeLike<V>> EdgeSet for ArrayUndirectedGraph<V, E> {
    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self) -> EdgeIter<'_, E> {
        Box::new(self.edges.iter().cloned())
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.edges.iter().any(|e| e == edge)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> UndirectedIncidenceGraph for ArrayUndirectedGraph<V, E> {
    fn adjacent_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.adjacent_edges
            .get(vertex)
            .map(|row| row.len())
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    fn adjacent_edges(&self, vertex: &V) -> Result<EdgeIter<'_, E>, GraphError> {
        let row = self
            .adjacent_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        Ok(Box::new(row.iter().cloned()))
    }

    fn adjacent_edge(&self, vertex: &V, index: usize) -> Result<E, GraphError> {
        let row = self
            .adjacent_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        row.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            degree: row.len(),
        })
    }

    fn try_get_adjacent_edge(&self, source: &V, target: &V) -> Option<E> {
        let row = self.adjacent_edges.get(source)?;
        row.iter()
            .find(|e| (self.edge_equality)(e, source, target))
            .cloned()
    }
}

impl<V: VertexLike, E: EdgeLike<V>> Clone for ArrayUndirectedGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            adjacent_edges: self.adjacent_edges.clone(),
            edges: self.edges.clone(),
            allow_parallel_edges: self.allow_parallel_edges,
            edge_equality: std::rc::Rc::clone(&self.edge_equality),
        }
    }
}

impl<V: VertexLike, E: EdgeLike<V>> std::fmt::Debug for ArrayUndirectedGraph<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayUndirectedGraph")
            .field("adjacent_edges", &self.adjacent_edges)
            .field("edges", &self.edges)
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish_non_exhaustive()
    }
}
