//! In-edge index bolted onto an out-edge-only graph.

use hashbrown::HashMap;

use crate::error::GraphError;
use crate::graph::edge::EdgeLike;
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph,
    VertexIter, VertexSet,
};

/// Bidirectional view over an out-edge-only graph.
///
/// Out-edge, vertex, and edge queries delegate to the wrapped graph on each
/// call and are therefore live. The in-edge index, by contrast, is built
/// once at construction by a full out-edge sweep and is **not** maintained
/// afterwards: if the wrapped graph mutates while the adapter exists,
/// in-edge answers go stale while out-edge answers stay current. Rebuild the
/// adapter after mutating when fresh in-edge answers are needed.
///
/// A vertex the wrapped graph gained after construction answers in-degree 0
/// rather than an error.
pub struct BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    wrapped: &'g G,
    vertex_in_edges: HashMap<G::Vertex, Vec<G::Edge>>,
}

impl<'g, G> BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    /// Sweep `wrapped`'s out-edges once and index them by target.
    pub fn new(wrapped: &'g G) -> Result<Self, GraphError> {
        let mut vertex_in_edges: HashMap<G::Vertex, Vec<G::Edge>> =
            HashMap::with_capacity(wrapped.vertex_count());
        for v in wrapped.vertices() {
            vertex_in_edges.entry(v).or_default();
        }
        for v in wrapped.vertices() {
            for e in wrapped.out_edges(&v)? {
                let target = e.target().clone();
                vertex_in_edges.entry(target).or_default().push(e);
            }
        }
        Ok(Self {
            wrapped,
            vertex_in_edges,
        })
    }

    /// The graph being viewed.
    pub fn wrapped(&self) -> &'g G {
        self.wrapped
    }
}

impl<'g, G> Graph for BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn is_directed(&self) -> bool {
        self.wrapped.is_directed()
    }

    fn allows_parallel_edges(&self) -> bool {
        self.wrapped.allows_parallel_edges()
    }
}

impl<'g, G> ImplicitVertexSet for BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.wrapped.contains_vertex(vertex)
    }
}

impl<'g, G> VertexSet for BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    fn vertex_count(&self) -> usize {
        self.wrapped.vertex_count()
    }

    fn vertices(&self) -> VertexIter<'_, G::Vertex> {
        self.wrapped.vertices()
    }
}

impl<'g, G> EdgeSet for BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    fn edge_count(&self) -> usize {
        self.wrapped.edge_count()
    }

    fn edges(&self) -> EdgeIter<'_, G::Edge> {
        self.wrapped.edges()
    }

    fn contains_edge(&self, edge: &G::Edge) -> bool {
        self.wrapped.contains_edge(edge)
    }
}

impl<'g, G> IncidenceGraph for BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    fn out_degree(&self, vertex: &G::Vertex) -> Result<usize, GraphError> {
        self.wrapped.out_degree(vertex)
    }

    fn out_edges(&self, vertex: &G::Vertex) -> Result<EdgeIter<'_, G::Edge>, GraphError> {
        self.wrapped.out_edges(vertex)
    }

    fn out_edge(&self, vertex: &G::Vertex, index: usize) -> Result<G::Edge, GraphError> {
        self.wrapped.out_edge(vertex, index)
    }

    fn try_get_edge(&self, source: &G::Vertex, target: &G::Vertex) -> Option<G::Edge> {
        self.wrapped.try_get_edge(source, target)
    }
}

impl<'g, G> BidirectionalIncidenceGraph for BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet,
{
    fn in_degree(&self, vertex: &G::Vertex) -> Result<usize, GraphError> {
        match self.vertex_in_edges.get(vertex) {
            Some(ins) => Ok(ins.len()),
            // Vertex added to the wrapped graph after the sweep.
            None if self.wrapped.contains_vertex(vertex) => Ok(0),
            None => Err(GraphError::vertex_not_found(vertex)),
        }
    }

    fn in_edges(&self, vertex: &G::Vertex) -> Result<EdgeIter<'_, G::Edge>, GraphError> {
        match self.vertex_in_edges.get(vertex) {
            Some(ins) => Ok(Box::new(ins.iter().cloned())),
            None if self.wrapped.contains_vertex(vertex) => Ok(Box::new(std::iter::empty())),
            None => Err(GraphError::vertex_not_found(vertex)),
        }
    }

    fn in_edge(&self, vertex: &G::Vertex, index: usize) -> Result<G::Edge, GraphError> {
        match self.vertex_in_edges.get(vertex) {
            Some(ins) => ins.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
                index,
                degree: ins.len(),
            }),
            None if self.wrapped.contains_vertex(vertex) => {
                Err(GraphError::IndexOutOfRange { index, degree: 0 })
            }
            None => Err(GraphError::vertex_not_found(vertex)),
        }
    }
}

impl<'g, G> std::fmt::Debug for BidirectionalAdapter<'g, G>
where
    G: IncidenceGraph + VertexSet + EdgeSet + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BidirectionalAdapter")
            .field("wrapped", &self.wrapped)
            .field("indexed_vertices", &self.vertex_in_edges.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::adjacency::AdjacencyGraph;
    use crate::graph::edge::Edge;
    use crate::graph::traits::{MutableVertexAndEdgeSet, MutableVertexSet};

    #[test]
    fn in_edges_come_from_the_sweep() {
        let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
        for (s, t) in [(1, 3), (2, 3), (3, 1)] {
            g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
        }
        let adapter = BidirectionalAdapter::new(&g).unwrap();
        assert_eq!(adapter.in_degree(&3).unwrap(), 2);
        assert_eq!(adapter.out_degree(&3).unwrap(), 1);
        assert_eq!(adapter.degree(&3).unwrap(), 3);
        let sources: Vec<u32> = adapter
            .in_edges(&3)
            .unwrap()
            .map(|e| *e.source())
            .collect();
        assert_eq!(sources.len(), 2);
        assert!(sources.contains(&1) && sources.contains(&2));
    }

    #[test]
    fn absent_vertex_is_an_error() {
        let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
        g.add_vertex(1);
        let adapter = BidirectionalAdapter::new(&g).unwrap();
        assert!(matches!(
            adapter.in_degree(&9),
            Err(GraphError::VertexNotFound(_))
        ));
        assert_eq!(adapter.in_degree(&1).unwrap(), 0);
    }
}
