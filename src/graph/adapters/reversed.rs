//! Live view exchanging the two edge directions of a bidirectional graph.

use crate::error::GraphError;
use crate::graph::edge::ReversedEdge;
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeIter, EdgeSet, Graph, ImplicitVertexSet, VertexIter,
    VertexSet,
};

/// A borrowed view of `G` with every edge reversed.
///
/// Queries delegate to the wrapped graph on each call, so the view is always
/// live: out-edge queries answer from the wrapped in-edges and vice versa,
/// and edges surface as [`ReversedEdge`] wrappers around the originals.
///
/// # Example
/// ```rust
/// use quiver::prelude::*;
///
/// let mut g = BidirectionalGraph::<u32, Edge<u32>>::new();
/// g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
///
/// let rev = ReversedBidirectionalGraph::new(&g);
/// assert_eq!(rev.out_degree(&2).unwrap(), 1);
/// assert!(rev.contains_edge_between(&2, &1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReversedBidirectionalGraph<'g, G> {
    wrapped: &'g G,
}

impl<'g, G> ReversedBidirectionalGraph<'g, G>
where
    G: BidirectionalIncidenceGraph + VertexSet + EdgeSet,
{
    /// View `wrapped` with all edges reversed.
    pub fn new(wrapped: &'g G) -> Self {
        Self { wrapped }
    }

    /// The graph being viewed.
    pub fn wrapped(&self) -> &'g G {
        self.wrapped
    }
}

impl<'g, G> Graph for ReversedBidirectionalGraph<'g, G>
where
    G: BidirectionalIncidenceGraph + VertexSet + EdgeSet,
{
    type Vertex = G::Vertex;
    type Edge = ReversedEdge<G::Edge>;

    fn is_directed(&self) -> bool {
        self.wrapped.is_directed()
    }

    fn allows_parallel_edges(&self) -> bool {
        self.wrapped.allows_parallel_edges()
    }
}

impl<'g, G> ImplicitVertexSet for ReversedBidirectionalGraph<'g, G>
where
    G: BidirectionalIncidenceGraph + VertexSet + EdgeSet,
{
    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.wrapped.contains_vertex(vertex)
    }
}

impl<'g, G> VertexSet for ReversedBidirectionalGraph<'g, G>
where
    G: BidirectionalIncidenceGraph + VertexSet + EdgeSet,
{
    fn vertex_count(&self) -> usize {
        self.wrapped.vertex_count()
    }

    fn vertices(&self) -> VertexIter<'_, G::Vertex> {
        self.wrapped.vertices()
    }
}

impl<'g, G> EdgeSet for ReversedBidirectionalGraph<'g, G>
where
    G: BidirectionalIncidenceGraph + VertexSet + EdgeSet,
{
    fn edge_count(&self) -> usize {
        self.wrapped.edge_count()
    }

    fn edges(&self) -> EdgeIter<'_, ReversedEdge<G::Edge>> {
        Box::new(self.wrapped.edges().map(ReversedEdge::new))
    }

    fn contains_edge(&self, edge: &ReversedEdge<G::Edge>) -> bool {
        self.wrapped.contains_edge(edge.original())
    }
}

impl<'g, G> crate::graph::traits::IncidenceGraph for ReversedBidirectionalGraph<'g, G>
where
    G: BidirectionalIncidenceGraph + VertexSet + EdgeSet,
{
    fn out_degree(&self, vertex: &G::Vertex) -> Result<usize, GraphError> {
        self.wrapped.in_degree(vertex)
    }

    fn out_edges(
        &self,
        vertex: &G::Vertex,
    ) -> Result<EdgeIter<'_, ReversedEdge<G::Edge>>, GraphError> {
        Ok(Box::new(self.wrapped.in_edges(vertex)?.map(ReversedEdge::new)))
    }

    fn out_edge(
        &self,
        vertex: &G::Vertex,
        index: usize,
    ) -> Result<ReversedEdge<G::Edge>, GraphError> {
        self.wrapped.in_edge(vertex, index).map(ReversedEdge::new)
    }

    fn try_get_edge(
        &self,
        source: &G::Vertex,
        target: &G::Vertex,
    ) -> Option<ReversedEdge<G::Edge>> {
        self.wrapped.try_get_edge(target, source).map(ReversedEdge::new)
    }
}

impl<'g, G> BidirectionalIncidenceGraph for ReversedBidirectionalGraph<'g, G>
where
    G: BidirectionalIncidenceGraph + VertexSet + EdgeSet,
{
    fn in_degree(&self, vertex: &G::Vertex) -> Result<usize, GraphError> {
        self.wrapped.out_degree(vertex)
    }

    fn in_edges(
        &self,
        vertex: &G::Vertex,
    ) -> Result<EdgeIter<'_, ReversedEdge<G::Edge>>, GraphError> {
        Ok(Box::new(self.wrapped.out_edges(vertex)?.map(ReversedEdge::new)))
    }

    fn in_edge(
        &self,
        vertex: &G::Vertex,
        index: usize,
    ) -> Result<ReversedEdge<G::Edge>, GraphError> {
        self.wrapped.out_edge(vertex, index).map(ReversedEdge::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::bidirectional::BidirectionalGraph;
    use crate::graph::edge::{Edge, EdgeLike};
    use crate::graph::traits::{IncidenceGraph, MutableVertexAndEdgeSet};

    fn sample() -> BidirectionalGraph<u32, Edge<u32>> {
        let mut g = BidirectionalGraph::new();
        for (s, t) in [(1, 2), (1, 3), (3, 2)] {
            g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
        }
        g
    }

    #[test]
    fn directions_are_exchanged() {
        let g = sample();
        let rev = ReversedBidirectionalGraph::new(&g);
        assert_eq!(rev.out_degree(&2).unwrap(), 2);
        assert_eq!(rev.in_degree(&2).unwrap(), 0);
        assert!(rev.contains_edge_between(&2, &1));
        assert!(!rev.contains_edge_between(&1, &2));
    }

    #[test]
    fn edges_wrap_the_originals() {
        let g = sample();
        let rev = ReversedBidirectionalGraph::new(&g);
        let e = rev.try_get_edge(&2, &1).unwrap();
        assert_eq!(*e.original(), Edge::new(1, 2));
        assert_eq!(*e.source(), 2);
        assert_eq!(rev.edge_count(), 3);
    }

    #[test]
    fn view_is_live() {
        let mut g = sample();
        g.add_vertices_and_edge(Edge::new(4, 2)).unwrap();
        let rev = ReversedBidirectionalGraph::new(&g);
        assert_eq!(rev.out_degree(&2).unwrap(), 3);
    }
}
