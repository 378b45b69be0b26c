//! Edge-list graph: a flat edge collection with a derived vertex set.
//!
//! The container stores nothing but a `Vec` of edges; the vertex set is the
//! set of distinct endpoints, recomputed by scanning. `add_edge` therefore
//! never requires prior vertex membership and vertices cannot be mutated
//! independently of edges.

use itertools::Itertools;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::events::{EventHandlers, GraphEvent, SubscriptionId};
use crate::graph::traits::{
    EdgeIter, EdgeSet, Graph, ImplicitVertexSet, MutableEdgeSet, VertexIter, VertexSet,
};

/// A directed graph held as a bare list of edges.
///
/// Cheap to append to and to stream; every vertex query is an O(edges) scan.
///
/// # Example
/// ```rust
/// use quiver::prelude::*;
///
/// let mut g = EdgeListGraph::<u32, Edge<u32>>::new();
/// g.add_edge(Edge::new(1, 2)).unwrap();
/// g.add_edge(Edge::new(2, 3)).unwrap();
/// assert_eq!(g.vertex_count(), 3);
/// assert!(g.contains_vertex(&3));
/// ```
pub struct EdgeListGraph<V, E>
where
    V: VertexLike,
    E: EdgeLike<V>,
{
    edges: Vec<E>,
    allow_parallel_edges: bool,
    events: EventHandlers<V, E>,
}

impl<V: VertexLike, E: EdgeLike<V>> Default for EdgeListGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexLike, E: EdgeLike<V>> EdgeListGraph<V, E> {
    /// Empty graph, parallel edges allowed.
    pub fn new() -> Self {
        Self::with_parallel_edges(true)
    }

    /// Empty graph with an explicit parallel-edge policy.
    pub fn with_parallel_edges(allow_parallel_edges: bool) -> Self {
        Self {
            edges: Vec::new(),
            allow_parallel_edges,
            events: EventHandlers::default(),
        }
    }

    /// Build directly from an edge collection, applying the parallel-edge
    /// policy edge by edge.
    pub fn from_edges(
        allow_parallel_edges: bool,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self, GraphError> {
        let mut g = Self::with_parallel_edges(allow_parallel_edges);
        g.add_edge_range(edges)?;
        Ok(g)
    }

    /// Register a mutation observer (edge events only; the derived vertex
    /// set produces no vertex events).
    pub fn subscribe(
        &mut self,
        handler: impl Fn(GraphEvent<'_, V, E>) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe_fn(handler)
    }

    /// Drop a previously registered observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Remove all edges, firing one `EdgeRemoved` per edge.
    pub fn clear(&mut self) {
        let edges = std::mem::take(&mut self.edges);
        for e in &edges {
            self.events.emit(GraphEvent::EdgeRemoved(e));
        }
    }
}

impl<V: VertexLike, E: EdgeLike<V>> Graph for EdgeListGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V: VertexLike, E: EdgeLike<V>> ImplicitVertexSet for EdgeListGraph<V, E> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.edges
            .iter()
            .any(|e| e.source() == vertex || e.target() == vertex)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> VertexSet for EdgeListGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.edges
            .iter()
            .flat_map(|e| [e.source(), e.target()])
            .unique()
            .count()
    }

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(
            self.edges
                .iter()
                .flat_map(|e| [e.source(), e.target()])
                .unique()
                .cloned(),
        )
    }
}

impl<V: VertexLike, E: EdgeLike<V>> EdgeSet for EdgeListGraph<V, E> {
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

impl<V: VertexLike, E: EdgeLike<V>> MutableEdgeSet for EdgeListGraph<V, E> {
    /// Endpoints need no prior membership; they join the derived vertex set
    /// by virtue of the edge itself.
    fn add_edge(&mut self, edge: E) -> Result<bool, GraphError> {
        if !self.allow_parallel_edges
            && self
                .edges
                .iter()
                .any(|e| e.source() == edge.source() && e.target() == edge.target())
        {
            return Ok(false);
        }
        self.edges.push(edge);
        if let Some(stored) = self.edges.last() {
            self.events.emit(GraphEvent::EdgeAdded(stored));
        }
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(pos) = self.edges.iter().position(|e| e == edge) else {
            return false;
        };
        let removed = self.edges.remove(pos);
        self.events.emit(GraphEvent::EdgeRemoved(&removed));
        true
    }
}

/// Cloning copies the edge list; subscribers are never shared.
impl<V: VertexLike, E: EdgeLike<V>> Clone for EdgeListGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            edges: self.edges.clone(),
            allow_parallel_edges: self.allow_parallel_edges,
            events: EventHandlers::default(),
        }
    }
}

impl<V: VertexLike, E: EdgeLike<V>> std::fmt::Debug for EdgeListGraph<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeListGraph")
            .field("edges", &self.edges)
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;

    #[test]
    fn vertex_set_is_derived_from_endpoints() {
        let mut g = EdgeListGraph::<u32, Edge<u32>>::new();
        g.add_edge(Edge::new(1, 2)).unwrap();
        g.add_edge(Edge::new(2, 3)).unwrap();
        assert_eq!(g.vertex_count(), 3);
        let mut vs: Vec<u32> = g.vertices().collect();
        vs.sort_unstable();
        assert_eq!(vs, vec![1, 2, 3]);
    }

    #[test]
    fn removing_last_incident_edge_drops_the_vertex() {
        let mut g = EdgeListGraph::<u32, Edge<u32>>::new();
        g.add_edge(Edge::new(1, 2)).unwrap();
        assert!(g.contains_vertex(&2));
        assert!(g.remove_edge(&Edge::new(1, 2)));
        assert!(!g.contains_vertex(&2));
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn parallel_duplicates_are_rejected_as_no_ops() {
        let mut g = EdgeListGraph::<u32, Edge<u32>>::with_parallel_edges(false);
        assert!(g.add_edge(Edge::new(1, 2)).unwrap());
        assert!(!g.add_edge(Edge::new(1, 2)).unwrap());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn vertices_enumerates_in_first_appearance_order() {
        let mut g = EdgeListGraph::<u32, Edge<u32>>::new();
        g.add_edge(Edge::new(3, 1)).unwrap();
        g.add_edge(Edge::new(1, 2)).unwrap();
        let vs: Vec<u32> = g.vertices().collect();
        assert_eq!(vs, vec![3, 1, 2]);
    }
}
