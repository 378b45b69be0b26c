//! Mutable directed graph backed by per-vertex out-edge lists.
//!
//! [`AdjacencyGraph`] is the primary growable container: a hash map from
//! vertex to an ordered list of outgoing edges. It supports the full
//! mutation surface (vertices, edges, predicates, cascade removal) and
//! delivers mutation events in the documented order.

use hashbrown::HashMap;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::events::{EventHandlers, GraphEvent, SubscriptionId};
use crate::graph::traits::{
    EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph, MutableEdgeSet,
    MutableIncidenceGraph, MutableVertexAndEdgeSet, MutableVertexSet, VertexIter, VertexSet,
};

/// A mutable, directed, incidence-list graph.
///
/// Parallel edges are allowed by default; construct with
/// [`with_parallel_edges`](Self::with_parallel_edges) to reject duplicates
/// as a no-op. Capacity hints are pre-allocation advice only.
///
/// # Example
/// ```rust
/// use quiver::prelude::*;
///
/// let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
/// g.add_vertex(1);
/// g.add_vertex(2);
/// assert!(g.add_edge(Edge::new(1, 2)).unwrap());
/// assert_eq!(g.out_degree(&1).unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct AdjacencyGraph<V, E>
where
    V: VertexLike,
    E: EdgeLike<V>,
{
    vertex_out_edges: HashMap<V, Vec<E>>,
    edge_count: usize,
    allow_parallel_edges: bool,
    edge_capacity: usize,
    events: EventHandlers<V, E>,
}

impl<V: VertexLike, E: EdgeLike<V>> Default for AdjacencyGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexLike, E: EdgeLike<V>> AdjacencyGraph<V, E> {
    /// Empty graph allowing parallel edges.
    pub fn new() -> Self {
        Self::with_parallel_edges(true)
    }

    /// Empty graph with an explicit parallel-edge policy.
    pub fn with_parallel_edges(allow_parallel_edges: bool) -> Self {
        Self {
            vertex_out_edges: HashMap::new(),
            edge_count: 0,
            allow_parallel_edges,
            edge_capacity: 0,
            events: EventHandlers::default(),
        }
    }

    /// Empty graph with pre-allocation hints. `edge_capacity` sizes each
    /// new vertex's out-edge list; `0` means unspecified. Hints never
    /// truncate or reject content.
    pub fn with_capacity(
        allow_parallel_edges: bool,
        vertex_capacity: usize,
        edge_capacity: usize,
    ) -> Self {
        Self {
            vertex_out_edges: HashMap::with_capacity(vertex_capacity),
            edge_count: 0,
            allow_parallel_edges,
            edge_capacity,
            events: EventHandlers::default(),
        }
    }

    /// Register a mutation observer. Handlers run synchronously on the
    /// mutating call, after the structural change.
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

    /// Remove all edges and all vertices, firing removal events for every
    /// edge first and every vertex after, then reset to empty.
    pub fn clear(&mut self) {
        let drained: Vec<(V, Vec<E>)> = self.vertex_out_edges.drain().collect();
        self.edge_count = 0;
        for (_, edges) in &drained {
            for e in edges {
                self.events.emit(GraphEvent::EdgeRemoved(e));
            }
        }
        for (v, _) in &drained {
            self.events.emit(GraphEvent::VertexRemoved(v));
        }
    }

    fn new_edge_list(&self) -> Vec<E> {
        if self.edge_capacity > 0 {
            Vec::with_capacity(self.edge_capacity)
        } else {
            Vec::new()
        }
    }

    #[cfg(debug_assertions)]
    fn debug_assert_consistent(&self) {
        let total: usize = self.vertex_out_edges.values().map(Vec::len).sum();
        debug_assert_eq!(total, self.edge_count, "edge count out of sync");
        for (src, outs) in &self.vertex_out_edges {
            for e in outs {
                debug_assert_eq!(e.source(), src, "edge filed under wrong source {src:?}");
                debug_assert!(
                    self.vertex_out_edges.contains_key(e.target()),
                    "dangling target {:?} for edge out of {src:?}",
                    e.target()
                );
            }
        }
    }
}

impl<V: VertexLike, E: EdgeLike<V>> Graph for AdjacencyGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V: VertexLike, E: EdgeLike<V>> ImplicitVertexSet for AdjacencyGraph<V, E> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertex_out_edges.contains_key(vertex)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> VertexSet for AdjacencyGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.vertex_out_edges.len()
    }

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(self.vertex_out_edges.keys().cloned())
    }
}

impl<V: VertexLike, E: EdgeLike<V>> EdgeSet for AdjacencyGraph<V, E> {
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn edges(&self) -> EdgeIter<'_, E> {
        Box::new(self.vertex_out_edges.values().flatten().cloned())
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.vertex_out_edges
            .get(edge.source())
            .is_some_and(|outs| outs.iter().any(|e| e == edge))
    }
}

impl<V: VertexLike, E: EdgeLike<V>> IncidenceGraph for AdjacencyGraph<V, E> {
    fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.vertex_out_edges
            .get(vertex)
            .map(Vec::len)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    fn out_edges(&self, vertex: &V) -> Result<EdgeIter<'_, E>, GraphError> {
        let outs = self
            .vertex_out_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        Ok(Box::new(outs.iter().cloned()))
    }

    fn out_edge(&self, vertex: &V, index: usize) -> Result<E, GraphError> {
        let outs = self
            .vertex_out_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        outs.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            degree: outs.len(),
        })
    }

    fn try_get_edge(&self, source: &V, target: &V) -> Option<E> {
        self.vertex_out_edges
            .get(source)?
            .iter()
            .find(|e| e.target() == target)
            .cloned()
    }
}

impl<V: VertexLike, E: EdgeLike<V>> MutableVertexSet for AdjacencyGraph<V, E> {
    fn add_vertex(&mut self, vertex: V) -> bool {
        if self.vertex_out_edges.contains_key(&vertex) {
            return false;
        }
        let list = self.new_edge_list();
        self.vertex_out_edges.insert(vertex.clone(), list);
        self.events.emit(GraphEvent::VertexAdded(&vertex));
        true
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(mut removed) = self.vertex_out_edges.remove(vertex) else {
            return false;
        };
        for outs in self.vertex_out_edges.values_mut() {
            let mut i = 0;
            while i < outs.len() {
                if outs[i].target() == vertex {
                    removed.push(outs.remove(i));
                } else {
                    i += 1;
                }
            }
        }
        self.edge_count -= removed.len();
        log::trace!(
            "remove_vertex cascade dropped {} edge(s) for {vertex:?}",
            removed.len()
        );
        for e in &removed {
            self.events.emit(GraphEvent::EdgeRemoved(e));
        }
        self.events.emit(GraphEvent::VertexRemoved(vertex));
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
        true
    }
}

impl<V: VertexLike, E: EdgeLike<V>> MutableEdgeSet for AdjacencyGraph<V, E> {
    fn add_edge(&mut self, edge: E) -> Result<bool, GraphError> {
        if !self.vertex_out_edges.contains_key(edge.source()) {
            return Err(GraphError::vertex_not_found(edge.source()));
        }
        if !self.vertex_out_edges.contains_key(edge.target()) {
            return Err(GraphError::vertex_not_found(edge.target()));
        }
        let source = edge.source().clone();
        let Some(outs) = self.vertex_out_edges.get_mut(&source) else {
            return Err(GraphError::vertex_not_found(&source));
        };
        if !self.allow_parallel_edges && outs.iter().any(|e| e.target() == edge.target()) {
            return Ok(false);
        }
        outs.push(edge);
        self.edge_count += 1;
        if let Some(stored) = self.vertex_out_edges.get(&source).and_then(|l| l.last()) {
            self.events.emit(GraphEvent::EdgeAdded(stored));
        }
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(outs) = self.vertex_out_edges.get_mut(edge.source()) else {
            return false;
        };
        let Some(pos) = outs.iter().position(|e| e == edge) else {
            return false;
        };
        let removed = outs.remove(pos);
        self.edge_count -= 1;
        self.events.emit(GraphEvent::EdgeRemoved(&removed));
        true
    }
}

impl<V: VertexLike, E: EdgeLike<V>> MutableVertexAndEdgeSet for AdjacencyGraph<V, E> {}

impl<V: VertexLike, E: EdgeLike<V>> MutableIncidenceGraph for AdjacencyGraph<V, E> {
    fn remove_out_edge_if(
        &mut self,
        vertex: &V,
        mut predicate: impl FnMut(&E) -> bool,
    ) -> Result<usize, GraphError> {
        let outs = self
            .vertex_out_edges
            .get_mut(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        let mut removed = Vec::new();
        let mut i = 0;
        while i < outs.len() {
            if predicate(&outs[i]) {
                removed.push(outs.remove(i));
            } else {
                i += 1;
            }
        }
        self.edge_count -= removed.len();
        for e in &removed {
            self.events.emit(GraphEvent::EdgeRemoved(e));
        }
        Ok(removed.len())
    }

    fn clear_out_edges(&mut self, vertex: &V) -> Result<(), GraphError> {
        let outs = self
            .vertex_out_edges
            .get_mut(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        let removed = std::mem::take(outs);
        self.edge_count -= removed.len();
        for e in &removed {
            self.events.emit(GraphEvent::EdgeRemoved(e));
        }
        Ok(())
    }
}

/// Cloning copies vertices and edges; subscribers are never shared.
impl<V: VertexLike, E: EdgeLike<V>> Clone for AdjacencyGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            vertex_out_edges: self.vertex_out_edges.clone(),
            edge_count: self.edge_count,
            allow_parallel_edges: self.allow_parallel_edges,
            edge_capacity: self.edge_capacity,
            events: EventHandlers::default(),
        }
    }
}
