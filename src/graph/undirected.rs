//! Mutable undirected graph with caller-chosen edge equality.
//!
//! Each edge `(u, v)` is filed in both `u`'s and `v`'s incidence list (twice
//! in the same list for a self-loop), so `adjacent_degree` counts a
//! self-loop twice. Lookup is parameterized by an [`EdgeEquality`] function
//! `(edge, source, target) -> bool`; the default only matches the stored
//! orientation, [`undirected_edge_equality`] matches either.

use hashbrown::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::events::{EventHandlers, GraphEvent, SubscriptionId};
use crate::graph::traits::{
    EdgeIter, EdgeSet, Graph, ImplicitVertexSet, MutableEdgeSet, MutableVertexAndEdgeSet,
    MutableVertexSet, UndirectedIncidenceGraph, VertexIter, VertexSet,
};

/// Edge-equality function: does `edge` join `source` and `target`?
pub type EdgeEquality<V, E> = Rc<dyn Fn(&E, &V, &V) -> bool>;

/// Matches only the stored orientation: `edge == (source, target)`.
pub fn structural_edge_equality<V, E>() -> EdgeEquality<V, E>
where
    V: PartialEq + 'static,
    E: EdgeLike<V> + 'static,
{
    Rc::new(|e: &E, s: &V, t: &V| e.source() == s && e.target() == t)
}

/// Matches either orientation: `edge == (source, target)` or
/// `edge == (target, source)`.
pub fn undirected_edge_equality<V, E>() -> EdgeEquality<V, E>
where
    V: PartialEq + 'static,
    E: EdgeLike<V> + 'static,
{
    Rc::new(|e: &E, s: &V, t: &V| {
        (e.source() == s && e.target() == t) || (e.source() == t && e.target() == s)
    })
}

/// A mutable undirected graph backed by shared incidence lists.
///
/// # Example
/// ```rust
/// use quiver::prelude::*;
///
/// let mut g = UndirectedGraph::<u32, Edge<u32>>::new();
/// g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
/// assert_eq!(g.adjacent_degree(&2).unwrap(), 1);
/// // Default equality is orientation-sensitive:
/// assert!(g.contains_adjacent_edge(&1, &2));
/// assert!(!g.contains_adjacent_edge(&2, &1));
/// ```
pub struct UndirectedGraph<V, E>
where
    V: VertexLike,
    E: EdgeLike<V>,
{
    adjacent_edges: HashMap<V, Vec<E>>,
    edges: Vec<E>,
    allow_parallel_edges: bool,
    edge_capacity: usize,
    edge_equality: EdgeEquality<V, E>,
    events: EventHandlers<V, E>,
}

impl<V: VertexLike, E: EdgeLike<V>> Default for UndirectedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexLike, E: EdgeLike<V>> UndirectedGraph<V, E> {
    /// Empty graph: parallel edges allowed, structural edge equality.
    pub fn new() -> Self {
        Self::with_edge_equality(true, structural_edge_equality())
    }

    /// Empty graph with an explicit parallel-edge policy.
    pub fn with_parallel_edges(allow_parallel_edges: bool) -> Self {
        Self::with_edge_equality(allow_parallel_edges, structural_edge_equality())
    }

    /// Empty graph with a caller-supplied edge-equality function.
    pub fn with_edge_equality(
        allow_parallel_edges: bool,
        edge_equality: EdgeEquality<V, E>,
    ) -> Self {
        Self {
            adjacent_edges: HashMap::new(),
            edges: Vec::new(),
            allow_parallel_edges,
            edge_capacity: 0,
            edge_equality,
            events: EventHandlers::default(),
        }
    }

    /// Empty graph with pre-allocation hints (advice only).
    pub fn with_capacity(
        allow_parallel_edges: bool,
        vertex_capacity: usize,
        edge_capacity: usize,
    ) -> Self {
        Self {
            adjacent_edges: HashMap::with_capacity(vertex_capacity),
            edges: Vec::new(),
            allow_parallel_edges,
            edge_capacity,
            edge_equality: structural_edge_equality(),
            events: EventHandlers::default(),
        }
    }

    /// A shared handle on the graph's edge-equality function.
    pub fn edge_equality(&self) -> EdgeEquality<V, E> {
        Rc::clone(&self.edge_equality)
    }

    /// Register a mutation observer.
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

    /// Remove all edges and vertices, edge removal events first.
    pub fn clear(&mut self) {
        let vertices: Vec<V> = self.adjacent_edges.drain().map(|(v, _)| v).collect();
        let edges = std::mem::take(&mut self.edges);
        for e in &edges {
            self.events.emit(GraphEvent::EdgeRemoved(e));
        }
        for v in &vertices {
            self.events.emit(GraphEvent::VertexRemoved(v));
        }
    }

    /// Remove every edge adjacent to `vertex` matching `predicate`,
    /// returning the count (a matching self-loop counts once).
    pub fn remove_adjacent_edge_if(
        &mut self,
        vertex: &V,
        mut predicate: impl FnMut(&E) -> bool,
    ) -> Result<usize, GraphError> {
        let adj = self
            .adjacent_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        let matched: Vec<E> = adj.iter().filter(|e| predicate(e)).cloned().collect();
        let mut removed = 0;
        for e in &matched {
            if self.remove_edge(e) {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn new_edge_list(&self) -> Vec<E> {
        if self.edge_capacity > 0 {
            Vec::with_capacity(self.edge_capacity)
        } else {
            Vec::new()
        }
    }
}

impl<V: VertexLike, E: EdgeLike<V>> Graph for UndirectedGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        false
    }

    fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V: VertexLike, E: EdgeLike<V>> ImplicitVertexSet for UndirectedGraph<V, E> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacent_edges.contains_key(vertex)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> VertexSet for UndirectedGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.adjacent_edges.len()
    }

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(self.adjacent_edges.keys().cloned())
    }
}

impl<V: VertexLike, E: EdgeLike<V>> EdgeSet for UndirectedGraph<V, E> {
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

impl<V: VertexLike, E: EdgeLike<V>> UndirectedIncidenceGraph for UndirectedGraph<V, E> {
    fn adjacent_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.adjacent_edges
            .get(vertex)
            .map(Vec::len)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    fn adjacent_edges(&self, vertex: &V) -> Result<EdgeIter<'_, E>, GraphError> {
        let adj = self
            .adjacent_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        Ok(Box::new(adj.iter().cloned()))
    }

    fn adjacent_edge(&self, vertex: &V, index: usize) -> Result<E, GraphError> {
        let adj = self
            .adjacent_edges
            .get(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        adj.get(index).cloned().ok_or(GraphError::IndexOutOfRange {
            index,
            degree: adj.len(),
        })
    }

    fn try_get_adjacent_edge(&self, source: &V, target: &V) -> Option<E> {
        let adj = self.adjacent_edges.get(source)?;
        adj.iter()
            .find(|e| (self.edge_equality)(e, source, target))
            .cloned()
    }
}

impl<V: VertexLike, E: EdgeLike<V>> MutableVertexSet for UndirectedGraph<V, E> {
    fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacent_edges.contains_key(&vertex) {
            return false;
        }
        let list = self.new_edge_list();
        self.adjacent_edges.insert(vertex.clone(), list);
        self.events.emit(GraphEvent::VertexAdded(&vertex));
        true
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(list) = self.adjacent_edges.remove(vertex) else {
            return false;
        };
        let mut removed = Vec::new();
        for e in list {
            // A self-loop is filed twice in the removed list; the second
            // copy finds no master entry and is skipped.
            let Some(pos) = self.edges.iter().position(|f| *f == e) else {
                continue;
            };
            self.edges.remove(pos);
            let other = if e.source() == vertex {
                e.target()
            } else {
                e.source()
            };
            if other != vertex {
                if let Some(adj) = self.adjacent_edges.get_mut(other) {
                    if let Some(p) = adj.iter().position(|f| f == &e) {
                        adj.remove(p);
                    }
                }
            }
            removed.push(e);
        }
        for e in &removed {
            self.events.emit(GraphEvent::EdgeRemoved(e));
        }
        self.events.emit(GraphEvent::VertexRemoved(vertex));
        true
    }
}

impl<V: VertexLike, E: EdgeLike<V>> MutableEdgeSet for UndirectedGraph<V, E> {
    fn add_edge(&mut self, edge: E) -> Result<bool, GraphError> {
        if !self.adjacent_edges.contains_key(edge.source()) {
            return Err(GraphError::vertex_not_found(edge.source()));
        }
        if !self.adjacent_edges.contains_key(edge.target()) {
            return Err(GraphError::vertex_not_found(edge.target()));
        }
        if !self.allow_parallel_edges
            && self.contains_adjacent_edge(edge.source(), edge.target())
        {
            return Ok(false);
        }
        if let Some(adj) = self.adjacent_edges.get_mut(edge.source()) {
            adj.push(edge.clone());
        }
        if let Some(adj) = self.adjacent_edges.get_mut(edge.target()) {
            adj.push(edge.clone());
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
        // Scrub both filed copies (one list, twice, for a self-loop).
        for endpoint in [removed.source(), removed.target()] {
            if let Some(adj) = self.adjacent_edges.get_mut(endpoint) {
                if let Some(p) = adj.iter().position(|e| e == &removed) {
                    adj.remove(p);
                }
            }
        }
        self.events.emit(GraphEvent::EdgeRemoved(&removed));
        true
    }
}

impl<V: VertexLike, E: EdgeLike<V>> MutableVertexAndEdgeSet for UndirectedGraph<V, E> {}

/// Cloning copies vertices and edges and shares the (pure) edge-equality
/// function; subscribers are never shared.
impl<V: VertexLike, E: EdgeLike<V>> Clone for UndirectedGraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            adjacent_edges: self.adjacent_edges.clone(),
            edges: self.edges.clone(),
            allow_parallel_edges: self.allow_parallel_edges,
            edge_capacity: self.edge_capacity,
            edge_equality: Rc::clone(&self.edge_equality),
            events: EventHandlers::default(),
        }
    }
}

impl<V: VertexLike, E: EdgeLike<V>> fmt::Debug for UndirectedGraph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndirectedGraph")
            .field("adjacent_edges", &self.adjacent_edges)
            .field("edges", &self.edges)
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;

    fn graph_with(edges: &[(u32, u32)]) -> UndirectedGraph<u32, Edge<u32>> {
        let mut g = UndirectedGraph::new();
        for &(s, t) in edges {
            g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
        }
        g
    }

    #[test]
    fn self_loop_counts_twice_in_adjacent_degree() {
        let g = graph_with(&[(1, 1), (1, 2)]);
        assert_eq!(g.adjacent_degree(&1).unwrap(), 3);
        assert_eq!(g.adjacent_degree(&2).unwrap(), 1);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn adjacent_edge_indexes_combined_list() {
        let g = graph_with(&[(1, 2), (3, 1)]);
        // 1's list holds (1,2) then (3,1), in insertion order.
        assert_eq!(g.adjacent_edge(&1, 0).unwrap(), Edge::new(1, 2));
        assert_eq!(g.adjacent_edge(&1, 1).unwrap(), Edge::new(3, 1));
        assert!(matches!(
            g.adjacent_edge(&1, 2),
            Err(GraphError::IndexOutOfRange { index: 2, degree: 2 })
        ));
    }

    #[test]
    fn undirected_equality_matches_either_orientation() {
        let mut g = UndirectedGraph::<u32, Edge<u32>>::with_edge_equality(
            true,
            undirected_edge_equality(),
        );
        g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
        assert!(g.contains_adjacent_edge(&1, &2));
        assert!(g.contains_adjacent_edge(&2, &1));
    }

    #[test]
    fn parallel_policy_uses_edge_equality() {
        let mut g = UndirectedGraph::<u32, Edge<u32>>::with_edge_equality(
            false,
            undirected_edge_equality(),
        );
        g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
        // Under undirected equality the reversed duplicate is rejected too.
        assert!(!g.add_edge(Edge::new(2, 1)).unwrap());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn remove_vertex_drops_shared_copies() {
        let mut g = graph_with(&[(1, 2), (2, 3), (2, 2)]);
        assert!(g.remove_vertex(&2));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.adjacent_degree(&1).unwrap(), 0);
        assert_eq!(g.adjacent_degree(&3).unwrap(), 0);
    }

    #[test]
    fn remove_self_loop_clears_both_copies() {
        let mut g = graph_with(&[(1, 1)]);
        assert!(g.remove_edge(&Edge::new(1, 1)));
        assert_eq!(g.adjacent_degree(&1).unwrap(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn remove_adjacent_edge_if_counts_loops_once() {
        let mut g = graph_with(&[(1, 1), (1, 2), (1, 3)]);
        let n = g
            .remove_adjacent_edge_if(&1, |e| e.is_self_loop() || *e.target() == 2)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(g.edge_count(), 1);
    }
}
