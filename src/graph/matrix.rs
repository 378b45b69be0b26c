//! Dense adjacency-matrix graph over a fixed vertex range `0..order`.
//!
//! One `Option<E>` cell per ordered vertex pair, row-major. The vertex set
//! is fixed at construction and cannot be mutated; at most one edge may
//! occupy a cell, so a duplicate insertion is a hard
//! [`GraphError::ParallelEdgeRejected`] rather than a silent no-op.

use crate::error::GraphError;
use crate::graph::edge::{Edge, EdgeLike};
use crate::graph::events::{EventHandlers, GraphEvent, SubscriptionId};
use crate::graph::traits::{
    BidirectionalIncidenceGraph, EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph,
    MutableBidirectionalGraph, MutableEdgeSet, MutableIncidenceGraph, VertexIter, VertexSet,
};

/// A directed graph stored as a dense `order x order` matrix.
///
/// # Example
/// ```rust
/// use quiver::prelude::*;
///
/// let mut g = MatrixGraph::<Edge<usize>>::new(3).unwrap();
/// g.add_edge(Edge::new(0, 2)).unwrap();
/// assert!(g.contains_edge_between(&0, &2));
/// assert!(g.add_edge(Edge::new(0, 2)).is_err());
/// ```
pub struct MatrixGraph<E = Edge<usize>>
where
    E: EdgeLike<usize>,
{
    order: usize,
    cells: Vec<Option<E>>,
    edge_count: usize,
    events: EventHandlers<usize, E>,
}

impl<E: EdgeLike<usize>> MatrixGraph<E> {
    /// A matrix over vertices `0..order`, initially edgeless. Zero order is
    /// rejected.
    pub fn new(order: usize) -> Result<Self, GraphError> {
        if order == 0 {
            return Err(GraphError::InvalidArgument(
                "matrix graph order must be positive",
            ));
        }
        Ok(Self {
            order,
            cells: (0..order * order).map(|_| None).collect(),
            edge_count: 0,
            events: EventHandlers::default(),
        })
    }

    /// Number of vertices, fixed for the graph's lifetime.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Register a mutation observer. Only edge events can fire; the vertex
    /// set never changes.
    pub fn subscribe(
        &mut self,
        handler: impl Fn(GraphEvent<'_, usize, E>) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe_fn(handler)
    }

    /// Drop a previously registered observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Remove every edge, firing one `EdgeRemoved` per edge. The vertex
    /// range is untouched.
    pub fn clear(&mut self) {
        for i in 0..self.cells.len() {
            if let Some(e) = self.cells[i].take() {
                self.edge_count -= 1;
                self.events.emit(GraphEvent::EdgeRemoved(&e));
            }
        }
    }

    fn cell(&self, source: usize, target: usize) -> usize {
        source * self.order + target
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.order {
            Ok(())
        } else {
            Err(GraphError::vertex_not_found(&vertex))
        }
    }

    fn remove_cell_if(
        &mut self,
        indices: impl Iterator<Item = usize>,
        mut predicate: impl FnMut(&E) -> bool,
    ) -> usize {
        let mut removed = 0;
        for i in indices {
            let matched = self.cells[i].as_ref().is_some_and(&mut predicate);
            if matched {
                if let Some(e) = self.cells[i].take() {
                    self.edge_count -= 1;
                    self.events.emit(GraphEvent::EdgeRemoved(&e));
                    removed += 1;
                }
            }
        }
        removed
    }

    fn row_indices(&self, source: usize) -> impl Iterator<Item = usize> + use<E> {
        let start = source * self.order;
        start..start + self.order
    }

    fn column_indices(&self, target: usize) -> impl Iterator<Item = usize> + use<E> {
        let order = self.order;
        (0..order).map(move |s| s * order + target)
    }
}

impl<E: EdgeLike<usize>> Graph for MatrixGraph<E> {
    type Vertex = usize;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allows_parallel_edges(&self) -> bool {
        false
    }
}

impl<E: EdgeLike<usize>> ImplicitVertexSet for MatrixGraph<E> {
    fn contains_vertex(&self, vertex: &usize) -> bool {
        *vertex < self.order
    }
}

impl<E: EdgeLike<usize>> VertexSet for MatrixGraph<E> {
    fn vertex_count(&self) -> usize {
        self.order
    }

    fn vertices(&self) -> VertexIter<'_, usize> {
        Box::new(0..self.order)
    }
}

impl<E: EdgeLike<usize>> EdgeSet for MatrixGraph<E> {
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn edges(&self) -> EdgeIter<'_, E> {
        Box::new(self.cells.iter().filter_map(|c| c.clone()))
    }

    fn contains_edge(&self, edge: &E) -> bool {
        if *edge.source() >= self.order || *edge.target() >= self.order {
            return false;
        }
        self.cells[self.cell(*edge.source(), *edge.target())]
            .as_ref()
            .is_some_and(|e| e == edge)
    }
}

impl<E: EdgeLike<usize>> IncidenceGraph for MatrixGraph<E> {
    fn out_degree(&self, vertex: &usize) -> Result<usize, GraphError> {
        self.check_vertex(*vertex)?;
        Ok(self
            .row_indices(*vertex)
            .filter(|&i| self.cells[i].is_some())
            .count())
    }

    fn out_edges(&self, vertex: &usize) -> Result<EdgeIter<'_, E>, GraphError> {
        self.check_vertex(*vertex)?;
        let start = *vertex * self.order;
        Ok(Box::new(
            self.cells[start..start + self.order]
                .iter()
                .filter_map(|c| c.clone()),
        ))
    }

    fn out_edge(&self, vertex: &usize, index: usize) -> Result<E, GraphError> {
        self.check_vertex(*vertex)?;
        let start = *vertex * self.order;
        let row = &self.cells[start..start + self.order];
        row.iter()
            .filter_map(|c| c.as_ref())
            .nth(index)
            .cloned()
            .ok_or_else(|| GraphError::IndexOutOfRange {
                index,
                degree: row.iter().filter(|c| c.is_some()).count(),
            })
    }

    fn try_get_edge(&self, source: &usize, target: &usize) -> Option<E> {
        if *source >= self.order || *target >= self.order {
            return None;
        }
        self.cells[self.cell(*source, *target)].clone()
    }
}

impl<E: EdgeLike<usize>> BidirectionalIncidenceGraph for MatrixGraph<E> {
    fn in_degree(&self, vertex: &usize) -> Result<usize, GraphError> {
        self.check_vertex(*vertex)?;
        Ok(self
            .column_indices(*vertex)
            .filter(|&i| self.cells[i].is_some())
            .count())
    }

    fn in_edges(&self, vertex: &usize) -> Result<EdgeIter<'_, E>, GraphError> {
        self.check_vertex(*vertex)?;
        let indices: Vec<usize> = self.column_indices(*vertex).collect();
        Ok(Box::new(
            indices.into_iter().filter_map(|i| self.cells[i].clone()),
        ))
    }

    fn in_edge(&self, vertex: &usize, index: usize) -> Result<E, GraphError> {
        self.check_vertex(*vertex)?;
        let column: Vec<&E> = self
            .column_indices(*vertex)
            .filter_map(|i| self.cells[i].as_ref())
            .collect();
        column
            .get(index)
            .map(|e| (*e).clone())
            .ok_or(GraphError::IndexOutOfRange {
                index,
                degree: column.len(),
            })
    }
}

impl<E: EdgeLike<usize>> MutableEdgeSet for MatrixGraph<E> {
    /// Fails with [`GraphError::ParallelEdgeRejected`] when the target cell
    /// is already occupied.
    fn add_edge(&mut self, edge: E) -> Result<bool, GraphError> {
        self.check_vertex(*edge.source())?;
        self.check_vertex(*edge.target())?;
        let i = self.cell(*edge.source(), *edge.target());
        if self.cells[i].is_some() {
            return Err(GraphError::parallel_edge_rejected(
                edge.source(),
                edge.target(),
            ));
        }
        self.cells[i] = Some(edge);
        self.edge_count += 1;
        if let Some(stored) = self.cells[i].as_ref() {
            self.events.emit(GraphEvent::EdgeAdded(stored));
        }
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        if *edge.source() >= self.order || *edge.target() >= self.order {
            return false;
        }
        let i = self.cell(*edge.source(), *edge.target());
        let matches = self.cells[i].as_ref().is_some_and(|e| e == edge);
        if !matches {
            return false;
        }
        if let Some(e) = self.cells[i].take() {
            self.edge_count -= 1;
            self.events.emit(GraphEvent::EdgeRemoved(&e));
        }
        true
    }

    /// The dense layout has no whole-graph predicate-removal path; use
    /// [`remove_out_edge_if`](MutableIncidenceGraph::remove_out_edge_if) or
    /// [`remove_in_edge_if`](MutableBidirectionalGraph::remove_in_edge_if).
    fn remove_edge_if(
        &mut self,
        _predicate: impl FnMut(&E) -> bool,
    ) -> Result<usize, GraphError> {
        Err(GraphError::NotSupported(
            "matrix graph does not support whole-graph edge predicates",
        ))
    }
}

impl<E: EdgeLike<usize>> MutableIncidenceGraph for MatrixGraph<E> {
    fn remove_out_edge_if(
        &mut self,
        vertex: &usize,
        predicate: impl FnMut(&E) -> bool,
    ) -> Result<usize, GraphError> {
        self.check_vertex(*vertex)?;
        let indices = self.row_indices(*vertex);
        Ok(self.remove_cell_if(indices, predicate))
    }

    fn clear_out_edges(&mut self, vertex: &usize) -> Result<(), GraphError> {
        self.remove_out_edge_if(vertex, |_| true).map(|_| ())
    }
}

impl<E: EdgeLike<usize>> MutableBidirectionalGraph for MatrixGraph<E> {
    fn remove_in_edge_if(
        &mut self,
        vertex: &usize,
        predicate: impl FnMut(&E) -> bool,
    ) -> Result<usize, GraphError> {
        self.check_vertex(*vertex)?;
        let indices = self.column_indices(*vertex);
        Ok(self.remove_cell_if(indices, predicate))
    }

    fn clear_in_edges(&mut self, vertex: &usize) -> Result<(), GraphError> {
        self.remove_in_edge_if(vertex, |_| true).map(|_| ())
    }
}

/// Cloning copies the matrix; subscribers are never shared.
impl<E: EdgeLike<usize>> Clone for MatrixGraph<E> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            cells: self.cells.clone(),
            edge_count: self.edge_count,
            events: EventHandlers::default(),
        }
    }
}

impl<E: EdgeLike<usize>> std::fmt::Debug for MatrixGraph<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixGraph")
            .field("order", &self.order)
            .field("edge_count", &self.edge_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_order_is_rejected() {
        assert!(matches!(
            MatrixGraph::<Edge<usize>>::new(0),
            Err(GraphError::InvalidArgument(_))
        ));
    }

    #[test]
    fn duplicate_cell_is_a_hard_error() {
        let mut g = MatrixGraph::<Edge<usize>>::new(2).unwrap();
        g.add_edge(Edge::new(0, 1)).unwrap();
        assert!(matches!(
            g.add_edge(Edge::new(0, 1)),
            Err(GraphError::ParallelEdgeRejected(_))
        ));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn out_of_range_endpoint_is_vertex_not_found() {
        let mut g = MatrixGraph::<Edge<usize>>::new(2).unwrap();
        assert!(matches!(
            g.add_edge(Edge::new(0, 5)),
            Err(GraphError::VertexNotFound(_))
        ));
    }

    #[test]
    fn degrees_scan_rows_and_columns() {
        let mut g = MatrixGraph::<Edge<usize>>::new(3).unwrap();
        for (s, t) in [(0, 1), (0, 2), (1, 2), (2, 2)] {
            g.add_edge(Edge::new(s, t)).unwrap();
        }
        assert_eq!(g.out_degree(&0).unwrap(), 2);
        assert_eq!(g.in_degree(&2).unwrap(), 3);
        assert_eq!(g.degree(&2).unwrap(), 4);
    }

    #[test]
    fn whole_graph_predicate_removal_is_not_supported() {
        let mut g = MatrixGraph::<Edge<usize>>::new(2).unwrap();
        g.add_edge(Edge::new(0, 1)).unwrap();
        assert!(matches!(
            g.remove_edge_if(|_| true),
            Err(GraphError::NotSupported(_))
        ));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn targeted_predicate_removal_scans_the_column() {
        let mut g = MatrixGraph::<Edge<usize>>::new(3).unwrap();
        for (s, t) in [(0, 2), (1, 2), (2, 0)] {
            g.add_edge(Edge::new(s, t)).unwrap();
        }
        let n = g.remove_in_edge_if(&2, |e| *e.source() == 0).unwrap();
        assert_eq!(n, 1);
        assert_eq!(g.in_degree(&2).unwrap(), 1);
        g.clear_out_edges(&2).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn clear_keeps_the_vertex_range() {
        let mut g = MatrixGraph::<Edge<usize>>::new(2).unwrap();
        g.add_edge(Edge::new(0, 1)).unwrap();
        g.clear();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.vertex_count(), 2);
    }
}
