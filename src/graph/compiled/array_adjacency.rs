//! Immutable out-edge snapshot with boxed-slice incidence rows.

use hashbrown::HashMap;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::traits::{
    EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph, VertexIter, VertexSet,
};

/// Read-only directed graph compiled from any out-edge incidence source.
///
/// Each vertex's out-edges are frozen into a `Box<[E]>` row; the
/// parallel-edge policy is copied from the source and reported unchanged.
#[derive(Debug, Clone)]
pub struct ArrayAdjacencyGraph<V, E>
where
    V: VertexLike,
    E: EdgeLike<V>,
{
    vertex_out_edges: HashMap<V, Box<[E]>>,
    edge_count: usize,
    allow_parallel_edges: bool,
}

impl<V: VertexLike, E: EdgeLike<V>> ArrayAdjacencyGraph<V, E> {
    /// Snapshot `source`'s current structure.
    pub fn from_graph<G>(source: &G) -> Result<Self, GraphError>
    where
        G: VertexSet<Vertex = V, Edge = E> + IncidenceGraph,
    {
        let mut vertex_out_edges = HashMap::with_capacity(source.vertex_count());
        let mut edge_count = 0;
        for v in source.vertices() {
            let row: Box<[E]> = source.out_edges(&v)?.collect();
            edge_count += row.len();
            vertex_out_edges.insert(v, row);
        }
        Ok(Self {
            vertex_out_edges,
            edge_count,
            allow_parallel_edges: source.allows_parallel_edges(),
        })
    }
}

impl<V: VertexLike, E: EdgeLike<V>> Graph for ArrayAdjacencyGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V: VertexLike, E: EdgeLike<V>> ImplicitVertexSet for ArrayAdjacencyGraph<V, E> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertex_out_edges.contains_key(vertex)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> VertexSet for ArrayAdjacencyGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.vertex_out_edges.len()
    }

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(self.vertex_out_edges.keys().cloned())
    }
}

impl<V: VertexLike, E: EdgeLike<V>> EdgeSet for ArrayAdjacencyGraph<V, E> {
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

impl<V: VertexLike, E: EdgeLike<V>> IncidenceGraph for ArrayAdjacencyGraph<V, E> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::adjacency::AdjacencyGraph;
    use crate::graph::edge::Edge;
    use crate::graph::traits::{MutableVertexAndEdgeSet, MutableVertexSet};

    #[test]
    fn snapshot_preserves_structure_and_policy() {
        let mut g = AdjacencyGraph::<u32, Edge<u32>>::with_parallel_edges(false);
        g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
        g.add_vertices_and_edge(Edge::new(2, 3)).unwrap();
        g.add_vertex(4);

        let frozen = ArrayAdjacencyGraph::from_graph(&g).unwrap();
        assert_eq!(frozen.vertex_count(), 4);
        assert_eq!(frozen.edge_count(), 2);
        assert!(!frozen.allows_parallel_edges());
        assert_eq!(frozen.out_degree(&2).unwrap(), 1);
        assert_eq!(frozen.try_get_edge(&1, &2), Some(Edge::new(1, 2)));
        assert!(frozen.try_get_edge(&2, &1).is_none());
    }

    #[test]
    fn snapshot_is_detached_from_the_source() {
        let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
        g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
        let frozen = ArrayAdjacencyGraph::from_graph(&g).unwrap();
        g.add_vertices_and_edge(Edge::new(2, 3)).unwrap();
        assert_eq!(frozen.edge_count(), 1);
        assert!(!frozen.contains_vertex(&3));
    }
}
