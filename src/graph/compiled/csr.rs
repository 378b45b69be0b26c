//! Compressed sparse row snapshot for traversal-heavy workloads.
//!
//! Vertices are charted into a sorted `Box<[V]>` and addressed by dense
//! `u32` rank; adjacency lives in one flat `column_targets` arena sliced by
//! `row_offsets`. Rows are sorted and deduplicated, so pair lookup is a
//! binary search and parallel edges cannot be represented: the snapshot
//! always reports `allows_parallel_edges() == false`, whatever the source's
//! policy was.

use hashbrown::HashMap;

use crate::error::GraphError;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::{Edge, EdgeLike};
use crate::graph::traits::{
    EdgeIter, EdgeSet, Graph, ImplicitVertexSet, IncidenceGraph, VertexIter, VertexSet,
};

/// Immutable directed graph in compressed sparse row form.
///
/// Edges are materialized on demand as [`Edge<V>`] values; the layout itself
/// stores only ranks.
#[derive(Debug, Clone)]
pub struct CsrGraph<V>
where
    V: VertexLike + Ord,
{
    vertex_of: Box<[V]>,
    rank_of: HashMap<V, u32>,
    row_offsets: Box<[u32]>,
    column_targets: Box<[u32]>,
}

impl<V: VertexLike + Ord> CsrGraph<V> {
    /// Compile `source`'s current structure. Vertices are charted in sorted
    /// order; duplicate `(source, target)` pairs collapse into one column.
    pub fn from_graph<G>(source: &G) -> Result<Self, GraphError>
    where
        G: VertexSet<Vertex = V> + IncidenceGraph,
    {
        let mut chart: Vec<V> = source.vertices().collect();
        chart.sort_unstable();
        let mut rows = Vec::with_capacity(chart.len());
        for v in &chart {
            let targets: Vec<V> = source.out_edges(v)?.map(|e| e.target().clone()).collect();
            rows.push(targets);
        }
        Self::build(chart, rows)
    }

    /// Compile directly from `(source, target)` pairs; endpoints define the
    /// vertex set.
    pub fn from_edges(edges: impl IntoIterator<Item = (V, V)>) -> Result<Self, GraphError> {
        let mut adjacency: HashMap<V, Vec<V>> = HashMap::new();
        for (s, t) in edges {
            adjacency.entry(t.clone()).or_default();
            adjacency.entry(s).or_default().push(t);
        }
        let mut chart: Vec<V> = adjacency.keys().cloned().collect();
        chart.sort_unstable();
        let rows: Vec<Vec<V>> = chart
            .iter()
            .map(|v| adjacency.get(v).cloned().unwrap_or_default())
            .collect();
        Self::build(chart, rows)
    }

    fn build(chart: Vec<V>, rows: Vec<Vec<V>>) -> Result<Self, GraphError> {
        u32::try_from(chart.len())
            .map_err(|_| GraphError::InvalidArgument("vertex count exceeds the u32 chart"))?;
        let rank_of: HashMap<V, u32> = chart
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i as u32))
            .collect();

        let mut row_offsets = Vec::with_capacity(chart.len() + 1);
        let mut column_targets = Vec::new();
        row_offsets.push(0u32);
        for targets in rows {
            let mut ranks = Vec::with_capacity(targets.len());
            for t in &targets {
                let r = rank_of
                    .get(t)
                    .copied()
                    .ok_or_else(|| GraphError::vertex_not_found(t))?;
                ranks.push(r);
            }
            ranks.sort_unstable();
            ranks.dedup();
            column_targets.extend_from_slice(&ranks);
            let end = u32::try_from(column_targets.len())
                .map_err(|_| GraphError::InvalidArgument("edge count exceeds u32 offsets"))?;
            row_offsets.push(end);
        }

        Ok(Self {
            vertex_of: chart.into_boxed_slice(),
            rank_of,
            row_offsets: row_offsets.into_boxed_slice(),
            column_targets: column_targets.into_boxed_slice(),
        })
    }

    /// Dense rank of `vertex` in the chart, if present.
    pub fn rank_of(&self, vertex: &V) -> Option<u32> {
        self.rank_of.get(vertex).copied()
    }

    /// Vertex charted at `rank`, if in range.
    pub fn vertex_of(&self, rank: u32) -> Option<&V> {
        self.vertex_of.get(rank as usize)
    }

    /// Sorted out-neighbor ranks of the vertex at `rank`.
    pub fn neighbor_ranks(&self, rank: u32) -> &[u32] {
        let i = rank as usize;
        if i + 1 >= self.row_offsets.len() {
            return &[];
        }
        let start = self.row_offsets[i] as usize;
        let end = self.row_offsets[i + 1] as usize;
        &self.column_targets[start..end]
    }

    fn row(&self, vertex: &V) -> Result<&[u32], GraphError> {
        let rank = self
            .rank_of(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        Ok(self.neighbor_ranks(rank))
    }
}

impl<V: VertexLike + Ord> Graph for CsrGraph<V> {
    type Vertex = V;
    type Edge = Edge<V>;

    fn is_directed(&self) -> bool {
        true
    }

    // Rows are deduplicated at compilation.
    fn allows_parallel_edges(&self) -> bool {
        false
    }
}

impl<V: VertexLike + Ord> ImplicitVertexSet for CsrGraph<V> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.rank_of.contains_key(vertex)
    }
}

impl<V: VertexLike + Ord> VertexSet for CsrGraph<V> {
    fn vertex_count(&self) -> usize {
        self.vertex_of.len()
    }

    /// Chart order, i.e. sorted by `V: Ord`.
    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(self.vertex_of.iter().cloned())
    }
}

impl<V: VertexLike + Ord> EdgeSet for CsrGraph<V> {
    fn edge_count(&self) -> usize {
        self.column_targets.len()
    }

    fn edges(&self) -> EdgeIter<'_, Edge<V>> {
        Box::new((0..self.vertex_of.len()).flat_map(move |i| {
            let src = &self.vertex_of[i];
            self.neighbor_ranks(i as u32)
                .iter()
                .map(move |t| Edge::new(src.clone(), self.vertex_of[*t as usize].clone()))
        }))
    }

    fn contains_edge(&self, edge: &Edge<V>) -> bool {
        self.contains_edge_between(edge.source(), edge.target())
    }
}

impl<V: VertexLike + Ord> IncidenceGraph for CsrGraph<V> {
    fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        Ok(self.row(vertex)?.len())
    }

    fn out_edges(&self, vertex: &V) -> Result<EdgeIter<'_, Edge<V>>, GraphError> {
        let row = self.row(vertex)?;
        let src = vertex.clone();
        Ok(Box::new(row.iter().map(move |t| {
            Edge::new(src.clone(), self.vertex_of[*t as usize].clone())
        })))
    }

    fn out_edge(&self, vertex: &V, index: usize) -> Result<Edge<V>, GraphError> {
        let row = self.row(vertex)?;
        let t = *row.get(index).ok_or(GraphError::IndexOutOfRange {
            index,
            degree: row.len(),
        })?;
        Ok(Edge::new(vertex.clone(), self.vertex_of[t as usize].clone()))
    }

    fn try_get_edge(&self, source: &V, target: &V) -> Option<Edge<V>> {
        let row = self.row(source).ok()?;
        let target_rank = self.rank_of(target)?;
        row.binary_search(&target_rank).ok()?;
        Some(Edge::new(source.clone(), target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::adjacency::AdjacencyGraph;
    use crate::graph::traits::MutableVertexAndEdgeSet;

    #[test]
    fn rows_are_sorted_and_deduplicated() {
        let csr =
            CsrGraph::from_edges([(1u32, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(csr.vertex_count(), 3);
        assert_eq!(csr.edge_count(), 3);
        let targets: Vec<u32> = csr
            .out_edges(&1)
            .unwrap()
            .map(|e| *e.target())
            .collect();
        assert_eq!(targets, vec![2, 3]);
    }

    #[test]
    fn chart_is_sorted_and_rank_round_trips() {
        let csr = CsrGraph::from_edges([(30u32, 10), (20, 30)]).unwrap();
        let vs: Vec<u32> = csr.vertices().collect();
        assert_eq!(vs, vec![10, 20, 30]);
        for v in vs {
            let rank = csr.rank_of(&v).unwrap();
            assert_eq!(csr.vertex_of(rank), Some(&v));
        }
    }

    #[test]
    fn pair_lookup_uses_the_sorted_row() {
        let csr = CsrGraph::from_edges([(1u32, 2), (1, 4)]).unwrap();
        assert!(csr.contains_edge_between(&1, &4));
        assert!(!csr.contains_edge_between(&1, &3));
        assert!(csr.try_get_edge(&4, &1).is_none());
        assert!(matches!(
            csr.out_edge(&1, 2),
            Err(GraphError::IndexOutOfRange { index: 2, degree: 2 })
        ));
    }

    #[test]
    fn compiles_from_a_mutable_graph() {
        let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
        for (s, t) in [(5, 1), (5, 1), (1, 5), (5, 5)] {
            g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
        }
        let csr = CsrGraph::from_graph(&g).unwrap();
        // Parallel (5, 1) collapses; the self-loop survives.
        assert_eq!(csr.edge_count(), 3);
        assert!(csr.contains_edge_between(&5, &5));
        assert!(!csr.allows_parallel_edges());
    }
}
