//! Compiled snapshots versus their mutable sources, including property
//! checks on the CSR layout.

use proptest::prelude::*;

use quiver::prelude::*;

#[test]
fn csr_answers_match_the_source() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    for (s, t) in [(1, 2), (1, 3), (2, 3), (3, 1), (3, 3)] {
        g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
    }
    let csr = CsrGraph::from_graph(&g).unwrap();

    assert_eq!(csr.vertex_count(), g.vertex_count());
    for v in g.vertices() {
        assert_eq!(csr.out_degree(&v).unwrap(), g.out_degree(&v).unwrap());
        for e in g.out_edges(&v).unwrap() {
            assert!(csr.contains_edge_between(e.source(), e.target()));
        }
    }
}

#[test]
fn array_views_do_not_track_the_source() {
    let mut g = BidirectionalGraph::<u32, Edge<u32>>::new();
    g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();

    let out_view = ArrayAdjacencyGraph::from_graph(&g).unwrap();
    let both_view = ArrayBidirectionalGraph::from_graph(&g).unwrap();

    g.add_vertices_and_edge(Edge::new(2, 3)).unwrap();
    g.remove_vertex(&1);

    assert_eq!(out_view.edge_count(), 1);
    assert!(out_view.contains_vertex(&1));
    assert_eq!(both_view.in_degree(&2).unwrap(), 1);
}

#[test]
fn undirected_snapshot_keeps_adjacency_shape() {
    let mut g = UndirectedGraph::<u32, Edge<u32>>::new();
    for (s, t) in [(1, 2), (2, 3), (2, 2)] {
        g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
    }
    let frozen = ArrayUndirectedGraph::from_graph(&g).unwrap();
    assert_eq!(frozen.adjacent_degree(&2).unwrap(), g.adjacent_degree(&2).unwrap());
    assert_eq!(frozen.edge_count(), 3);
}

proptest! {
    /// Every input pair is queryable in the compiled layout, and the layout
    /// never invents edges.
    #[test]
    fn csr_preserves_reachability_pairs(
        pairs in proptest::collection::vec((0u32..40, 0u32..40), 0..120)
    ) {
        let csr = CsrGraph::from_edges(pairs.clone()).unwrap();
        for (s, t) in &pairs {
            prop_assert!(csr.contains_edge_between(s, t));
        }
        for e in csr.edges() {
            prop_assert!(pairs.contains(&(*e.source(), *e.target())));
        }
    }

    /// Rank and vertex lookups are mutual inverses over the whole chart.
    #[test]
    fn csr_chart_round_trips(
        pairs in proptest::collection::vec((0u32..1000, 0u32..1000), 1..60)
    ) {
        let csr = CsrGraph::from_edges(pairs).unwrap();
        let mut previous: Option<u32> = None;
        for v in csr.vertices() {
            let rank = csr.rank_of(&v).unwrap();
            prop_assert_eq!(csr.vertex_of(rank), Some(&v));
            // Chart order is sorted order.
            if let Some(p) = previous {
                prop_assert!(p < v);
            }
            previous = Some(v);
        }
    }

    /// Out-degree totals match the deduplicated edge count.
    #[test]
    fn csr_degrees_sum_to_edge_count(
        pairs in proptest::collection::vec((0u32..30, 0u32..30), 0..100)
    ) {
        let csr = CsrGraph::from_edges(pairs).unwrap();
        let total: usize = csr
            .vertices()
            .map(|v| csr.out_degree(&v).unwrap())
            .sum();
        prop_assert_eq!(total, csr.edge_count());
    }
}
