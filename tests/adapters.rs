//! Adapter views over other graphs, including the one-shot nature of the
//! bidirectional adapter's in-edge index.

use std::cell::RefCell;
use std::rc::Rc;

use quiver::prelude::*;

type Rows = Rc<RefCell<Vec<(u32, Vec<u32>)>>>;

fn delegate_over(
    rows: &Rows,
) -> DelegateVertexAndEdgeListGraph<
    u32,
    Edge<u32>,
    impl Fn() -> Vec<u32>,
    impl Fn(&u32) -> Option<Vec<Edge<u32>>>,
> {
    let for_vertices = Rc::clone(rows);
    let for_edges = Rc::clone(rows);
    DelegateVertexAndEdgeListGraph::new(
        move || for_vertices.borrow().iter().map(|(v, _)| *v).collect(),
        move |v: &u32| {
            for_edges
                .borrow()
                .iter()
                .find(|(u, _)| u == v)
                .map(|(u, ts)| ts.iter().map(|t| Edge::new(*u, *t)).collect())
        },
    )
}

#[test]
fn reversed_view_exchanges_directions_live() {
    let mut g = BidirectionalGraph::<u32, Edge<u32>>::new();
    for (s, t) in [(1, 2), (3, 2)] {
        g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
    }
    let rev = ReversedBidirectionalGraph::new(&g);
    assert_eq!(rev.out_degree(&2).unwrap(), 2);
    assert_eq!(rev.in_degree(&2).unwrap(), 0);

    let e = rev.try_get_edge(&2, &3).unwrap();
    assert_eq!(e.into_original(), Edge::new(3, 2));
}

#[test]
fn double_reversal_restores_the_original_directions() {
    let mut g = BidirectionalGraph::<u32, Edge<u32>>::new();
    g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
    let once = ReversedBidirectionalGraph::new(&g);
    let twice = ReversedBidirectionalGraph::new(&once);
    assert!(twice.contains_edge_between(&1, &2));
    assert!(!twice.contains_edge_between(&2, &1));
}

#[test]
fn bidirectional_adapter_indexes_a_directed_graph() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    for (s, t) in [(1, 3), (2, 3), (3, 3)] {
        g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
    }
    let adapter = BidirectionalAdapter::new(&g).unwrap();
    assert_eq!(adapter.in_degree(&3).unwrap(), 3);
    // Self-loop counts on both sides of the total degree.
    assert_eq!(adapter.degree(&3).unwrap(), 4);
}

#[test]
fn in_edge_index_is_frozen_while_out_edges_stay_live() {
    let rows: Rows = Rc::new(RefCell::new(vec![(1, vec![2]), (2, vec![])]));
    let g = delegate_over(&rows);
    let adapter = BidirectionalAdapter::new(&g).unwrap();
    assert_eq!(adapter.in_degree(&2).unwrap(), 1);

    // The underlying structure gains 1 -> 2 a second time after the sweep.
    rows.borrow_mut()[0].1.push(2);

    // Out-edge queries answer from the current structure...
    assert_eq!(adapter.out_degree(&1).unwrap(), 2);
    assert_eq!(adapter.edge_count(), 2);
    // ...while the in-edge index still reports the swept state.
    assert_eq!(adapter.in_degree(&2).unwrap(), 1);

    // Rebuilding refreshes the index.
    let rebuilt = BidirectionalAdapter::new(&g).unwrap();
    assert_eq!(rebuilt.in_degree(&2).unwrap(), 2);
}

#[test]
fn vertex_gained_after_the_sweep_answers_zero_in_degree() {
    let rows: Rows = Rc::new(RefCell::new(vec![(1, vec![])]));
    let g = delegate_over(&rows);
    let adapter = BidirectionalAdapter::new(&g).unwrap();

    rows.borrow_mut().push((9, vec![]));
    assert!(adapter.wrapped().contains_vertex(&9));
    assert_eq!(adapter.in_degree(&9).unwrap(), 0);
    assert!(matches!(
        adapter.in_degree(&10),
        Err(GraphError::VertexNotFound(_))
    ));
}
