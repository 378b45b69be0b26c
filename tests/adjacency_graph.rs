//! Behavior of the mutable directed adjacency graph: identity modes,
//! parallel-edge policy, cascade removal, and observer ordering.

use std::cell::RefCell;
use std::rc::Rc;

use quiver::prelude::*;

/// Edge carrying an instance token; equality compares the token only, so
/// two edges over the same endpoints stay distinct.
#[derive(Clone, Debug)]
struct TokenEdge {
    id: u64,
    source: u32,
    target: u32,
}

impl PartialEq for TokenEdge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl EdgeLike<u32> for TokenEdge {
    fn source(&self) -> &u32 {
        &self.source
    }
    fn target(&self) -> &u32 {
        &self.target
    }
}

/// Vertex carrying an instance token; equality and hashing use the token
/// only, so payload-equal instances with distinct tokens stay distinct.
#[derive(Clone, Debug)]
struct TokenVertex {
    id: u64,
    label: &'static str,
}

impl PartialEq for TokenVertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TokenVertex {}

impl std::hash::Hash for TokenVertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[test]
fn duplicate_vertex_add_is_a_no_op() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    assert!(g.add_vertex(1));
    assert!(!g.add_vertex(1));
    assert_eq!(g.vertex_count(), 1);
}

#[test]
fn token_vertices_keep_per_instance_identity() {
    let mut g = AdjacencyGraph::<TokenVertex, Edge<TokenVertex>>::new();
    let a = TokenVertex { id: 1, label: "n" };
    let b = TokenVertex { id: 2, label: "n" };
    // Same payload, distinct tokens: both go in.
    assert!(g.add_vertex(a.clone()));
    assert!(g.add_vertex(b.clone()));
    assert_eq!(g.vertex_count(), 2);
    // An equal-token instance is a duplicate whatever its payload says;
    // the stored instance keeps its original payload.
    assert!(!g.add_vertex(TokenVertex { id: 1, label: "renamed" }));
    assert_eq!(g.vertex_count(), 2);
    let stored = g.vertices().find(|v| v.id == 1).unwrap();
    assert_eq!(stored.label, "n");

    assert!(g.remove_vertex(&a));
    assert!(!g.contains_vertex(&a));
    assert!(g.contains_vertex(&b));
}

#[test]
fn structural_duplicates_coexist_when_parallel_edges_allowed() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();
    assert!(g.add_edge(Edge::new(1, 2)).unwrap());
    assert_eq!(g.edge_count(), 2);
    assert!(g.contains_edge(&Edge::new(1, 2)));
}

#[test]
fn parallel_policy_rejects_duplicates_as_no_ops() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::with_parallel_edges(false);
    g.add_vertex(1);
    g.add_vertex(2);
    assert!(g.add_edge(Edge::new(1, 2)).unwrap());
    assert!(!g.add_edge(Edge::new(1, 2)).unwrap());
    assert_eq!(g.edge_count(), 1);
    // The reverse orientation is a different pair and goes in.
    assert!(g.add_edge(Edge::new(2, 1)).unwrap());
}

#[test]
fn token_edges_keep_per_instance_identity() {
    let mut g = AdjacencyGraph::<u32, TokenEdge>::new();
    let a = TokenEdge { id: 1, source: 1, target: 2 };
    let b = TokenEdge { id: 2, source: 1, target: 2 };
    g.add_vertex(1);
    g.add_vertex(2);
    g.add_edge(a.clone()).unwrap();
    g.add_edge(b.clone()).unwrap();

    assert!(g.remove_edge(&a));
    assert_eq!(g.edge_count(), 1);
    assert!(g.contains_edge(&b));
    assert!(!g.contains_edge(&a));
}

#[test]
fn add_edge_requires_both_endpoints() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    g.add_vertex(1);
    assert!(matches!(
        g.add_edge(Edge::new(1, 2)),
        Err(GraphError::VertexNotFound(_))
    ));
    assert!(matches!(
        g.add_edge(Edge::new(9, 1)),
        Err(GraphError::VertexNotFound(_))
    ));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn vertex_removal_cascades_and_orders_events() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    for (s, t) in [(1, 2), (1, 3), (2, 3), (3, 4), (3, 1), (4, 2)] {
        g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
    }

    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&log);
    g.subscribe(move |ev| {
        let entry = match ev {
            GraphEvent::EdgeRemoved(e) => format!("edge {e:?}"),
            GraphEvent::VertexRemoved(v) => format!("vertex {v}"),
            _ => return,
        };
        sink.borrow_mut().push(entry);
    });

    // 3 touches (1,3), (2,3), (3,4), (3,1): four cascaded edge removals.
    assert!(g.remove_vertex(&3));
    let log = log.borrow();
    assert_eq!(log.len(), 5);
    assert_eq!(log.last().unwrap(), "vertex 3");
    assert!(log[..4].iter().all(|l| l.starts_with("edge ")));

    assert_eq!(g.edge_count(), 2);
    assert!(!g.contains_vertex(&3));
    assert!(g.contains_edge_between(&1, &2));
    assert!(g.contains_edge_between(&4, &2));
}

#[test]
fn remove_vertex_if_counts_removals() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    for (s, t) in [(1, 2), (2, 3), (3, 4)] {
        g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
    }
    let removed = g.remove_vertex_if(|v| v % 2 == 0);
    assert_eq!(removed, 2);
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn clone_detaches_structure_and_subscribers() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    g.add_vertices_and_edge(Edge::new(1, 2)).unwrap();

    let fired = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&fired);
    g.subscribe(move |_| *sink.borrow_mut() += 1);

    let mut copy = g.clone();
    copy.add_vertices_and_edge(Edge::new(2, 3)).unwrap();

    // The copy mutated independently and fired no inherited events.
    assert_eq!(g.edge_count(), 1);
    assert_eq!(copy.edge_count(), 2);
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn clear_fires_edge_events_before_vertex_events() {
    let mut g = AdjacencyGraph::<u32, Edge<u32>>::new();
    for (s, t) in [(1, 2), (2, 1)] {
        g.add_vertices_and_edge(Edge::new(s, t)).unwrap();
    }
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let sink = Rc::clone(&log);
    g.subscribe(move |ev| {
        sink.borrow_mut().push(match ev {
            GraphEvent::EdgeRemoved(_) => "edge",
            GraphEvent::VertexRemoved(_) => "vertex",
            _ => "add",
        });
    });
    g.clear();
    assert_eq!(*log.borrow(), vec!["edge", "edge", "vertex", "vertex"]);
    assert!(g.is_vertices_empty());
}
