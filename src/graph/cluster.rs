//! Hierarchically clustered graph over shared-ownership cluster nodes.
//!
//! Every cluster owns an [`AdjacencyGraph`] plus child clusters; nodes are
//! handled as `Rc<RefCell<_>>` so a child can reach its parent through a
//! `Weak` back-edge without creating a cycle. Insertions propagate upward
//! (an edge added to a cluster is visible in every ancestor), removals
//! cascade downward into every descendant.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::GraphError;
use crate::graph::adjacency::AdjacencyGraph;
use crate::graph::bounds::VertexLike;
use crate::graph::edge::EdgeLike;
use crate::graph::traits::{MutableVertexAndEdgeSet, MutableVertexSet};

/// Shared handle to a cluster node.
pub type ClusterHandle<V, E> = Rc<RefCell<ClusteredGraph<V, E>>>;

/// One node of a cluster hierarchy.
///
/// # Example
/// ```rust
/// use quiver::prelude::*;
///
/// let root = ClusteredGraph::new(AdjacencyGraph::<u32, Edge<u32>>::new());
/// let child = ClusteredGraph::add_cluster(&root);
/// ClusteredGraph::add_edge(&child, Edge::new(1, 2)).unwrap();
/// // The edge propagated up to the root.
/// assert!(root.borrow().graph().contains_vertex(&1));
/// ```
pub struct ClusteredGraph<V, E>
where
    V: VertexLike,
    E: EdgeLike<V>,
{
    parent: Option<Weak<RefCell<ClusteredGraph<V, E>>>>,
    graph: AdjacencyGraph<V, E>,
    clusters: Vec<ClusterHandle<V, E>>,
    collapsed: bool,
}

impl<V: VertexLike, E: EdgeLike<V>> ClusteredGraph<V, E> {
    /// Wrap `graph` as the root of a new hierarchy.
    pub fn new(graph: AdjacencyGraph<V, E>) -> ClusterHandle<V, E> {
        Rc::new(RefCell::new(Self {
            parent: None,
            graph,
            clusters: Vec::new(),
            collapsed: false,
        }))
    }

    /// Create an empty child cluster under `this`.
    pub fn add_cluster(this: &ClusterHandle<V, E>) -> ClusterHandle<V, E> {
        let child = Rc::new(RefCell::new(Self {
            parent: Some(Rc::downgrade(this)),
            graph: AdjacencyGraph::new(),
            clusters: Vec::new(),
            collapsed: false,
        }));
        this.borrow_mut().clusters.push(Rc::clone(&child));
        child
    }

    /// Detach `cluster` from `this`; `false` when it is not a direct child.
    /// The detached subtree stays alive through its own handle.
    pub fn remove_cluster(this: &ClusterHandle<V, E>, cluster: &ClusterHandle<V, E>) -> bool {
        let mut node = this.borrow_mut();
        let before = node.clusters.len();
        node.clusters.retain(|c| !Rc::ptr_eq(c, cluster));
        node.clusters.len() != before
    }

    /// Insert `vertex` into `this` and every ancestor, ancestors first.
    /// `true` when it was new to `this`.
    pub fn add_vertex(this: &ClusterHandle<V, E>, vertex: V) -> bool {
        let parent = this.borrow().parent.as_ref().and_then(Weak::upgrade);
        if let Some(parent) = parent {
            Self::add_vertex(&parent, vertex.clone());
        }
        this.borrow_mut().graph.add_vertex(vertex)
    }

    /// Insert `edge` (and any absent endpoint) into `this` and every
    /// ancestor, ancestors first. `true` when it was new to `this`.
    pub fn add_edge(this: &ClusterHandle<V, E>, edge: E) -> Result<bool, GraphError> {
        let parent = this.borrow().parent.as_ref().and_then(Weak::upgrade);
        if let Some(parent) = parent {
            Self::add_edge(&parent, edge.clone())?;
        }
        this.borrow_mut().graph.add_vertices_and_edge(edge)
    }

    /// Remove `vertex` from `this` and from every descendant cluster.
    /// `true` when `this` contained it.
    pub fn remove_vertex(this: &ClusterHandle<V, E>, vertex: &V) -> bool {
        let children: Vec<ClusterHandle<V, E>> = this.borrow().clusters.to_vec();
        for child in &children {
            Self::remove_vertex(child, vertex);
        }
        this.borrow_mut().graph.remove_vertex(vertex)
    }

    /// The cluster's own graph.
    pub fn graph(&self) -> &AdjacencyGraph<V, E> {
        &self.graph
    }

    /// Direct child clusters.
    pub fn clusters(&self) -> &[ClusterHandle<V, E>] {
        &self.clusters
    }

    /// Number of direct child clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Presentation flag only; collapsing never changes structure.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Set the presentation flag. No structural effect.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// The parent cluster, if `this` is not a root and the root is alive.
    pub fn parent(&self) -> Option<ClusterHandle<V, E>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }
}

impl<V: VertexLike, E: EdgeLike<V>> std::fmt::Debug for ClusteredGraph<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusteredGraph")
            .field("graph", &self.graph)
            .field("clusters", &self.clusters.len())
            .field("collapsed", &self.collapsed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;
    use crate::graph::traits::{EdgeSet, ImplicitVertexSet, VertexSet};

    #[test]
    fn insertions_propagate_to_ancestors() {
        let root = ClusteredGraph::new(AdjacencyGraph::<u32, Edge<u32>>::new());
        let mid = ClusteredGraph::add_cluster(&root);
        let leaf = ClusteredGraph::add_cluster(&mid);

        assert!(ClusteredGraph::add_edge(&leaf, Edge::new(1, 2)).unwrap());
        for node in [&root, &mid, &leaf] {
            let node = node.borrow();
            assert!(node.graph().contains_vertex(&1));
            assert_eq!(node.graph().edge_count(), 1);
        }
    }

    #[test]
    fn removals_cascade_to_descendants() {
        let root = ClusteredGraph::new(AdjacencyGraph::<u32, Edge<u32>>::new());
        let child = ClusteredGraph::add_cluster(&root);
        ClusteredGraph::add_edge(&child, Edge::new(1, 2)).unwrap();

        assert!(ClusteredGraph::remove_vertex(&root, &1));
        assert!(!child.borrow().graph().contains_vertex(&1));
        assert_eq!(child.borrow().graph().edge_count(), 0);
        // 2 survives everywhere.
        assert!(root.borrow().graph().contains_vertex(&2));
    }

    #[test]
    fn sibling_clusters_stay_independent() {
        let root = ClusteredGraph::new(AdjacencyGraph::<u32, Edge<u32>>::new());
        let a = ClusteredGraph::add_cluster(&root);
        let b = ClusteredGraph::add_cluster(&root);
        ClusteredGraph::add_vertex(&a, 7);

        assert!(root.borrow().graph().contains_vertex(&7));
        assert!(!b.borrow().graph().contains_vertex(&7));
        assert_eq!(root.borrow().cluster_count(), 2);
    }

    #[test]
    fn remove_cluster_detaches_but_keeps_the_subtree() {
        let root = ClusteredGraph::new(AdjacencyGraph::<u32, Edge<u32>>::new());
        let child = ClusteredGraph::add_cluster(&root);
        ClusteredGraph::add_vertex(&child, 1);

        assert!(ClusteredGraph::remove_cluster(&root, &child));
        assert!(!ClusteredGraph::remove_cluster(&root, &child));
        assert_eq!(root.borrow().cluster_count(), 0);
        assert_eq!(child.borrow().graph().vertex_count(), 1);
    }

    #[test]
    fn collapsed_flag_has_no_structural_effect() {
        let root = ClusteredGraph::new(AdjacencyGraph::<u32, Edge<u32>>::new());
        ClusteredGraph::add_vertex(&root, 1);
        root.borrow_mut().set_collapsed(true);
        assert!(root.borrow().is_collapsed());
        assert!(root.borrow().graph().contains_vertex(&1));
    }
}
