//! Edge model: the [`EdgeLike`] trait and the concrete edge value types.
//!
//! Containers are generic over their edge type so callers can attach extra
//! data (weights, labels, instance tokens) to edges; the containers only ever
//! look at the two endpoints. Equality of the edge type is the identity seam:
//! a structurally-`Eq` edge behaves as an *equatable* edge, while an edge
//! carrying a unique token reproduces per-instance identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimal contract a container requires from its edge type.
///
/// `'static` keeps edge values usable behind trait-object seams (injected
/// edge-equality functions); edges holding borrowed data are out of scope.
pub trait EdgeLike<V>: Clone + PartialEq + fmt::Debug + 'static {
    /// Vertex the edge leaves from.
    fn source(&self) -> &V;
    /// Vertex the edge points to.
    fn target(&self) -> &V;

    /// `true` when both endpoints are the same vertex.
    #[inline]
    fn is_self_loop(&self) -> bool
    where
        V: PartialEq,
    {
        self.source() == self.target()
    }
}

/// Plain `(source, target)` edge record with structural equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<V> {
    source: V,
    target: V,
}

impl<V> Edge<V> {
    /// Create a new directed edge `source -> target`.
    #[inline]
    pub fn new(source: V, target: V) -> Self {
        Self { source, target }
    }

    /// Consume the edge and return its endpoints.
    #[inline]
    pub fn into_parts(self) -> (V, V) {
        (self.source, self.target)
    }
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> EdgeLike<V> for Edge<V> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }
    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: fmt::Debug> fmt::Debug for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.source, self.target)
    }
}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

impl<V> From<(V, V)> for Edge<V> {
    fn from((source, target): (V, V)) -> Self {
        Self::new(source, target)
    }
}

/// Edge value whose equality ignores orientation: `(u, v)` equals `(v, u)`.
///
/// The stored orientation is preserved (`source`/`target` return what was
/// passed in), only comparison and hashing are order-insensitive. `Hash`
/// hashes the endpoints in sorted order so it stays consistent with `Eq`.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct UndirectedEdge<V> {
    source: V,
    target: V,
}

impl<V> UndirectedEdge<V> {
    /// Create a new undirected edge between `source` and `target`.
    #[inline]
    pub fn new(source: V, target: V) -> Self {
        Self { source, target }
    }
}

impl<V: PartialEq> PartialEq for UndirectedEdge<V> {
    fn eq(&self, other: &Self) -> bool {
        (self.source == other.source && self.target == other.target)
            || (self.source == other.target && self.target == other.source)
    }
}

impl<V: Eq> Eq for UndirectedEdge<V> {}

impl<V: Ord + std::hash::Hash> std::hash::Hash for UndirectedEdge<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let (lo, hi) = if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        };
        lo.hash(state);
        hi.hash(state);
    }
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> EdgeLike<V> for UndirectedEdge<V> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }
    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: fmt::Debug> fmt::Debug for UndirectedEdge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} <-> {:?}", self.source, self.target)
    }
}

/// Zero-copy wrapper swapping the endpoint roles of a wrapped edge.
///
/// Produced by the reversed bidirectional view; the original edge is kept
/// intact and can be recovered with [`ReversedEdge::into_original`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReversedEdge<E> {
    original: E,
}

impl<E> ReversedEdge<E> {
    /// Wrap `original`, presenting its target as source and vice versa.
    #[inline]
    pub fn new(original: E) -> Self {
        Self { original }
    }

    /// The wrapped edge, original orientation.
    #[inline]
    pub fn original(&self) -> &E {
        &self.original
    }

    /// Unwrap back to the original edge.
    #[inline]
    pub fn into_original(self) -> E {
        self.original
    }
}

impl<V, E: EdgeLike<V>> EdgeLike<V> for ReversedEdge<E> {
    #[inline]
    fn source(&self) -> &V {
        self.original.target()
    }
    #[inline]
    fn target(&self) -> &V {
        self.original.source()
    }
}

impl<E: fmt::Debug> fmt::Debug for ReversedEdge<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReversedEdge").field(&self.original).finish()
    }
}
