//! Common bound aliases used across graph containers.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds will automatically implement them. They are zero-cost and only
//! reduce duplication in `where` clauses.

/// Canonical bound set for vertex values.
///
/// Rationale:
/// - `Clone` because iterators and snapshots hand out owned vertices
/// - `Eq + Hash` for map-backed adjacency storage
/// - `Debug` for diagnostics and error payloads
/// - `'static` so vertices can flow into trait-object seams (injected
///   edge-equality functions)
///
/// Equality is the identity seam: a `V` with structural `Eq` behaves as an
/// *equatable* vertex type (duplicate adds dedup), while a `V` whose `Eq`
/// compares an instance token reproduces default (per-instance) identity.
pub trait VertexLike: Clone + Eq + std::hash::Hash + std::fmt::Debug + 'static {}
impl<T> VertexLike for T where T: Clone + Eq + std::hash::Hash + std::fmt::Debug + 'static {}
