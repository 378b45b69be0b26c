//! Mutation observation for the mutable containers.
//!
//! Each mutable graph owns an [`EventHandlers`] subscriber list and delivers
//! [`GraphEvent`] records synchronously, on the mutating call, *after* the
//! structural change has taken effect. The ordering guarantee is upheld by
//! every call site: when a vertex removal cascades, one `EdgeRemoved` fires
//! per incident edge and the `VertexRemoved` for the owning vertex fires
//! strictly last.
//!
//! Handlers receive shared borrows only, so a handler cannot re-enter the
//! graph it observes; the re-entrancy hazard of callback-based designs is
//! ruled out at compile time. Cloning a graph never clones its subscribers.

use std::fmt;
use std::rc::Rc;

/// A single structural mutation, borrowed from the mutating call.
#[derive(Debug)]
pub enum GraphEvent<'a, V, E> {
    /// A new vertex entered the vertex set.
    VertexAdded(&'a V),
    /// A vertex left the vertex set (all its incident edges already have).
    VertexRemoved(&'a V),
    /// A new edge entered the edge set.
    EdgeAdded(&'a E),
    /// An edge left the edge set.
    EdgeRemoved(&'a E),
}

// Only references inside, so the event is copyable whatever V and E are;
// the derives would demand V: Copy.
impl<V, E> Clone for GraphEvent<'_, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, E> Copy for GraphEvent<'_, V, E> {}

/// Opaque handle returned by [`EventHandlers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

/// Typed subscriber list owned by a mutable graph.
pub struct EventHandlers<V, E> {
    handlers: Vec<(usize, Rc<dyn Fn(GraphEvent<'_, V, E>)>)>,
    next_id: usize,
}

impl<V, E> Default for EventHandlers<V, E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<V, E> EventHandlers<V, E> {
    /// Register `handler`; it will observe every subsequent mutation.
    pub fn subscribe(&mut self, handler: Rc<dyn Fn(GraphEvent<'_, V, E>)>) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, handler));
        SubscriptionId(id)
    }

    /// Convenience wrapper over [`subscribe`](Self::subscribe) for closures.
    pub fn subscribe_fn(
        &mut self,
        handler: impl Fn(GraphEvent<'_, V, E>) + 'static,
    ) -> SubscriptionId {
        self.subscribe(Rc::new(handler))
    }

    /// Drop the handler registered under `id`; `false` if already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _)| *hid != id.0);
        self.handlers.len() != before
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// `true` when nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn emit(&self, event: GraphEvent<'_, V, E>) {
        for (_, handler) in &self.handlers {
            handler(event);
        }
    }
}

impl<V, E> fmt::Debug for EventHandlers<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn subscribe_emit_unsubscribe() {
        let mut handlers: EventHandlers<u32, (u32, u32)> = EventHandlers::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = handlers.subscribe_fn(move |ev| {
            if let GraphEvent::VertexAdded(v) = ev {
                sink.borrow_mut().push(*v);
            }
        });
        handlers.emit(GraphEvent::VertexAdded(&7));
        assert_eq!(*seen.borrow(), vec![7]);

        assert!(handlers.unsubscribe(id));
        assert!(!handlers.unsubscribe(id));
        handlers.emit(GraphEvent::VertexAdded(&8));
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut handlers: EventHandlers<u32, (u32, u32)> = EventHandlers::default();
        let a = handlers.subscribe_fn(|_| {});
        handlers.unsubscribe(a);
        let b = handlers.subscribe_fn(|_| {});
        assert_ne!(a, b);
    }
}
