//! Watch registration and equality-gated notification.
//!
//! A watch pairs a projection (how to read a value out of the state) with
//! an equality gate and a callback. On every notify pass each watch
//! recomputes its projection against the current state, compares the
//! result with the last value it delivered, and invokes its callback only
//! when the gate says the value changed. A write that does not move a
//! watched projection produces no delivery for that watch.
//!
//! Dispatch is a plain synchronous loop in registration order. There is
//! no queue and no deferral: when [`WatchSet::notify`] returns, every
//! delivery for that write has already happened, and a removed watch can
//! never fire again.

use std::fmt;

/// Handle identifying one registered watch.
///
/// Handed out in registration order and never reused within one
/// [`WatchSet`], so ids double as a registration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(u64);

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watch-{}", self.0)
    }
}

struct WatchEntry<S> {
    id: WatchId,
    /// Recompute-and-deliver closure. Returns true when it delivered.
    sink: Box<dyn FnMut(&S) -> bool + Send>,
}

/// An ordered set of watches over one state type `S`.
pub struct WatchSet<S> {
    entries: Vec<WatchEntry<S>>,
    next_id: u64,
}

impl<S> WatchSet<S> {
    /// An empty watch set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a watch and return its handle together with the
    /// projection's current value.
    ///
    /// `project` reads the watched value out of the state, `equal`
    /// decides whether two projected values count as the same, and
    /// `deliver` runs once per change with the new value. The current
    /// value is computed synchronously at registration so the caller
    /// starts from the same snapshot later deliveries are diffed against.
    pub fn watch<V, P, E, C>(
        &mut self,
        state: &S,
        project: P,
        equal: E,
        mut deliver: C,
    ) -> (WatchId, V)
    where
        V: Clone + Send + 'static,
        P: Fn(&S) -> V + Send + 'static,
        E: Fn(&V, &V) -> bool + Send + 'static,
        C: FnMut(&V) + Send + 'static,
    {
        let id = WatchId(self.next_id);
        self.next_id += 1;

        let current = project(state);
        let mut last = current.clone();
        self.entries.push(WatchEntry {
            id,
            sink: Box::new(move |state| {
                let next = project(state);
                if equal(&last, &next) {
                    return false;
                }
                last = next;
                deliver(&last);
                true
            }),
        });
        tracing::trace!("{id} registered, {} watches active", self.entries.len());
        (id, current)
    }

    /// Register a watch gated by `PartialEq` on the projected value.
    pub fn watch_eq<V, P, C>(&mut self, state: &S, project: P, deliver: C) -> (WatchId, V)
    where
        V: Clone + PartialEq + Send + 'static,
        P: Fn(&S) -> V + Send + 'static,
        C: FnMut(&V) + Send + 'static,
    {
        self.watch(state, project, |a, b| a == b, deliver)
    }

    /// Remove a watch.
    ///
    /// Removal is immediate: a removed watch is skipped by every later
    /// notify pass, with no parting delivery. Returns false when the id
    /// was not registered (or was already removed).
    pub fn unwatch(&mut self, id: WatchId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() < before;
        if removed {
            tracing::trace!("{id} removed, {} watches active", self.entries.len());
        }
        removed
    }

    /// Run one notification pass against `state`.
    ///
    /// Every watch recomputes its projection; those whose value moved
    /// deliver, in registration order. Returns the number of deliveries.
    pub fn notify(&mut self, state: &S) -> usize {
        let mut delivered = 0;
        for entry in &mut self.entries {
            if (entry.sink)(state) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of registered watches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is watching.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for WatchSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for WatchSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSet")
            .field("watches", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
