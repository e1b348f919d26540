//! The record store facade.
//!
//! One [`RecordStore`] glues the state (collection, index, overlay) to a
//! watch set and keeps the two in step: every mutation runs exactly one
//! notification pass before it returns. All mutation goes through
//! [`replace_all`](RecordStore::replace_all) and
//! [`patch_one`](RecordStore::patch_one); everything else is a read or a
//! subscription.
//!
//! The store is a plain value, not a singleton. Applications create as
//! many stores as they have record types and wrap one in
//! `Arc<Mutex<...>>` when several threads need it.

use crate::options::{OverlayPolicy, StoreOptions};
use ors_core::id::RecordId;
use ors_core::record::Record;
use ors_core::slice::RowSlice;
use ors_core::state::StoreState;
use ors_watch::watch::{WatchId, WatchSet};
use serde::Serialize;

/// In-memory record store with patch overlay and change-gated watches.
#[derive(Debug)]
pub struct RecordStore<R: Record> {
    state: StoreState<R>,
    watchers: WatchSet<StoreState<R>>,
    options: StoreOptions,
}

/// Sizes of a store's moving parts, for logging and debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Rows in the base collection, duplicates included.
    pub rows: usize,
    /// Distinct identities reachable through the index.
    pub indexed: usize,
    /// Overlay entries, parked ones included.
    pub overlay_entries: usize,
    /// Overlay entries whose identity does not currently resolve.
    pub stale_overlay_entries: usize,
    /// Registered watches.
    pub watchers: usize,
}

impl<R: Record> RecordStore<R> {
    /// An empty store with default options.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// An empty store with explicit options.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            state: StoreState::new(),
            watchers: WatchSet::new(),
            options,
        }
    }

    /// The options this store was built with.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Read-only view of the underlying state.
    pub fn state(&self) -> &StoreState<R> {
        &self.state
    }

    // === Mutations ===

    /// Replace the whole base collection and rebuild the index.
    ///
    /// The overlay is untouched under [`OverlayPolicy::Retain`]; under
    /// [`OverlayPolicy::EvictStale`] entries for vanished identities are
    /// dropped before watchers run. Exactly one notification pass happens
    /// either way, after the swap, so watch callbacks always observe the
    /// new collection.
    ///
    /// # Panics
    ///
    /// Panics when any record carries an empty identity. An empty key is
    /// a malformed record, and indexing it would silently shadow every
    /// other keyless row, so the store refuses the whole load.
    pub fn replace_all(&mut self, rows: Vec<R>) {
        for (position, row) in rows.iter().enumerate() {
            assert!(
                !row.identity().is_empty(),
                "record at position {position} has an empty identity"
            );
        }

        self.state.replace_rows(rows);
        let evicted = match self.options.overlay_policy {
            OverlayPolicy::Retain => 0,
            OverlayPolicy::EvictStale => self.state.prune_overlay(),
        };
        let delivered = self.watchers.notify(&self.state);
        tracing::debug!(
            "collection replaced: {} rows, {evicted} overlay entries evicted, {delivered} deliveries",
            self.state.len()
        );
    }

    /// Fold a partial update into the overlay entry for `id`.
    ///
    /// The identity does not have to resolve yet; a patch for an unknown
    /// identity parks in the overlay until a matching record is loaded.
    /// One notification pass runs after the fold.
    pub fn patch_one(&mut self, id: impl Into<RecordId>, patch: R::Patch) {
        let id = id.into();
        self.state.apply_patch(id.clone(), patch);
        let delivered = self.watchers.notify(&self.state);
        tracing::trace!("patched {id}: {delivered} deliveries");
    }

    // === Reads ===

    /// The identity of every row, in row order, duplicates included.
    pub fn ids(&self) -> Vec<RecordId> {
        self.state.ids()
    }

    /// The effective record for `id` (base row plus overlay).
    pub fn resolve(&self, id: &str) -> Option<R> {
        self.state.resolve(id)
    }

    /// One field of the effective record for `id`.
    pub fn field(&self, id: &str, field: R::Field) -> Option<R::Value> {
        self.state.field_of(id, field)
    }

    /// A slice of the effective record for `id` holding only `fields`.
    pub fn row(&self, id: &str, fields: &[R::Field]) -> Option<RowSlice<R>> {
        self.state.row_slice(id, fields)
    }

    /// True when `id` currently resolves to a record.
    pub fn contains(&self, id: &str) -> bool {
        self.state.contains(id)
    }

    /// Number of rows in the base collection.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// True when the base collection is empty.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Number of registered watches.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Current sizes of the store's moving parts.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            rows: self.state.len(),
            indexed: self.state.index().len(),
            overlay_entries: self.state.overlay().len(),
            stale_overlay_entries: self.state.overlay().stale_count(self.state.index()),
            watchers: self.watchers.len(),
        }
    }

    // === Subscriptions ===

    /// Watch an arbitrary projection of the store state, gated by
    /// `PartialEq` on the projected value.
    ///
    /// Returns the watch handle and the projection's current value.
    pub fn subscribe_view<V, P, C>(&mut self, project: P, deliver: C) -> (WatchId, V)
    where
        V: Clone + PartialEq + Send + 'static,
        P: Fn(&StoreState<R>) -> V + Send + 'static,
        C: FnMut(&V) + Send + 'static,
    {
        self.watchers.watch_eq(&self.state, project, deliver)
    }

    /// Watch an arbitrary projection with a caller-supplied equality gate.
    pub fn subscribe_view_with<V, P, E, C>(
        &mut self,
        project: P,
        equal: E,
        deliver: C,
    ) -> (WatchId, V)
    where
        V: Clone + Send + 'static,
        P: Fn(&StoreState<R>) -> V + Send + 'static,
        E: Fn(&V, &V) -> bool + Send + 'static,
        C: FnMut(&V) + Send + 'static,
    {
        self.watchers.watch(&self.state, project, equal, deliver)
    }

    /// Watch one field of one record.
    ///
    /// The projected value is `None` while the identity does not resolve,
    /// so the callback also fires when the record appears or vanishes.
    pub fn subscribe_field<C>(
        &mut self,
        id: impl Into<RecordId>,
        field: R::Field,
        deliver: C,
    ) -> (WatchId, Option<R::Value>)
    where
        C: FnMut(&Option<R::Value>) + Send + 'static,
    {
        let id = id.into();
        self.watchers
            .watch_eq(&self.state, move |state| state.field_of(id.as_str(), field), deliver)
    }

    /// Watch a fixed set of fields of one record as a [`RowSlice`].
    ///
    /// Fires only when one of the named fields changes value (or the
    /// record appears or vanishes); edits to other fields of the same
    /// record are gated out.
    pub fn subscribe_row<C>(
        &mut self,
        id: impl Into<RecordId>,
        fields: &[R::Field],
        deliver: C,
    ) -> (WatchId, Option<RowSlice<R>>)
    where
        C: FnMut(&Option<RowSlice<R>>) + Send + 'static,
    {
        let id = id.into();
        let fields = fields.to_vec();
        self.watchers.watch_eq(
            &self.state,
            move |state| state.row_slice(id.as_str(), &fields),
            deliver,
        )
    }

    /// Watch the ordered identity list of the base collection.
    ///
    /// Patches never fire this watch: overlay entries cannot add or
    /// remove rows, only collection replacement can.
    pub fn subscribe_ids<C>(&mut self, deliver: C) -> (WatchId, Vec<RecordId>)
    where
        C: FnMut(&Vec<RecordId>) + Send + 'static,
    {
        self.watchers.watch_eq(&self.state, |state| state.ids(), deliver)
    }

    /// Watch a typed selection from one effective record.
    ///
    /// `select` runs against the resolved record, so it can read plain
    /// struct fields instead of going through the uniform value type.
    pub fn subscribe_select<V, F, C>(
        &mut self,
        id: impl Into<RecordId>,
        select: F,
        deliver: C,
    ) -> (WatchId, Option<V>)
    where
        V: Clone + PartialEq + Send + 'static,
        F: Fn(&R) -> V + Send + 'static,
        C: FnMut(&Option<V>) + Send + 'static,
    {
        let id = id.into();
        self.watchers.watch_eq(
            &self.state,
            move |state| state.resolve(id.as_str()).map(|row| select(&row)),
            deliver,
        )
    }

    /// Remove a watch. Returns false when the handle was already gone.
    pub fn unsubscribe(&mut self, watch: WatchId) -> bool {
        self.watchers.unwatch(watch)
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Note, NoteField, NotePatch, NoteValue};
    use std::sync::{Arc, Mutex};

    fn seed() -> Vec<Note> {
        vec![Note::new("a", "alpha", 1), Note::new("b", "beta", 2)]
    }

    #[test]
    fn test_store_replace_then_read() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(seed());

        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
        assert_eq!(store.resolve("b").unwrap().title, "beta");
        assert_eq!(store.field("a", NoteField::Score), Some(NoteValue::Int(1)));
        assert_eq!(
            store.field("a", NoteField::Id),
            Some(NoteValue::Str("a".to_string()))
        );
    }

    #[test]
    fn test_store_patch_shows_through_resolve() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(seed());
        store.patch_one("a", NotePatch::title("edited"));

        assert_eq!(store.resolve("a").unwrap().title, "edited");
        // Base row is untouched.
        assert_eq!(store.state().rows()[0].title, "alpha");
    }

    #[test]
    #[should_panic(expected = "empty identity")]
    fn test_store_rejects_empty_identity_on_load() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(vec![Note::new("", "nameless", 0)]);
    }

    #[test]
    fn test_store_retain_policy_keeps_stale_entries() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(seed());
        store.patch_one("b", NotePatch::score(20));

        store.replace_all(vec![Note::new("a", "alpha", 1)]);
        assert_eq!(store.stats().stale_overlay_entries, 1);

        // The parked patch re-applies when "b" comes back.
        store.replace_all(seed());
        assert_eq!(store.resolve("b").unwrap().score, 20);
    }

    #[test]
    fn test_store_evict_policy_drops_stale_entries() {
        let mut store: RecordStore<Note> = RecordStore::with_options(StoreOptions::evicting());
        store.replace_all(seed());
        store.patch_one("b", NotePatch::score(20));

        store.replace_all(vec![Note::new("a", "alpha", 1)]);
        assert_eq!(store.stats().overlay_entries, 0);

        // "b" comes back clean.
        store.replace_all(seed());
        assert_eq!(store.resolve("b").unwrap().score, 2);
    }

    #[test]
    fn test_store_subscribe_field_gates_unrelated_edits() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(seed());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (_, current) = store.subscribe_field("a", NoteField::Title, move |value| {
            sink.lock().unwrap().push(value.clone());
        });
        assert_eq!(current, Some(NoteValue::Str("alpha".to_string())));

        // Other record, other field: gated.
        store.patch_one("b", NotePatch::title("noise"));
        store.patch_one("a", NotePatch::score(5));
        assert!(seen.lock().unwrap().is_empty());

        store.patch_one("a", NotePatch::title("loud"));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some(NoteValue::Str("loud".to_string()))]
        );
    }

    #[test]
    fn test_store_subscribe_row_gates_on_named_fields() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(seed());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (_, current) = store.subscribe_row("a", &[NoteField::Title], move |slice| {
            sink.lock().unwrap().push(slice.clone());
        });
        assert_eq!(
            current.unwrap().get(NoteField::Title),
            Some(&NoteValue::Str("alpha".to_string()))
        );

        // A field outside the slice: gated.
        store.patch_one("a", NotePatch::score(9));
        assert!(seen.lock().unwrap().is_empty());

        store.patch_one("a", NotePatch::title("loud"));
        let delivered = seen.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(
            delivered[0].as_ref().unwrap().get(NoteField::Title),
            Some(&NoteValue::Str("loud".to_string()))
        );
    }

    #[test]
    fn test_store_subscribe_before_load_sees_none_then_value() {
        let mut store: RecordStore<Note> = RecordStore::new();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (_, current) = store.subscribe_field("a", NoteField::Score, move |value| {
            sink.lock().unwrap().push(value.clone());
        });
        assert_eq!(current, None);

        store.replace_all(seed());
        assert_eq!(*seen.lock().unwrap(), vec![Some(NoteValue::Int(1))]);
    }

    #[test]
    fn test_store_unsubscribe_stops_deliveries() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(seed());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (watch, _) = store.subscribe_ids(move |ids| {
            sink.lock().unwrap().push(ids.len());
        });
        assert_eq!(store.watcher_count(), 1);

        assert!(store.unsubscribe(watch));
        assert!(!store.unsubscribe(watch));
        store.replace_all(vec![Note::new("solo", "s", 0)]);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(store.watcher_count(), 0);
    }

    #[test]
    fn test_store_stats_track_all_parts() {
        let mut store: RecordStore<Note> = RecordStore::new();
        store.replace_all(seed());
        store.patch_one("a", NotePatch::score(9));
        store.patch_one("ghost", NotePatch::score(1));
        store.subscribe_ids(|_| {});

        let stats = store.stats();
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.indexed, 2);
        assert_eq!(stats.overlay_entries, 2);
        assert_eq!(stats.stale_overlay_entries, 1);
        assert_eq!(stats.watchers, 1);
    }

    #[test]
    fn test_store_stats_serialize_for_logs() {
        let store: RecordStore<Note> = RecordStore::new();
        let json = serde_json::to_value(store.stats()).unwrap();
        assert_eq!(json["rows"], 0);
        assert_eq!(json["watchers"], 0);
    }
}
