//! Live value bindings.
//!
//! A binding is the hands-off way to consume a watch: instead of running
//! code on every change, it keeps the latest projected value in a shared
//! slot the caller can read whenever it likes. The slot is refreshed by
//! the store's normal notification pass, so reading a binding never
//! touches the store itself.

use crate::store::RecordStore;
use ors_core::id::RecordId;
use ors_core::record::Record;
use ors_core::slice::RowSlice;
use ors_watch::watch::WatchId;
use parking_lot::Mutex;
use std::sync::Arc;

/// A live, auto-refreshed handle to one projected value.
///
/// The binding stays live until its watch is removed with
/// [`RecordStore::unsubscribe`]; after that the slot freezes at the last
/// delivered value.
#[derive(Debug)]
pub struct Binding<V> {
    slot: Arc<Mutex<V>>,
    watch: WatchId,
}

impl<V: Clone> Binding<V> {
    /// The most recently projected value.
    pub fn get(&self) -> V {
        self.slot.lock().clone()
    }

    /// The watch keeping this binding fresh. Pass it to
    /// [`RecordStore::unsubscribe`] to detach.
    pub fn watch_id(&self) -> WatchId {
        self.watch
    }
}

impl<R: Record> RecordStore<R> {
    /// Bind one field of one record to a live slot.
    pub fn bind_field(
        &mut self,
        id: impl Into<RecordId>,
        field: R::Field,
    ) -> Binding<Option<R::Value>> {
        let slot = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&slot);
        let (watch, current) = self.subscribe_field(id, field, move |value| {
            *sink.lock() = value.clone();
        });
        *slot.lock() = current;
        Binding { slot, watch }
    }

    /// Bind a fixed set of fields of one record to a live slot.
    pub fn bind_row(
        &mut self,
        id: impl Into<RecordId>,
        fields: &[R::Field],
    ) -> Binding<Option<RowSlice<R>>> {
        let slot = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&slot);
        let (watch, current) = self.subscribe_row(id, fields, move |slice| {
            *sink.lock() = slice.clone();
        });
        *slot.lock() = current;
        Binding { slot, watch }
    }
}
