//! Store state and the effective-record resolver.
//!
//! One `StoreState` owns the three pieces the resolver rules are written
//! against: the base collection, the identity index over it, and the patch
//! overlay. Effective records are computed fresh on every read, base first
//! and overlay on top, so a read always reflects the current collection
//! and the patches accumulated so far. Nothing here is cached.

use crate::id::RecordId;
use crate::index::IdentityIndex;
use crate::overlay::PatchOverlay;
use crate::record::{Record, RecordPatch};
use crate::slice::RowSlice;

/// Base collection, identity index and patch overlay.
#[derive(Debug, Clone)]
pub struct StoreState<R: Record> {
    rows: Vec<R>,
    index: IdentityIndex,
    overlay: PatchOverlay<R>,
}

impl<R: Record> StoreState<R> {
    /// An empty state: no rows, no overlay entries.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: IdentityIndex::new(),
            overlay: PatchOverlay::new(),
        }
    }

    // === Reads ===

    /// The base collection, in load order, untouched by the overlay.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The identity index over the base collection.
    pub fn index(&self) -> &IdentityIndex {
        &self.index
    }

    /// The patch overlay.
    pub fn overlay(&self) -> &PatchOverlay<R> {
        &self.overlay
    }

    /// Number of rows in the base collection, duplicates included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the base collection is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when `id` resolves to a record.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// The identity of every row, in row order.
    ///
    /// Rows sharing an identity each contribute their own element; this is
    /// a projection of the collection, not of the index.
    pub fn ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|row| row.identity()).collect()
    }

    /// The effective record for `id`: base row with its overlay entry
    /// applied on top.
    ///
    /// `None` when no base row carries this identity, even if the overlay
    /// holds an entry for it. Overlay entries never conjure rows into
    /// existence; a parked patch becomes visible only once a matching
    /// record is loaded.
    pub fn resolve(&self, id: &str) -> Option<R> {
        let position = self.index.position(id)?;
        let mut row = self.rows.get(position)?.clone();
        if let Some(patch) = self.overlay.get(id) {
            patch.apply_to(&mut row);
        }
        Some(row)
    }

    /// One field of the effective record for `id`.
    ///
    /// The overlay entry's value wins when it carries this field;
    /// otherwise the base row's value is read. Skips materializing the
    /// full effective record.
    pub fn field_of(&self, id: &str, field: R::Field) -> Option<R::Value> {
        let position = self.index.position(id)?;
        let base = self.rows.get(position)?;
        match self.overlay.get(id).and_then(|patch| patch.field(field)) {
            Some(patched) => Some(patched),
            None => Some(base.field(field)),
        }
    }

    /// A slice of the effective record for `id` holding only `fields`.
    pub fn row_slice(&self, id: &str, fields: &[R::Field]) -> Option<RowSlice<R>> {
        self.resolve(id).map(|row| RowSlice::of(&row, fields))
    }

    // === Mutations ===

    /// Swap in a new base collection and rebuild the index for it.
    ///
    /// The overlay is left untouched; accumulated patches keep applying to
    /// whatever rows the new collection holds under the same identities.
    pub fn replace_rows(&mut self, rows: Vec<R>) {
        self.index = IdentityIndex::rebuild(&rows);
        self.rows = rows;
    }

    /// Fold `patch` into the overlay entry for `id`.
    pub fn apply_patch(&mut self, id: RecordId, patch: R::Patch) {
        self.overlay.apply(id, patch);
    }

    /// Evict overlay entries whose identity no longer resolves.
    ///
    /// Returns the number of entries dropped.
    pub fn prune_overlay(&mut self) -> usize {
        self.overlay.retain_indexed(&self.index)
    }
}

impl<R: Record> Default for StoreState<R> {
    fn default() -> Self {
        Self::new()
    }
}
