//! Patch overlay.
//!
//! The overlay remembers, per identity, the accumulated partial updates
//! applied since the store was created. It is deliberately independent of
//! the base collection: replacing the collection leaves the overlay alone,
//! so local edits survive a reload of the underlying data. Entries are
//! only ever written or merged, never deleted one by one; the single bulk
//! eviction hook is [`retain_indexed`](PatchOverlay::retain_indexed).

use crate::id::RecordId;
use crate::index::IdentityIndex;
use crate::record::{Record, RecordPatch};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Accumulated patches keyed by record identity.
#[derive(Debug, Clone)]
pub struct PatchOverlay<R: Record> {
    patches: HashMap<RecordId, R::Patch>,
}

impl<R: Record> PatchOverlay<R> {
    /// An overlay with no entries.
    pub fn new() -> Self {
        Self {
            patches: HashMap::new(),
        }
    }

    /// Fold `patch` into the entry for `id`.
    ///
    /// The incoming patch wins field-wise over whatever the entry already
    /// holds. An identity with no entry yet gets one, even for an empty
    /// patch, and nothing requires `id` to exist in any collection.
    pub fn apply(&mut self, id: RecordId, patch: R::Patch) {
        match self.patches.entry(id) {
            Entry::Occupied(mut slot) => slot.get_mut().merge(patch),
            Entry::Vacant(slot) => {
                slot.insert(patch);
            }
        }
    }

    /// The accumulated patch for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&R::Patch> {
        self.patches.get(id)
    }

    /// True when `id` has an overlay entry.
    pub fn contains(&self, id: &str) -> bool {
        self.patches.contains_key(id)
    }

    /// Number of overlay entries.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// True when the overlay holds no entries.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Iterate the identities that currently carry an entry.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.patches.keys()
    }

    /// Number of entries whose identity is absent from `index`.
    pub fn stale_count(&self, index: &IdentityIndex) -> usize {
        self.patches
            .keys()
            .filter(|id| !index.contains(id.as_str()))
            .count()
    }

    /// Drop every entry whose identity is absent from `index`.
    ///
    /// Returns the number of entries evicted.
    pub fn retain_indexed(&mut self, index: &IdentityIndex) -> usize {
        let before = self.patches.len();
        self.patches.retain(|id, _| index.contains(id.as_str()));
        before - self.patches.len()
    }
}

impl<R: Record> Default for PatchOverlay<R> {
    fn default() -> Self {
        Self::new()
    }
}
