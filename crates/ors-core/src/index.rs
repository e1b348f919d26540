//! Identity index over a record collection.
//!
//! The index maps each record identity to its position in the backing
//! collection. It is rebuilt from scratch on every collection replacement
//! rather than edited incrementally, which keeps it trivially consistent
//! with whatever the collection currently holds.

use crate::id::RecordId;
use crate::record::Record;
use std::collections::HashMap;

/// Identity -> position map for one record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityIndex {
    positions: HashMap<RecordId, usize>,
}

impl IdentityIndex {
    /// An index over the empty collection.
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }

    /// Build the index for `rows` in one pass.
    ///
    /// When two rows share an identity, the later position overwrites the
    /// earlier one, so duplicate identities resolve to the last occurrence.
    /// Earlier duplicates stay in the collection but become unreachable
    /// through the index.
    pub fn rebuild<R: Record>(rows: &[R]) -> Self {
        let mut positions = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            positions.insert(row.identity(), position);
        }
        Self { positions }
    }

    /// Position of `id` in the collection, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// True when `id` is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of distinct identities.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate the indexed identities in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.positions.keys()
    }
}
