//! The record abstraction.
//!
//! A record is a row-shaped value with one string identity and a closed set
//! of named fields. Fields are addressed through a caller-defined tag enum
//! rather than by string name, so watching a misspelled field is a compile
//! error instead of a silently dead subscription, and the patch shape for a
//! record type is pinned down at the type level instead of being an
//! arbitrary bag of keys.

use crate::id::RecordId;
use std::fmt;

/// A row-shaped value held in a record store.
///
/// Implementors pick three companion types: a [`Field`](Record::Field) tag
/// enum naming every addressable field, a uniform [`Value`](Record::Value)
/// that any field can be read out as, and a [`Patch`](Record::Patch) shape
/// carrying partial updates.
///
/// Record types are plain owned data (`'static`): watches hold values
/// projected out of them for as long as the watch lives.
pub trait Record: Clone + fmt::Debug + 'static {
    /// Tag enum naming every addressable field of the record.
    type Field: Copy + Eq + fmt::Debug + Send + 'static;

    /// Uniform value any single field can be read out as.
    ///
    /// Equality on this type is what decides whether a watched field
    /// "changed", so `PartialEq` should compare by content.
    type Value: Clone + PartialEq + fmt::Debug + Send + 'static;

    /// Partial-update shape for this record type.
    type Patch: RecordPatch<Self>;

    /// The identity this record is indexed under.
    ///
    /// Must be stable for the record's lifetime: patches never move a
    /// record to a different identity.
    fn identity(&self) -> RecordId;

    /// Read one field as a uniform value.
    fn field(&self, field: Self::Field) -> Self::Value;
}

/// A partial update: some subset of a record's fields with new values.
///
/// Patches accumulate field-wise. Merging two patches keeps every field
/// either of them carries, with the newer patch winning where both carry
/// the same field.
pub trait RecordPatch<R: Record>: Clone + Default + fmt::Debug {
    /// Fold a newer patch into this one.
    ///
    /// Fields present in `newer` replace fields already here; fields absent
    /// from `newer` leave the existing values untouched.
    fn merge(&mut self, newer: Self);

    /// Overwrite `base` with every field this patch carries.
    fn apply_to(&self, base: &mut R);

    /// The patched value for `field`, if this patch carries one.
    fn field(&self, field: R::Field) -> Option<R::Value>;

    /// True when the patch carries no field at all.
    fn is_empty(&self) -> bool;
}
