//! Row slices: a picked subset of an effective record's fields.

use crate::record::Record;

/// The values of a chosen set of fields, in the order they were requested.
///
/// A slice is a snapshot: it holds owned values read out of one effective
/// record and never changes afterwards. Two slices are equal when they
/// name the same fields in the same order with equal values, which is
/// exactly the comparison the watch layer uses to decide whether a row
/// projection changed.
#[derive(Debug, Clone)]
pub struct RowSlice<R: Record> {
    fields: Vec<(R::Field, R::Value)>,
}

impl<R: Record> RowSlice<R> {
    /// Read `fields` out of `record`, in order.
    ///
    /// A field requested twice is read twice; the slice reproduces the
    /// request shape verbatim.
    pub fn of(record: &R, fields: &[R::Field]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|&field| (field, record.field(field)))
                .collect(),
        }
    }

    /// The value picked for `field`, if it was part of the request.
    pub fn get(&self, field: R::Field) -> Option<&R::Value> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value)
    }

    /// Iterate the picked fields in request order.
    pub fn iter(&self) -> impl Iterator<Item = (R::Field, &R::Value)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// Number of picked fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields were requested.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R: Record> PartialEq for RowSlice<R> {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}
