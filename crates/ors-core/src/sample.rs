//! Shared unit-test fixture: a small three-field record.

use crate::id::RecordId;
use crate::record::{Record, RecordPatch};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub id: String,
    pub label: String,
    pub count: i64,
}

impl Entry {
    pub fn new(id: &str, label: &str, count: i64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryField {
    Id,
    Label,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EntryValue {
    Str(String),
    Int(i64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EntryPatch {
    pub label: Option<String>,
    pub count: Option<i64>,
}

impl EntryPatch {
    pub fn label(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::default()
        }
    }

    pub fn count(count: i64) -> Self {
        Self {
            count: Some(count),
            ..Self::default()
        }
    }
}

impl Record for Entry {
    type Field = EntryField;
    type Value = EntryValue;
    type Patch = EntryPatch;

    fn identity(&self) -> RecordId {
        RecordId::new(self.id.as_str())
    }

    fn field(&self, field: EntryField) -> EntryValue {
        match field {
            EntryField::Id => EntryValue::Str(self.id.clone()),
            EntryField::Label => EntryValue::Str(self.label.clone()),
            EntryField::Count => EntryValue::Int(self.count),
        }
    }
}

impl RecordPatch<Entry> for EntryPatch {
    fn merge(&mut self, newer: Self) {
        if let Some(label) = newer.label {
            self.label = Some(label);
        }
        if let Some(count) = newer.count {
            self.count = Some(count);
        }
    }

    fn apply_to(&self, base: &mut Entry) {
        if let Some(label) = &self.label {
            base.label = label.clone();
        }
        if let Some(count) = self.count {
            base.count = count;
        }
    }

    fn field(&self, field: EntryField) -> Option<EntryValue> {
        match field {
            EntryField::Id => None,
            EntryField::Label => self.label.clone().map(EntryValue::Str),
            EntryField::Count => self.count.map(EntryValue::Int),
        }
    }

    fn is_empty(&self) -> bool {
        self.label.is_none() && self.count.is_none()
    }
}
