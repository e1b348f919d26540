//! Shared unit-test fixture: a small three-field record.

use ors_core::id::RecordId;
use ors_core::record::{Record, RecordPatch};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Note {
    pub id: String,
    pub title: String,
    pub score: i64,
}

impl Note {
    pub fn new(id: &str, title: &str, score: i64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoteField {
    Id,
    Title,
    Score,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NoteValue {
    Str(String),
    Int(i64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct NotePatch {
    pub title: Option<String>,
    pub score: Option<i64>,
}

impl NotePatch {
    pub fn title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn score(score: i64) -> Self {
        Self {
            score: Some(score),
            ..Self::default()
        }
    }
}

impl Record for Note {
    type Field = NoteField;
    type Value = NoteValue;
    type Patch = NotePatch;

    fn identity(&self) -> RecordId {
        RecordId::new(self.id.as_str())
    }

    fn field(&self, field: NoteField) -> NoteValue {
        match field {
            NoteField::Id => NoteValue::Str(self.id.clone()),
            NoteField::Title => NoteValue::Str(self.title.clone()),
            NoteField::Score => NoteValue::Int(self.score),
        }
    }
}

impl RecordPatch<Note> for NotePatch {
    fn merge(&mut self, newer: Self) {
        if let Some(title) = newer.title {
            self.title = Some(title);
        }
        if let Some(score) = newer.score {
            self.score = Some(score);
        }
    }

    fn apply_to(&self, base: &mut Note) {
        if let Some(title) = &self.title {
            base.title = title.clone();
        }
        if let Some(score) = self.score {
            base.score = score;
        }
    }

    fn field(&self, field: NoteField) -> Option<NoteValue> {
        match field {
            NoteField::Id => None,
            NoteField::Title => self.title.clone().map(NoteValue::Str),
            NoteField::Score => self.score.map(NoteValue::Int),
        }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.score.is_none()
    }
}
