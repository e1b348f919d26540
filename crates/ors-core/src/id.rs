//! Record identity.
//!
//! Every record carries exactly one identity value, and the identity is
//! always compared as a string. Callers that key their records by numbers
//! (or anything else) are expected to render them to strings up front, so
//! `42` and `"42"` address the same record.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// String identity of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity as a borrowed string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identity is the empty string.
    ///
    /// An empty identity is almost always a caller bug (a record built from
    /// a row that never had its key filled in), which is why the store
    /// rejects such records at load time.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Lets `HashMap<RecordId, _>` be queried with a plain `&str`.
impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
