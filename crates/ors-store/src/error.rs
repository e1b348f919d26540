//! Error types for the store layer.
//!
//! Absence is never an error here: reads against unknown identities
//! return `None`. The only fallible surface is parsing configuration
//! values out of their string forms.

use thiserror::Error;

/// Errors from parsing configuration and sort values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The string named no known overlay policy.
    #[error("unknown overlay policy: {0:?} (expected \"retain\" or \"evict_stale\")")]
    OverlayPolicy(String),

    /// The string named no known sort direction.
    #[error("unknown sort direction: {0:?} (expected \"asc\", \"desc\" or \"none\")")]
    SortDir(String),
}
