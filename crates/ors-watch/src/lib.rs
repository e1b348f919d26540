//! Equality-gated projection watching.
//!
//! This crate is deliberately ignorant of records and stores: it watches
//! an arbitrary state type `S` through caller-supplied projection
//! closures. The store facade decides what the state is and what the
//! interesting projections are.

pub mod watch;

// Re-export main types for convenience
pub use watch::{WatchId, WatchSet};
