//! # ors-store
//!
//! Store layer for the ORS (Overlay Record Store).
//!
//! This crate provides:
//! - The [`RecordStore`] facade: replace-all / patch-one mutation with
//!   exactly one notification pass per write
//! - Field, row-slice, identity-list and typed-selector subscriptions,
//!   all gated on value equality
//! - Overlay eviction policies for collection replacement
//! - A sort side-store for table UIs
//! - Live value bindings refreshed by the notification pass
//!
//! ## Example
//!
//! ```rust,ignore
//! use ors_store::{RecordStore, StoreOptions};
//!
//! let mut store: RecordStore<Item> = RecordStore::new();
//!
//! // Watch one field; the callback only fires when the value changes.
//! let (watch, current) = store.subscribe_field("one", ItemField::Name, |name| {
//!     println!("name is now {name:?}");
//! });
//!
//! // Load data; accumulated patches survive later reloads.
//! store.replace_all(fetch_items());
//! store.patch_one("one", ItemPatch::name("edited"));
//!
//! store.unsubscribe(watch);
//! ```

pub mod binding;
pub mod error;
pub mod options;
pub mod sort;
pub mod store;

#[cfg(test)]
mod fixture;

// Store exports
pub use store::{RecordStore, StoreStats};

// Options exports
pub use options::{OverlayPolicy, StoreOptions};

// Sort exports
pub use sort::{SortDir, SortState, SortStore};

// Binding exports
pub use binding::Binding;

// Error exports
pub use error::ParseError;

// Re-export commonly used types from ors-core and ors-watch
pub use ors_core::{
    id::RecordId,
    record::{Record, RecordPatch},
    slice::RowSlice,
    state::StoreState,
};
pub use ors_watch::watch::WatchId;
