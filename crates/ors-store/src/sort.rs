//! Sort side-store.
//!
//! Tracks, per table key, which column is actively sorted and in which
//! direction. Exactly one column per table is active at a time: setting a
//! new column replaces the previous one outright, and queries for any
//! other column answer [`SortDir::None`]. Inactive columns are never
//! tracked individually; their indicator state is derived.
//!
//! Built on the same watch machinery as the record store, so a column
//! indicator only hears about changes that actually move it, including
//! the implicit move to [`SortDir::None`] when another column takes over.

use crate::error::ParseError;
use ors_watch::watch::{WatchId, WatchSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Direction of an active sort, or the absence of one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    /// Not sorted. What every inactive column reports.
    #[default]
    None,
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDir {
    /// Canonical string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::None => "none",
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    /// The direction a repeated header click cycles to: ascending unless
    /// already ascending, then descending.
    pub fn toggled(&self) -> SortDir {
        match self {
            SortDir::Asc => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDir {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortDir::None),
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => Err(ParseError::SortDir(other.to_string())),
        }
    }
}

/// Pure sort data: the active column and direction per table key.
#[derive(Debug, Clone)]
pub struct SortState<T, C> {
    active: HashMap<T, (C, SortDir)>,
}

impl<T: Eq + Hash, C: Copy + Eq> SortState<T, C> {
    /// No table sorted.
    pub fn new() -> Self {
        Self {
            active: HashMap::new(),
        }
    }

    /// The active column and direction for `table`, if any.
    pub fn active(&self, table: &T) -> Option<(C, SortDir)> {
        self.active.get(table).copied()
    }

    /// The indicator for one column: the active direction when `column`
    /// is the active one, [`SortDir::None`] otherwise.
    pub fn column_dir(&self, table: &T, column: C) -> SortDir {
        match self.active.get(table) {
            Some((active, dir)) if *active == column => *dir,
            _ => SortDir::None,
        }
    }

    /// Make `column` the active sort for `table`.
    pub fn set(&mut self, table: T, column: C, dir: SortDir) {
        self.active.insert(table, (column, dir));
    }

    /// Number of tables with an active sort.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True when no table is sorted.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl<T: Eq + Hash, C: Copy + Eq> Default for SortState<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort state behind the watch layer.
#[derive(Debug)]
pub struct SortStore<T, C> {
    state: SortState<T, C>,
    watchers: WatchSet<SortState<T, C>>,
}

impl<T, C> SortStore<T, C>
where
    T: Eq + Hash + Clone + Send + 'static,
    C: Copy + Eq + Send + 'static,
{
    /// An empty sort store.
    pub fn new() -> Self {
        Self {
            state: SortState::new(),
            watchers: WatchSet::new(),
        }
    }

    /// Make `column` the active sort for `table` and notify watchers.
    pub fn set(&mut self, table: T, column: C, dir: SortDir) {
        self.state.set(table, column, dir);
        let delivered = self.watchers.notify(&self.state);
        tracing::trace!("sort set: {delivered} deliveries");
    }

    /// Cycle `column` the way a header click does and return the new
    /// direction.
    pub fn toggle(&mut self, table: T, column: C) -> SortDir {
        let next = self.state.column_dir(&table, column).toggled();
        self.set(table, column, next);
        next
    }

    /// The indicator for one column.
    pub fn column_dir(&self, table: &T, column: C) -> SortDir {
        self.state.column_dir(table, column)
    }

    /// The active column and direction for `table`, if any.
    pub fn active(&self, table: &T) -> Option<(C, SortDir)> {
        self.state.active(table)
    }

    /// Watch one column's indicator.
    ///
    /// Fires when the column becomes the active sort, changes direction,
    /// or loses the active slot to another column (delivering
    /// [`SortDir::None`]).
    pub fn subscribe_column<Cb>(&mut self, table: T, column: C, deliver: Cb) -> (WatchId, SortDir)
    where
        Cb: FnMut(&SortDir) + Send + 'static,
    {
        self.watchers.watch_eq(
            &self.state,
            move |state| state.column_dir(&table, column),
            deliver,
        )
    }

    /// Remove a watch. Returns false when the handle was already gone.
    pub fn unsubscribe(&mut self, watch: WatchId) -> bool {
        self.watchers.unwatch(watch)
    }

    /// Number of registered watches.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }
}

impl<T, C> Default for SortStore<T, C>
where
    T: Eq + Hash + Clone + Send + 'static,
    C: Copy + Eq + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Table {
        Users,
        Orders,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Column {
        Name,
        Total,
        When,
    }

    #[test]
    fn test_sort_one_active_column_per_table() {
        let mut store: SortStore<Table, Column> = SortStore::new();
        store.set(Table::Users, Column::Name, SortDir::Asc);

        assert_eq!(store.column_dir(&Table::Users, Column::Name), SortDir::Asc);
        assert_eq!(store.column_dir(&Table::Users, Column::Total), SortDir::None);

        // A new column takes the single active slot.
        store.set(Table::Users, Column::Total, SortDir::Desc);
        assert_eq!(store.column_dir(&Table::Users, Column::Name), SortDir::None);
        assert_eq!(store.column_dir(&Table::Users, Column::Total), SortDir::Desc);
        assert_eq!(store.active(&Table::Users), Some((Column::Total, SortDir::Desc)));
    }

    #[test]
    fn test_sort_tables_are_independent() {
        let mut store: SortStore<Table, Column> = SortStore::new();
        store.set(Table::Users, Column::Name, SortDir::Asc);
        store.set(Table::Orders, Column::When, SortDir::Desc);

        assert_eq!(store.column_dir(&Table::Users, Column::Name), SortDir::Asc);
        assert_eq!(store.column_dir(&Table::Orders, Column::When), SortDir::Desc);
        assert_eq!(store.column_dir(&Table::Orders, Column::Name), SortDir::None);
    }

    #[test]
    fn test_sort_toggle_cycles_asc_then_desc() {
        let mut store: SortStore<Table, Column> = SortStore::new();

        assert_eq!(store.toggle(Table::Users, Column::Name), SortDir::Asc);
        assert_eq!(store.toggle(Table::Users, Column::Name), SortDir::Desc);
        assert_eq!(store.toggle(Table::Users, Column::Name), SortDir::Asc);

        // Toggling a column that lost the slot restarts at ascending.
        store.set(Table::Users, Column::Total, SortDir::Desc);
        assert_eq!(store.toggle(Table::Users, Column::Name), SortDir::Asc);
    }

    #[test]
    fn test_sort_subscribe_column_hears_displacement() {
        let mut store: SortStore<Table, Column> = SortStore::new();
        store.set(Table::Users, Column::Name, SortDir::Asc);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let (_, current) = store.subscribe_column(Table::Users, Column::Name, move |dir| {
            sink.lock().unwrap().push(*dir);
        });
        assert_eq!(current, SortDir::Asc);

        // Same value again: gated.
        store.set(Table::Users, Column::Name, SortDir::Asc);
        assert!(seen.lock().unwrap().is_empty());

        // Another table: gated.
        store.set(Table::Orders, Column::Name, SortDir::Desc);
        assert!(seen.lock().unwrap().is_empty());

        // Another column takes the slot: this column's indicator clears.
        store.set(Table::Users, Column::Total, SortDir::Asc);
        assert_eq!(*seen.lock().unwrap(), vec![SortDir::None]);
    }

    #[test]
    fn test_sort_unsubscribe() {
        let mut store: SortStore<Table, Column> = SortStore::new();
        let (watch, current) = store.subscribe_column(Table::Users, Column::Name, |_| {});
        assert_eq!(current, SortDir::None);
        assert_eq!(store.watcher_count(), 1);

        assert!(store.unsubscribe(watch));
        assert!(!store.unsubscribe(watch));
        assert_eq!(store.watcher_count(), 0);
    }

    #[test]
    fn test_sort_dir_string_round_trip() {
        for dir in [SortDir::None, SortDir::Asc, SortDir::Desc] {
            assert_eq!(dir.as_str().parse::<SortDir>().unwrap(), dir);
        }
        assert!("upward".parse::<SortDir>().is_err());
    }

    #[test]
    fn test_sort_dir_serde_lowercase() {
        assert_eq!(serde_json::to_string(&SortDir::Asc).unwrap(), "\"asc\"");
        let parsed: SortDir = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, SortDir::None);
    }
}
