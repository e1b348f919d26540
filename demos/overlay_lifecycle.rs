//! Overlay Lifecycle Example
//!
//! Walks a record store through the life of its patch overlay: an edit
//! that arrives before any data, loads that re-apply parked edits, edits
//! that outlive a full collection reload, and the two policies for
//! overlay entries whose record has vanished.
//!
//! Run with: cargo run --example overlay_lifecycle

use ors_store::{OverlayPolicy, Record, RecordId, RecordPatch, RecordStore, StoreOptions};

#[derive(Debug, Clone, PartialEq)]
struct Task {
    id: String,
    title: String,
    done: bool,
}

impl Task {
    fn new(id: &str, title: &str, done: bool) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            done,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskField {
    Id,
    Title,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
enum TaskValue {
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TaskPatch {
    title: Option<String>,
    done: Option<bool>,
}

impl TaskPatch {
    fn title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }
}

impl Record for Task {
    type Field = TaskField;
    type Value = TaskValue;
    type Patch = TaskPatch;

    fn identity(&self) -> RecordId {
        RecordId::new(self.id.as_str())
    }

    fn field(&self, field: TaskField) -> TaskValue {
        match field {
            TaskField::Id => TaskValue::Str(self.id.clone()),
            TaskField::Title => TaskValue::Str(self.title.clone()),
            TaskField::Done => TaskValue::Bool(self.done),
        }
    }
}

impl RecordPatch<Task> for TaskPatch {
    fn merge(&mut self, newer: Self) {
        if let Some(title) = newer.title {
            self.title = Some(title);
        }
        if let Some(done) = newer.done {
            self.done = Some(done);
        }
    }

    fn apply_to(&self, base: &mut Task) {
        if let Some(title) = &self.title {
            base.title = title.clone();
        }
        if let Some(done) = self.done {
            base.done = done;
        }
    }

    fn field(&self, field: TaskField) -> Option<TaskValue> {
        match field {
            TaskField::Id => None,
            TaskField::Title => self.title.clone().map(TaskValue::Str),
            TaskField::Done => self.done.map(TaskValue::Bool),
        }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.done.is_none()
    }
}

fn backend_rows() -> Vec<Task> {
    vec![
        Task::new("write", "Write the report", false),
        Task::new("review", "Review the draft", false),
        Task::new("send", "Send it out", false),
    ]
}

fn show_fields(store: &RecordStore<Task>, id: &str) {
    for field in [TaskField::Id, TaskField::Title, TaskField::Done] {
        println!("    {:?} = {:?}", field, store.field(id, field));
    }
}

fn main() {
    println!("=== Overlay Lifecycle Demo ===\n");

    let mut store: RecordStore<Task> = RecordStore::new();

    // An edit lands before any data exists. It parks in the overlay.
    println!("--- Parked edits ---\n");
    store.patch_one("write", TaskPatch::done(true));
    println!("Patched \"write\" before any load.");
    println!("  resolve(\"write\") = {:?}", store.resolve("write"));
    let stats = store.stats();
    println!(
        "  overlay entries: {} ({} stale)\n",
        stats.overlay_entries, stats.stale_overlay_entries
    );

    // The collection arrives. The parked edit applies on top of it.
    store.replace_all(backend_rows());
    let write = store.resolve("write").unwrap();
    println!("Loaded {} rows from the backend.", store.len());
    println!(
        "  \"{}\" is now done = {} (parked edit applied)",
        write.title, write.done
    );
    println!("  field projections of \"write\":");
    show_fields(&store, "write");
    println!();

    // Edits never rewrite the base collection.
    println!("--- Edits survive reloads ---\n");
    store.patch_one("review", TaskPatch::title("Review the final draft"));
    println!(
        "  effective title: {:?}",
        store.resolve("review").unwrap().title
    );
    println!("  base title:      {:?}", store.state().rows()[1].title);

    // Reloading the same backend data does not undo accumulated edits.
    store.replace_all(backend_rows());
    println!(
        "  after reload:    {:?} (edit re-applied)\n",
        store.resolve("review").unwrap().title
    );

    // A shrunken collection leaves the "send" edit parked, not lost.
    println!("--- Vanished records, retain policy ---\n");
    store.patch_one("send", TaskPatch::done(true));
    store.replace_all(vec![Task::new("write", "Write the report", false)]);
    let stats = store.stats();
    println!("Replaced with a 1-row collection.");
    println!(
        "  overlay entries: {} ({} stale)",
        stats.overlay_entries, stats.stale_overlay_entries
    );
    println!("  resolve(\"send\") = {:?}", store.resolve("send"));

    store.replace_all(backend_rows());
    println!(
        "  \"send\" comes back done = {} (parked edit re-applied)\n",
        store.resolve("send").unwrap().done
    );

    // The evicting policy drops stale entries at each replacement instead.
    println!("--- Vanished records, evict_stale policy ---\n");
    let mut evicting: RecordStore<Task> = RecordStore::with_options(StoreOptions::evicting());
    println!(
        "Second store with overlay_policy = {}.",
        evicting.options().overlay_policy
    );
    evicting.replace_all(backend_rows());
    evicting.patch_one("send", TaskPatch::done(true));

    evicting.replace_all(vec![Task::new("write", "Write the report", false)]);
    println!(
        "  after shrink, overlay entries: {}",
        evicting.stats().overlay_entries
    );

    evicting.replace_all(backend_rows());
    println!(
        "  \"send\" comes back done = {} (edit was evicted)",
        evicting.resolve("send").unwrap().done
    );
    assert_eq!(evicting.options().overlay_policy, OverlayPolicy::EvictStale);

    println!("\n=== Demo Complete ===");
}
