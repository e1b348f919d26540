//! Field Binding Example
//!
//! Bindings are the pull side of the watch layer: instead of reacting to
//! every change, a binding keeps the latest projected value in a shared
//! slot. Here a writer thread hammers a store behind a mutex while the
//! main thread reads bindings without ever locking the store itself.
//!
//! Run with: cargo run --example field_bindings

use ors_store::{Record, RecordId, RecordPatch, RecordStore};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, PartialEq)]
struct Sensor {
    id: String,
    reading: i64,
    status: String,
}

impl Sensor {
    fn new(id: &str, reading: i64, status: &str) -> Self {
        Self {
            id: id.to_string(),
            reading,
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SensorField {
    Id,
    Reading,
    Status,
}

#[derive(Debug, Clone, PartialEq)]
enum SensorValue {
    Str(String),
    Int(i64),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SensorPatch {
    reading: Option<i64>,
    status: Option<String>,
}

impl SensorPatch {
    fn reading(reading: i64) -> Self {
        Self {
            reading: Some(reading),
            ..Self::default()
        }
    }

    fn status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Self::default()
        }
    }
}

impl Record for Sensor {
    type Field = SensorField;
    type Value = SensorValue;
    type Patch = SensorPatch;

    fn identity(&self) -> RecordId {
        RecordId::new(self.id.as_str())
    }

    fn field(&self, field: SensorField) -> SensorValue {
        match field {
            SensorField::Id => SensorValue::Str(self.id.clone()),
            SensorField::Reading => SensorValue::Int(self.reading),
            SensorField::Status => SensorValue::Str(self.status.clone()),
        }
    }
}

impl RecordPatch<Sensor> for SensorPatch {
    fn merge(&mut self, newer: Self) {
        if let Some(reading) = newer.reading {
            self.reading = Some(reading);
        }
        if let Some(status) = newer.status {
            self.status = Some(status);
        }
    }

    fn apply_to(&self, base: &mut Sensor) {
        if let Some(reading) = self.reading {
            base.reading = reading;
        }
        if let Some(status) = &self.status {
            base.status = status.clone();
        }
    }

    fn field(&self, field: SensorField) -> Option<SensorValue> {
        match field {
            SensorField::Id => None,
            SensorField::Reading => self.reading.map(SensorValue::Int),
            SensorField::Status => self.status.clone().map(SensorValue::Str),
        }
    }

    fn is_empty(&self) -> bool {
        self.reading.is_none() && self.status.is_none()
    }
}

fn main() {
    println!("=== Field Binding Demo ===\n");

    let store = Arc::new(Mutex::new(RecordStore::<Sensor>::new()));
    store.lock().replace_all(vec![
        Sensor::new("s1", 0, "idle"),
        Sensor::new("s2", 0, "idle"),
    ]);
    {
        let guard = store.lock();
        println!(
            "Loaded {} sensors; s2 identifies as {:?}.",
            guard.len(),
            guard.field("s2", SensorField::Id)
        );
    }

    // Bindings hold the latest projected value in their own slot.
    let reading = store.lock().bind_field("s1", SensorField::Reading);
    let status_row = store
        .lock()
        .bind_row("s2", &[SensorField::Reading, SensorField::Status]);
    println!("\nBindings registered:");
    println!("  s1 reading        = {:?}", reading.get());
    println!("  s2 reading+status = {:?}", status_row.get());

    // A writer thread applies patches through the shared handle. The
    // store's notification pass refreshes both slots on each write.
    let writer = Arc::clone(&store);
    let burst = thread::spawn(move || {
        for i in 1..=5 {
            writer.lock().patch_one("s1", SensorPatch::reading(i * 100));
            let status = if i % 2 == 0 { "ok" } else { "hot" };
            writer.lock().patch_one("s2", SensorPatch::status(status));
        }
    });
    burst.join().unwrap();

    println!("\nAfter a 10-patch burst from the writer thread:");
    println!("  s1 reading        = {:?}", reading.get());
    if let Some(row) = status_row.get() {
        println!(
            "  s2 reading={:?}, status={:?}",
            row.get(SensorField::Reading),
            row.get(SensorField::Status)
        );
    }

    // A detached binding freezes at whatever it last heard.
    store.lock().unsubscribe(reading.watch_id());
    store.lock().patch_one("s1", SensorPatch::reading(999));
    println!("\nDetached the s1 binding, then patched s1 again:");
    println!("  binding still reads {:?}", reading.get());
    println!(
        "  the store itself reads {:?}",
        store.lock().field("s1", SensorField::Reading)
    );

    println!("\n=== Demo Complete ===");
}
