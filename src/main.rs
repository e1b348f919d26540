use ors_core::id::RecordId;
use ors_core::record::{Record, RecordPatch};
use ors_store::{RecordStore, SortStore};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use stress_test::{stress_test_patches, stress_test_scaling};


// === Demo record type ===

/// One row of the demo table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub value: i64,
    pub another: bool,
    pub user_data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableField {
    Id,
    Name,
    Value,
    Another,
    UserData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRowPatch {
    pub name: Option<String>,
    pub value: Option<i64>,
    pub another: Option<bool>,
    pub user_data: Option<String>,
}

impl TableRowPatch {
    pub fn value(value: i64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn user_data(user_data: &str) -> Self {
        Self {
            user_data: Some(user_data.to_string()),
            ..Self::default()
        }
    }

    /// What the demo's update action writes: bump the value, flip the flag.
    pub fn bump(value: i64, another: bool) -> Self {
        Self {
            value: Some(value + 1),
            another: Some(!another),
            ..Self::default()
        }
    }
}

impl Record for TableRow {
    type Field = TableField;
    type Value = TableValue;
    type Patch = TableRowPatch;

    fn identity(&self) -> RecordId {
        RecordId::new(self.id.as_str())
    }

    fn field(&self, field: TableField) -> TableValue {
        match field {
            TableField::Id => TableValue::Str(self.id.clone()),
            TableField::Name => TableValue::Str(self.name.clone()),
            TableField::Value => TableValue::Int(self.value),
            TableField::Another => TableValue::Bool(self.another),
            TableField::UserData => TableValue::Str(self.user_data.clone()),
        }
    }
}

impl RecordPatch<TableRow> for TableRowPatch {
    fn merge(&mut self, newer: Self) {
        if let Some(name) = newer.name {
            self.name = Some(name);
        }
        if let Some(value) = newer.value {
            self.value = Some(value);
        }
        if let Some(another) = newer.another {
            self.another = Some(another);
        }
        if let Some(user_data) = newer.user_data {
            self.user_data = Some(user_data);
        }
    }

    fn apply_to(&self, base: &mut TableRow) {
        if let Some(name) = &self.name {
            base.name = name.clone();
        }
        if let Some(value) = self.value {
            base.value = value;
        }
        if let Some(another) = self.another {
            base.another = another;
        }
        if let Some(user_data) = &self.user_data {
            base.user_data = user_data.clone();
        }
    }

    fn field(&self, field: TableField) -> Option<TableValue> {
        match field {
            TableField::Id => None,
            TableField::Name => self.name.clone().map(TableValue::Str),
            TableField::Value => self.value.map(TableValue::Int),
            TableField::Another => self.another.map(TableValue::Bool),
            TableField::UserData => self.user_data.clone().map(TableValue::Str),
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.value.is_none()
            && self.another.is_none()
            && self.user_data.is_none()
    }
}

const SEED: &str = r#"[
    {"id": "one", "name": "First",  "value": 1, "another": false, "user_data": "alpha"},
    {"id": "two", "name": "Second", "value": 2, "another": true,  "user_data": "beta"}
]"#;

fn seed_rows() -> Vec<TableRow> {
    serde_json::from_str(SEED).expect("demo seed is valid JSON")
}

fn main() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async_main());
}

async fn async_main() {
    tracing_subscriber::fmt::init();

    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║            OVERLAY RECORD STORE DEMO                       ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    let store = Arc::new(Mutex::new(RecordStore::<TableRow>::new()));

    // Watches go in before any data exists; each prints what it hears.
    {
        let mut guard = store.lock();

        let (_, current) = guard.subscribe_field("one", TableField::Name, |name| {
            println!("  [name of one]       -> {name:?}");
        });
        println!("  [name of one]       starts at {current:?}");

        guard.subscribe_row(
            "one",
            &[TableField::Value, TableField::Another],
            |slice| match slice {
                Some(slice) => println!(
                    "  [value+flag of one] -> value={:?} another={:?}",
                    slice.get(TableField::Value),
                    slice.get(TableField::Another)
                ),
                None => println!("  [value+flag of one] -> (absent)"),
            },
        );

        guard.subscribe_ids(|ids| {
            let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
            println!("  [identity list]     -> {ids:?}");
        });

        guard.subscribe_select(
            "two",
            |row: &TableRow| row.user_data.clone(),
            |data| {
                println!("  [user_data of two]  -> {data:?}");
            },
        );
    }

    // An edit lands before the data does; it parks in the overlay.
    store.lock().patch_one("one", TableRowPatch::value(10));
    println!("\n  (patched one.value = 10 before any data arrived)\n");

    // The collection arrives late, as if from a slow backend.
    let loader = Arc::clone(&store);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        loader.lock().replace_all(seed_rows());
    });
    handle.await.unwrap();

    {
        let guard = store.lock();
        let one = guard.resolve("one").unwrap();
        println!(
            "\n  one resolves to value={} (base 1 overridden by the parked patch)",
            one.value
        );
    }

    // The update action: bump the value, flip the flag. Twice.
    {
        let mut guard = store.lock();
        for _ in 0..2 {
            let one = guard.resolve("one").unwrap();
            guard.patch_one("one", TableRowPatch::bump(one.value, one.another));
        }
        guard.patch_one("two", TableRowPatch::user_data("beta (reviewed)"));
    }

    // Reload the same base data: overlay edits survive.
    store.lock().replace_all(seed_rows());
    {
        let guard = store.lock();
        println!(
            "\n  after reload, one.value = {} (edits still applied)",
            guard.resolve("one").unwrap().value
        );
        println!(
            "  two reads back id={:?}, user_data={:?}",
            guard.field("two", TableField::Id),
            guard.field("two", TableField::UserData)
        );
    }

    // Sort indicators share the watch machinery.
    println!("\n  sort indicators:");
    let mut sort: SortStore<&'static str, TableField> = SortStore::new();
    sort.subscribe_column("items", TableField::Value, |dir| {
        println!("  [sort on value]     -> {dir}");
    });
    sort.toggle("items", TableField::Value);
    sort.toggle("items", TableField::Value);
    sort.toggle("items", TableField::Name);
    println!(
        "  value column now reads \"{}\"",
        sort.column_dir(&"items", TableField::Value)
    );

    let stats = store.lock().stats();
    println!(
        "\n  store stats: {}",
        serde_json::to_string_pretty(&stats).unwrap()
    );

    // Run async stress tests
    println!("\n\n╔════════════════════════════════════════════════════════════╗");
    println!("║            ASYNC STRESS TESTS                               ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    // Test 1: small board, few writers
    let stats = stress_test_patches(20, 4, 500).await;
    stats.print();

    // Test 2: wider board, more writers
    let stats = stress_test_patches(100, 8, 2000).await;
    stats.print();

    // Test 3: scaling analysis
    println!("\n\n╔════════════════════════════════════════════════════════════╗");
    println!("║          SCALING ANALYSIS (writers)                        ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    stress_test_scaling(8, 2).await;

    println!("\n✓ Demo completed successfully!");
}
