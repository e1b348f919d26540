//! Sort Indicator Example
//!
//! Drives the sort side-store the way table headers do: each click
//! toggles one column, exactly one column per table holds the active
//! sort, and a displaced column's indicator falls back to "none" on its
//! own. A column watch prints every indicator change it actually hears.
//!
//! Run with: cargo run --example sort_indicators

use ors_store::{SortDir, SortStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Balance,
    Updated,
}

fn indicator(dir: SortDir) -> &'static str {
    match dir {
        SortDir::None => "  ",
        SortDir::Asc => "▲ ",
        SortDir::Desc => "▼ ",
    }
}

fn print_header(store: &SortStore<&'static str, Column>, table: &'static str) {
    println!(
        "  [{table}]  {}Name | {}Balance | {}Updated",
        indicator(store.column_dir(&table, Column::Name)),
        indicator(store.column_dir(&table, Column::Balance)),
        indicator(store.column_dir(&table, Column::Updated)),
    );
}

fn main() {
    println!("=== Sort Indicator Demo ===\n");

    let mut store: SortStore<&'static str, Column> = SortStore::new();

    // Watch one column the way its header cell would.
    let (watch, current) = store.subscribe_column("accounts", Column::Name, |dir| {
        println!("    (name header heard: {dir})");
    });
    println!("Name column starts at \"{current}\".\n");

    println!("Click \"Name\" on the accounts table:");
    store.toggle("accounts", Column::Name);
    print_header(&store, "accounts");

    println!("\nClick \"Name\" again:");
    store.toggle("accounts", Column::Name);
    print_header(&store, "accounts");

    println!("\nClick \"Balance\" (the Name indicator clears itself):");
    store.toggle("accounts", Column::Balance);
    print_header(&store, "accounts");

    // Tables are independent: sorting invoices moves nothing on accounts,
    // and the accounts watch stays silent.
    println!("\nClick \"Updated\" on the invoices table:");
    store.set("invoices", Column::Updated, SortDir::Desc);
    print_header(&store, "accounts");
    print_header(&store, "invoices");

    match store.active(&"invoices") {
        Some((column, dir)) => println!("\nInvoices sort by {column:?}, {dir}."),
        None => println!("\nInvoices are unsorted."),
    }

    // A detached header hears nothing further.
    store.unsubscribe(watch);
    println!("\nUnsubscribed the name header; clicking \"Name\" is silent now:");
    store.toggle("accounts", Column::Name);
    print_header(&store, "accounts");

    println!("\n{} watches left registered.", store.watcher_count());

    println!("\n=== Demo Complete ===");
}
