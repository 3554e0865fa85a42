//! Offline seed audit: validates the seed snapshot and prints a manifest.
//! Run with: cargo run --bin seed_audit

use intellistream::seed::{build_snapshot, validate_snapshot};
use serde_json::json;

fn main() {
    let snapshot = build_snapshot();
    if let Err(err) = validate_snapshot(&snapshot) {
        eprintln!("seed validation failed: {}", err);
        std::process::exit(1);
    }

    let scenario_count: usize = snapshot
        .scenario_books
        .values()
        .map(|b| b.scenarios.len())
        .sum();
    let control_count: usize = snapshot
        .scenario_books
        .values()
        .flat_map(|b| &b.scenarios)
        .map(|s| s.what_if_controls.len())
        .sum();

    let payload = json!({
        "domains": snapshot.domains.len(),
        "datasets": snapshot.dataset_count(),
        "detail_records": snapshot.details.len(),
        "scenario_books": snapshot.scenario_books.len(),
        "scenarios": scenario_count,
        "what_if_controls": control_count,
        "snapshot_hash": snapshot.content_hash(),
    });
    println!("{}", serde_json::to_string_pretty(&payload).unwrap());
}
