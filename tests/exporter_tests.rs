// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyflow::commands::exporter;
use moneyflow::models::Transaction;
use moneyflow::storage::MemoryStorage;
use moneyflow::{LocalProvider, Store, cli};
use serde_json::json;
use tempfile::tempdir;

type MemStore = Store<LocalProvider<MemoryStorage>>;

fn setup() -> MemStore {
    Store::open(LocalProvider::new(MemoryStorage::new())).unwrap()
}

fn export(store: &MemStore, format: &str, out: &str) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["moneyflow", "export", format, "--out", out]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(store, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_json_writes_full_document() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&store, "json", &out_str);

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["appVersion"], json!("1.0.0"));
    assert!(parsed["exportDate"].is_string());
    for key in ["transactions", "categories", "accounts", "clients", "vendors", "budgets"] {
        assert!(parsed[key].is_array(), "missing {}", key);
    }
    assert_eq!(
        parsed["vendors"][0],
        json!({
            "id": 1,
            "name": "Office Supply Co",
            "email": "orders@officesupply.com",
            "phone": "+1-555-1111",
            "address": "100 Supply St, NY",
            "category": "Office Supplies",
            "totalSpent": 2450.75,
            "status": "active"
        })
    );
}

#[test]
fn export_json_writes_amounts_as_numbers() {
    let store = setup();
    let doc: serde_json::Value = serde_json::from_str(&store.export_all().unwrap()).unwrap();

    let fields = [
        ("transactions", "amount"),
        ("accounts", "balance"),
        ("clients", "totalPaid"),
        ("vendors", "totalSpent"),
        ("budgets", "monthlyBudget"),
    ];
    for (collection, field) in fields {
        for record in doc[collection].as_array().unwrap() {
            assert!(record[field].is_number(), "{}.{} = {}", collection, field, record[field]);
        }
    }
    assert_eq!(doc["transactions"][0]["amount"].as_f64(), Some(85.5));
    assert_eq!(doc["accounts"][2]["balance"].as_f64(), Some(-1250.25));
}

#[test]
fn export_csv_resolves_names() {
    let mut store = setup();
    store
        .update::<Transaction>(
            2,
            moneyflow::models::TransactionPatch {
                account_id: Some(Some(1)),
                client_vendor_id: Some(Some(3)),
                ..Default::default()
            },
        )
        .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("transactions.csv");
    let out_str = out_path.to_string_lossy().to_string();
    export(&store, "csv", &out_str);

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(
        lines[0],
        "date,type,amount,category,account,client/vendor,status,notes"
    );
    assert_eq!(
        lines[1],
        "2025-09-15,expense,85.50,Food & Dining,Unknown,,completed,Weekly groceries"
    );
    assert_eq!(
        lines[2],
        "2025-09-14,income,3000.00,Salary,Checking Account,Tech Solutions Ltd,completed,Monthly salary"
    );
}

#[test]
fn export_csv_to_writer() {
    let mut store = setup();
    store.clear_all().unwrap();
    let mut buf = Vec::new();
    exporter::write_csv(&store, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "date,type,amount,category,account,client/vendor,status,notes\n"
    );
}

#[test]
fn export_rejects_unknown_format() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let result = cli::build_cli().try_get_matches_from([
        "moneyflow",
        "export",
        "xml",
        "--out",
        &out_str,
    ]);
    assert!(result.is_err());
    assert!(!out_path.exists());
}
