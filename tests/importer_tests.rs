// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyflow::commands::importer;
use moneyflow::storage::MemoryStorage;
use moneyflow::{LocalProvider, Store, cli};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

type MemStore = Store<LocalProvider<MemoryStorage>>;

fn setup() -> MemStore {
    Store::open(LocalProvider::new(MemoryStorage::new())).unwrap()
}

fn import(store: &mut MemStore, path: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["moneyflow", "import", "json", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(store, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn importer_trims_cli_path_argument() {
    let mut store = setup();
    let file = write_temp(
        &json!({
            "clients": [
                {"id": 4, "name": "Acme", "email": "a@acme.test", "totalPaid": 120}
            ]
        })
        .to_string(),
    );

    let path = file.path().to_str().unwrap().to_string();
    let padded = format!("  {}  ", path);
    import(&mut store, &padded).unwrap();

    assert_eq!(store.clients().len(), 1);
    assert_eq!(store.clients()[0].name, "Acme");
    assert_eq!(store.clients()[0].phone, "");
    assert_eq!(store.vendors().len(), 3);
}

#[test]
fn importer_round_trips_an_export() {
    let source = setup();
    let file = write_temp(&source.export_all().unwrap());

    let mut target = setup();
    target.clear_all().unwrap();
    import(&mut target, file.path().to_str().unwrap()).unwrap();
    assert_eq!(target.collections(), source.collections());
}

#[test]
fn importer_accepts_legacy_vendor_field() {
    let mut store = setup();
    let file = write_temp(
        &json!({
            "vendors": [
                {"id": 9, "name": "Print Shop", "defaultCategory": "Office", "totalSpent": 15.5}
            ]
        })
        .to_string(),
    );
    import(&mut store, file.path().to_str().unwrap()).unwrap();
    assert_eq!(store.vendors()[0].category, "Office");
}

#[test]
fn importer_rejects_invalid_json() {
    let mut store = setup();
    let before = store.collections().clone();
    let file = write_temp("{not valid");

    let err = import(&mut store, file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid import data"));
    assert_eq!(store.collections(), &before);
}

#[test]
fn importer_rejects_bad_record_and_keeps_other_collections() {
    let mut store = setup();
    let before = store.collections().clone();
    let file = write_temp(
        &json!({
            "categories": [],
            "transactions": [
                {"id": 1, "description": "x", "amount": 1, "type": "transfer", "categoryId": 1, "date": "2025-09-01"}
            ]
        })
        .to_string(),
    );

    assert!(import(&mut store, file.path().to_str().unwrap()).is_err());
    assert_eq!(store.collections(), &before);
}

#[test]
fn importer_reports_missing_file() {
    let mut store = setup();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = import(&mut store, missing.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().starts_with("Read "));
}
