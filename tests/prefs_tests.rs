// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyflow::commands::{doctor, prefs};
use moneyflow::models::{Budget, Theme};
use moneyflow::prefs::Preferences;
use moneyflow::storage::MemoryStorage;
use moneyflow::{LocalProvider, Store, cli};
use rust_decimal_macros::dec;

fn run_prefs(storage: &mut MemoryStorage, args: &[&str]) -> anyhow::Result<()> {
    let argv = ["moneyflow", "prefs"].iter().chain(args).copied();
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("prefs", prefs_m)) = matches.subcommand() {
        prefs::handle(storage, prefs_m)
    } else {
        panic!("no prefs subcommand");
    }
}

#[test]
fn prefs_set_persists_changes() {
    let mut storage = MemoryStorage::new();
    run_prefs(
        &mut storage,
        &["set", "--theme", "Purple", "--currency", "gbp", "--dark", "true"],
    )
    .unwrap();

    let loaded = Preferences::load(&storage);
    assert_eq!(loaded.theme, Theme::Purple);
    assert_eq!(loaded.currency, "GBP");
    assert!(loaded.dark_mode);
    assert_eq!(loaded.format_money(&dec!(1234567.5)), "£1,234,567.50");

    run_prefs(&mut storage, &["set", "--dark", "false"]).unwrap();
    let loaded = Preferences::load(&storage);
    assert_eq!(loaded.theme, Theme::Purple);
    assert!(!loaded.dark_mode);

    run_prefs(&mut storage, &["show", "--json"]).unwrap();
}

#[test]
fn prefs_set_rejects_unknown_values() {
    let mut storage = MemoryStorage::new();
    assert!(run_prefs(&mut storage, &["set", "--theme", "neon"]).is_err());
    assert!(run_prefs(&mut storage, &["set", "--currency", "DOGE"]).is_err());
    assert!(storage.is_empty());
}

#[test]
fn doctor_runs_on_clean_and_broken_data() {
    let mut store = Store::open(LocalProvider::new(MemoryStorage::new())).unwrap();
    doctor::handle(&store).unwrap();

    store
        .add(Budget {
            id: 0,
            category_id: 42,
            monthly_budget: dec!(5),
        })
        .unwrap();
    assert_eq!(
        store.integrity_report(),
        ["budget 6 references unknown category 42"]
    );
    doctor::handle(&store).unwrap();
}
