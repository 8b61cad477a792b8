// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use moneyflow::defaults;
use moneyflow::models::{
    Budget, BudgetPatch, Category, CategoryPatch, CollectionKind, Transaction, TransactionPatch,
    TransactionStatus, TransactionType,
};
use moneyflow::storage::{MemoryStorage, Storage};
use moneyflow::{LocalProvider, Store, StoreError, StoreOptions};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

type MemStore = Store<LocalProvider<MemoryStorage>>;

fn open(storage: MemoryStorage) -> MemStore {
    Store::open(LocalProvider::new(storage)).unwrap()
}

fn reopen(store: &MemStore) -> MemStore {
    open(store.provider().storage().clone())
}

fn expense(description: &str, amount: Decimal, category_id: i64) -> Transaction {
    Transaction {
        id: 0,
        description: description.into(),
        amount,
        r#type: TransactionType::Expense,
        category_id,
        date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
        notes: None,
        account_id: None,
        client_vendor_id: None,
        status: TransactionStatus::Completed,
        recurring: false,
    }
}

#[test]
fn empty_storage_loads_and_persists_sample_data() {
    let store = open(MemoryStorage::new());
    assert_eq!(store.collections(), &defaults::sample());
    assert_eq!(store.transactions().len(), 8);
    assert_eq!(store.categories().len(), 10);
    assert_eq!(store.provider().storage().len(), CollectionKind::ALL.len());
}

#[test]
fn corrupt_collection_falls_back_to_defaults() {
    let mut storage = MemoryStorage::new();
    storage.set("moneyflow_transactions", "{not json").unwrap();
    storage.set("moneyflow_budgets", "[]").unwrap();

    let store = open(storage);
    assert_eq!(store.transactions(), defaults::transactions().as_slice());
    assert!(store.budgets().is_empty());

    let raw = store
        .provider()
        .storage()
        .get("moneyflow_transactions")
        .unwrap()
        .unwrap();
    let repaired: Vec<Transaction> = serde_json::from_str(&raw).unwrap();
    assert_eq!(repaired.len(), 8);
}

#[test]
fn add_assigns_fresh_ids_and_persists() {
    let mut store = open(MemoryStorage::new());
    let a = store.add(expense("Lunch", dec!(12.50), 1)).unwrap();
    let b = store.add(expense("Taxi", dec!(18), 2)).unwrap();
    assert_eq!(a.id, 9);
    assert_eq!(b.id, 10);

    let reloaded = reopen(&store);
    assert_eq!(reloaded.transactions().len(), 10);
    assert_eq!(
        reloaded.get::<Transaction>(9).map(|t| t.description.as_str()),
        Some("Lunch")
    );
}

#[test]
fn add_rejects_invalid_records() {
    let mut store = open(MemoryStorage::new());
    let err = store.add(expense("  ", dec!(5), 1)).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store.add(expense("Refund?", dec!(-5), 1)).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store
        .add(Category {
            id: 0,
            name: "Pets".into(),
            r#type: TransactionType::Expense,
            color: "blue".into(),
            icon: None,
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.transactions().len(), 8);
    assert_eq!(store.categories().len(), 10);
}

#[test]
fn update_merges_patch_and_is_idempotent() {
    let mut store = open(MemoryStorage::new());
    let patch = || TransactionPatch {
        amount: Some(dec!(90)),
        status: Some(TransactionStatus::Pending),
        notes: Some(None),
        ..TransactionPatch::default()
    };
    assert!(store.update::<Transaction>(1, patch()).unwrap());
    let once = store.collections().clone();
    assert!(store.update::<Transaction>(1, patch()).unwrap());
    assert_eq!(store.collections(), &once);

    let t = store.get::<Transaction>(1).unwrap();
    assert_eq!(t.amount, dec!(90));
    assert_eq!(t.status, TransactionStatus::Pending);
    assert_eq!(t.notes, None);
    assert_eq!(t.description, "Grocery Store");

    assert_eq!(reopen(&store).collections(), &once);
}

#[test]
fn update_of_missing_id_changes_nothing() {
    let mut store = open(MemoryStorage::new());
    let before = store.collections().clone();
    let found = store
        .update::<Category>(
            404,
            CategoryPatch {
                name: Some("Ghost".into()),
                ..CategoryPatch::default()
            },
        )
        .unwrap();
    assert!(!found);
    assert_eq!(store.collections(), &before);
}

#[test]
fn remove_is_total() {
    let mut store = open(MemoryStorage::new());
    assert!(store.remove::<Transaction>(3).unwrap());
    assert!(store.get::<Transaction>(3).is_none());
    assert!(!store.remove::<Transaction>(3).unwrap());
    assert!(!store.remove::<Budget>(77).unwrap());
    assert_eq!(reopen(&store).transactions().len(), 7);
}

#[test]
fn export_document_carries_metadata() {
    let store = open(MemoryStorage::new());
    let now = Utc.with_ymd_and_hms(2025, 9, 30, 12, 0, 0).unwrap();
    let text = store.export_at(now).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(doc["appVersion"], json!("1.0.0"));
    assert_eq!(doc["exportDate"], json!("2025-09-30T12:00:00Z"));
    assert_eq!(doc["transactions"].as_array().unwrap().len(), 8);
    assert_eq!(doc["transactions"][0]["amount"], json!(85.5));
    assert_eq!(doc["transactions"][0]["categoryId"], json!(1));
    assert_eq!(doc["budgets"][0]["monthlyBudget"], json!(300.0));
}

#[test]
fn export_then_import_restores_everything() {
    let mut source = open(MemoryStorage::new());
    source.add(expense("Bookshop", dec!(31.99), 7)).unwrap();
    source.remove::<Budget>(5).unwrap();
    let text = source.export_all().unwrap();

    let mut target = open(MemoryStorage::new());
    target.clear_all().unwrap();
    let summary = target.import_all(&text).unwrap();
    assert_eq!(summary.collections, CollectionKind::ALL.to_vec());
    assert_eq!(target.collections(), source.collections());
    assert_eq!(reopen(&target).collections(), source.collections());
}

#[test]
fn malformed_import_leaves_state_untouched() {
    let mut store = open(MemoryStorage::new());
    let before = store.collections().clone();
    let raw_before = store.provider().storage().clone();

    for bad in ["{not valid", "[]", r#"{"budgets": [{"categoryId": "x"}], "transactions": []}"#] {
        let err = store.import_all(bad).unwrap_err();
        assert!(matches!(err, StoreError::InvalidImport(_)), "{}", bad);
    }
    assert_eq!(store.collections(), &before);
    assert_eq!(
        store.provider().storage().get("moneyflow_transactions").unwrap(),
        raw_before.get("moneyflow_transactions").unwrap()
    );
}

#[test]
fn import_with_duplicate_ids_is_rejected() {
    let mut store = open(MemoryStorage::new());
    let doc = json!({
        "budgets": [
            {"id": 1, "categoryId": 1, "monthlyBudget": 100},
            {"id": 1, "categoryId": 2, "monthlyBudget": 200}
        ]
    });
    let err = store.import_all(&doc.to_string()).unwrap_err();
    assert!(matches!(err, StoreError::InvalidImport(_)));
    assert_eq!(store.budgets().len(), 5);
}

#[test]
fn partial_import_replaces_only_included_collections() {
    let mut store = open(MemoryStorage::new());
    let doc = json!({
        "budgets": [{"id": 1, "categoryId": 3, "monthlyBudget": 75.5}],
        "exportDate": "2025-09-30T12:00:00Z"
    });
    let summary = store.import_all(&doc.to_string()).unwrap();
    assert_eq!(summary.collections, vec![CollectionKind::Budgets]);
    assert_eq!(summary.to_string(), "Data imported successfully: budgets");

    assert_eq!(store.budgets().len(), 1);
    assert_eq!(store.budgets()[0].monthly_budget, dec!(75.5));
    assert_eq!(store.transactions(), defaults::transactions().as_slice());

    let reloaded = reopen(&store);
    assert_eq!(reloaded.budgets(), store.budgets());

    let nothing = store.import_all("{}").unwrap();
    assert_eq!(nothing.to_string(), "Nothing to import");
}

#[test]
fn default_options_allow_duplicate_budgets_and_dangling_refs() {
    let mut store = open(MemoryStorage::new());
    store
        .add(Budget {
            id: 0,
            category_id: 1,
            monthly_budget: dec!(50),
        })
        .unwrap();
    store.add(expense("Mystery", dec!(1), 999)).unwrap();
    assert_eq!(store.budgets().len(), 6);

    let issues = store.integrity_report();
    assert_eq!(issues.len(), 2, "{:?}", issues);
    assert!(issues.iter().any(|i| i.contains("unknown category 999")));
    assert!(issues.iter().any(|i| i == "category 1 has 2 budgets"));
}

#[test]
fn strict_options_enforce_constraints() {
    let mut store =
        Store::open_with(LocalProvider::new(MemoryStorage::new()), StoreOptions::strict()).unwrap();

    let err = store
        .add(Budget {
            id: 0,
            category_id: 1,
            monthly_budget: dec!(50),
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::Integrity(_)));

    let err = store.add(expense("Mystery", dec!(1), 999)).unwrap_err();
    assert!(matches!(err, StoreError::Integrity(_)));

    // Salary is an income category.
    let err = store.add(expense("Wrong side", dec!(1), 8)).unwrap_err();
    assert!(matches!(err, StoreError::Integrity(_)));

    let err = store
        .update::<Budget>(
            2,
            BudgetPatch {
                category_id: Some(1),
                ..BudgetPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::Integrity(_)));

    assert!(
        store
            .update::<Budget>(
                1,
                BudgetPatch {
                    monthly_budget: Some(dec!(320)),
                    ..BudgetPatch::default()
                },
            )
            .unwrap()
    );
    assert!(store.integrity_report().is_empty());
}

#[test]
fn clear_all_keeps_reference_data() {
    let mut store = open(MemoryStorage::new());
    store.clear_all().unwrap();
    assert!(store.transactions().is_empty());
    assert!(store.budgets().is_empty());
    assert!(store.clients().is_empty());
    assert!(store.vendors().is_empty());
    assert_eq!(store.categories().len(), 10);
    assert_eq!(store.accounts().len(), 4);

    let reloaded = reopen(&store);
    assert!(reloaded.transactions().is_empty());
    assert_eq!(reloaded.collections(), store.collections());
}
