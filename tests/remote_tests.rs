// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyflow::DataProvider;
use moneyflow::models::{Budget, Category, Transaction, TransactionStatus, TransactionType};
use moneyflow::remote::{IdMaps, RemoteProvider};
use rust_decimal_macros::dec;

fn tx(kind: TransactionType, contact: Option<i64>) -> Transaction {
    Transaction {
        id: 3,
        description: "Invoice".into(),
        amount: dec!(250),
        r#type: kind,
        category_id: 8,
        date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        notes: None,
        account_id: Some(2),
        client_vendor_id: contact,
        status: TransactionStatus::Completed,
        recurring: false,
    }
}

#[test]
fn base_url_is_trimmed() {
    let remote = RemoteProvider::new("  http://localhost:8001/ \n").unwrap();
    assert_eq!(
        remote.collection_url::<Transaction>(),
        "http://localhost:8001/api/transactions"
    );
    assert!(remote.reassigns_ids());
}

#[test]
fn records_are_addressed_by_remote_id() {
    let remote = RemoteProvider::new("http://host").unwrap();
    let budget = Budget {
        id: 1,
        category_id: 4,
        monthly_budget: dec!(100),
    };
    assert_eq!(remote.record_url(&budget), "http://host/api/budgets/4");

    let category = Category {
        id: 6,
        name: "Healthcare".into(),
        r#type: TransactionType::Expense,
        color: "#ef4444".into(),
        icon: None,
    };
    assert_eq!(remote.record_url(&category), "http://host/api/categories/6");
}

#[test]
fn id_maps_follow_renumbered_references() {
    let mut maps = IdMaps::default();
    maps.categories.insert(8, 1);
    maps.accounts.insert(2, 5);
    maps.clients.insert(4, 40);
    maps.vendors.insert(4, 70);

    let income = maps.transaction(&tx(TransactionType::Income, Some(4)));
    assert_eq!(income.id, 3);
    assert_eq!(income.category_id, 1);
    assert_eq!(income.account_id, Some(5));
    assert_eq!(income.client_vendor_id, Some(40));

    let expense = maps.transaction(&tx(TransactionType::Expense, Some(4)));
    assert_eq!(expense.client_vendor_id, Some(70));

    let budget = maps.budget(&Budget {
        id: 2,
        category_id: 8,
        monthly_budget: dec!(50),
    });
    assert_eq!(budget.category_id, 1);
    assert_eq!(budget.id, 2);
}

#[test]
fn id_maps_keep_ids_they_do_not_know() {
    let maps = IdMaps::default();
    let t = maps.transaction(&tx(TransactionType::Expense, None));
    assert_eq!(t, tx(TransactionType::Expense, None));
}
