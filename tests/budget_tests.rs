// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyflow::commands::budgets;
use moneyflow::models::{Budget, Transaction, TransactionStatus, TransactionType};
use moneyflow::prefs::Preferences;
use moneyflow::storage::MemoryStorage;
use moneyflow::{LocalProvider, Store, cli};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

type MemStore = Store<LocalProvider<MemoryStorage>>;

fn setup() -> MemStore {
    Store::open(LocalProvider::new(MemoryStorage::new())).unwrap()
}

fn run(store: &mut MemStore, args: &[&str]) -> anyhow::Result<()> {
    let argv = ["moneyflow", "budget"].iter().chain(args).copied();
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("budget", budget_m)) = matches.subcommand() {
        budgets::handle(store, &Preferences::default(), budget_m)
    } else {
        panic!("no budget subcommand");
    }
}

fn spend(store: &mut MemStore, category_id: i64, amount: Decimal, status: TransactionStatus) {
    store
        .add(Transaction {
            id: 0,
            description: "Spend".into(),
            amount,
            r#type: TransactionType::Expense,
            category_id,
            date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
            notes: None,
            account_id: None,
            client_vendor_id: None,
            status,
            recurring: false,
        })
        .unwrap();
}

#[test]
fn status_of_sample_budgets() {
    let store = setup();
    let rows = budgets::status_rows(&store, None, false);
    assert_eq!(rows.len(), 5);

    let food = &rows[0];
    assert_eq!(food.category, "Food & Dining");
    assert_eq!(food.spent, dec!(98.25));
    assert_eq!(food.remaining, dec!(201.75));
    assert!(!food.over_budget);

    let entertainment = &rows[3];
    assert_eq!(entertainment.spent, dec!(15.99));
    assert_eq!(entertainment.percentage, dec!(16.0));

    let shopping = &rows[2];
    assert_eq!(shopping.spent, Decimal::ZERO);
    assert_eq!(shopping.percentage, Decimal::ZERO);
}

#[test]
fn set_updates_existing_budget_and_flags_overspend() {
    let mut store = setup();
    run(&mut store, &["set", "--category", "bills & utilities", "--amount", "500"]).unwrap();
    assert_eq!(store.budgets().len(), 5);
    assert_eq!(store.get::<Budget>(5).unwrap().monthly_budget, dec!(500));

    spend(&mut store, 5, dec!(620), TransactionStatus::Completed);
    let rows = budgets::status_rows(&store, None, false);
    let bills = rows.iter().find(|r| r.category_id == 5).unwrap();
    assert_eq!(bills.spent, dec!(620));
    assert_eq!(bills.remaining, dec!(-120));
    assert_eq!(bills.percentage, dec!(124));
    assert!(bills.over_budget);
}

#[test]
fn pending_spend_counts_only_with_all() {
    let mut store = setup();
    spend(&mut store, 3, dec!(40), TransactionStatus::Pending);

    let completed = budgets::status_rows(&store, None, false);
    assert_eq!(completed[2].spent, Decimal::ZERO);

    let all = budgets::status_rows(&store, None, true);
    assert_eq!(all[2].spent, dec!(40));
}

#[test]
fn month_filter_narrows_spending() {
    let store = setup();
    let rows = budgets::status_rows(&store, Some("2025-08"), false);
    assert!(rows.iter().all(|r| r.spent.is_zero()));
    assert!(rows.iter().all(|r| r.remaining == r.monthly_budget));

    let rows = budgets::status_rows(&store, Some("2025-09"), false);
    assert_eq!(rows[0].spent, dec!(98.25));
}

#[test]
fn set_creates_and_rm_removes_every_budget_for_category() {
    let mut store = setup();
    run(&mut store, &["set", "--category", "Healthcare", "--amount", "60"]).unwrap();
    assert_eq!(store.budget_for(6).map(|b| b.id), Some(6));

    store
        .add(Budget {
            id: 0,
            category_id: 6,
            monthly_budget: dec!(10),
        })
        .unwrap();
    assert_eq!(store.budgets().iter().filter(|b| b.category_id == 6).count(), 2);

    run(&mut store, &["rm", "--category", "6"]).unwrap();
    assert!(store.budget_for(6).is_none());
    assert_eq!(store.budgets().len(), 5);

    assert!(run(&mut store, &["set", "--category", "Nope", "--amount", "1"]).is_err());
    assert!(run(&mut store, &["set", "--category", "Healthcare", "--amount=-5"]).is_err());
}
