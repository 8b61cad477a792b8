// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    TREND_DAYS, kpis, series_by_date, series_by_month, top_expense_categories, total_balance,
    trailing_dates,
};
use crate::models::Transaction;
use crate::prefs::Preferences;
use crate::provider::DataProvider;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use clap::ArgMatches;

pub fn handle<P: DataProvider>(store: &Store<P>, prefs: &Preferences, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, prefs, sub)?,
        Some(("categories", sub)) => categories(store, prefs, sub)?,
        Some(("daily", sub)) => daily(store, prefs, sub)?,
        Some(("monthly", sub)) => monthly(store, prefs, sub)?,
        _ => {}
    }
    Ok(())
}

fn in_scope<'a, P: DataProvider>(
    store: &'a Store<P>,
    sub: &ArgMatches,
) -> impl Iterator<Item = &'a Transaction> + use<'a, P> {
    let all = sub.get_flag("all");
    store
        .transactions()
        .iter()
        .filter(move |t| all || t.is_completed())
}

fn summary<P: DataProvider>(store: &Store<P>, prefs: &Preferences, sub: &ArgMatches) -> Result<()> {
    let k = kpis(store.transactions());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &k)? {
        let money = |d: &rust_decimal::Decimal| prefs.format_money(d);
        let data = vec![
            vec!["Income".into(), money(&k.total_income)],
            vec!["Expenses".into(), money(&k.total_expenses)],
            vec!["Balance".into(), money(&k.balance)],
            vec!["Net profit".into(), money(&k.net_profit)],
            vec!["Pending".into(), k.pending_transactions.to_string()],
            vec!["Overdue".into(), k.overdue_transactions.to_string()],
            vec!["Transactions".into(), k.transaction_count.to_string()],
            vec![
                "Account balances".into(),
                money(&total_balance(store.accounts())),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], data));
    }
    Ok(())
}

fn categories<P: DataProvider>(
    store: &Store<P>,
    prefs: &Preferences,
    sub: &ArgMatches,
) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(5);
    let data = top_expense_categories(store.categories(), in_scope(store, sub), limit);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| vec![c.name.clone(), prefs.format_money(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn daily<P: DataProvider>(store: &Store<P>, prefs: &Preferences, sub: &ArgMatches) -> Result<()> {
    let days = sub
        .get_one::<u16>("days")
        .map(|d| usize::from(*d))
        .unwrap_or(TREND_DAYS);
    let today = chrono::Utc::now().date_naive();
    let dates = trailing_dates(store.transactions(), today, days);
    let data = series_by_date(in_scope(store, sub), &dates);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.date.format("%b %d").to_string(),
                    prefs.format_money(&d.income),
                    prefs.format_money(&d.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Day", "Income", "Expenses"], rows));
    }
    Ok(())
}

fn monthly<P: DataProvider>(store: &Store<P>, prefs: &Preferences, sub: &ArgMatches) -> Result<()> {
    let data = series_by_month(in_scope(store, sub));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|(month, spent)| vec![month.clone(), prefs.format_money(spent)])
            .collect();
        println!("{}", pretty_table(&["Month", "Spending"], rows));
    }
    Ok(())
}
