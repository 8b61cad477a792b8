// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{budget_utilization, category_label, spending_by_category};
use crate::commands::{arg, required_arg};
use crate::models::{Budget, BudgetPatch};
use crate::prefs::Preferences;
use crate::provider::DataProvider;
use crate::store::Store;
use crate::utils::{id_for_category, maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use clap::ArgMatches;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<P: DataProvider>(
    store: &mut Store<P>,
    prefs: &Preferences,
    m: &ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, prefs, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("status", sub)) => status(store, prefs, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<P: DataProvider>(store: &mut Store<P>, sub: &ArgMatches) -> Result<()> {
    let category = required_arg(sub, "category")?;
    let category_id = id_for_category(store.categories(), category)?;
    let amount = parse_decimal(required_arg(sub, "amount")?)?;
    match store.budget_for(category_id).map(|b| b.id) {
        Some(id) => {
            store.update::<Budget>(
                id,
                BudgetPatch {
                    monthly_budget: Some(amount),
                    ..BudgetPatch::default()
                },
            )?;
        }
        None => {
            store.add(Budget {
                id: 0,
                category_id,
                monthly_budget: amount,
            })?;
        }
    }
    println!("Budget set for {} = {}", category, amount);
    Ok(())
}

fn rm<P: DataProvider>(store: &mut Store<P>, sub: &ArgMatches) -> Result<()> {
    let category = required_arg(sub, "category")?;
    let category_id = id_for_category(store.categories(), category)?;
    let ids: Vec<i64> = store
        .budgets()
        .iter()
        .filter(|b| b.category_id == category_id)
        .map(|b| b.id)
        .collect();
    if ids.is_empty() {
        println!("No budget for {}", category);
        return Ok(());
    }
    for id in ids {
        store.remove::<Budget>(id)?;
    }
    println!("Removed budget for {}", category);
    Ok(())
}

fn list<P: DataProvider>(store: &Store<P>, prefs: &Preferences, sub: &ArgMatches) -> Result<()> {
    let budgets = store.budgets();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        let data = budgets
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    category_label(store.categories(), b.category_id).to_string(),
                    prefs.format_money(&b.monthly_budget),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Monthly budget"], data)
        );
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatusRow {
    pub category_id: i64,
    pub category: String,
    pub monthly_budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub over_budget: bool,
}

/// Utilization of every budget. Only completed transactions count unless
/// `include_all` is set; `month` narrows spending to one `YYYY-MM`.
pub fn status_rows<P: DataProvider>(
    store: &Store<P>,
    month: Option<&str>,
    include_all: bool,
) -> Vec<BudgetStatusRow> {
    let spending = spending_by_category(
        store
            .transactions()
            .iter()
            .filter(|t| include_all || t.is_completed())
            .filter(|t| month.is_none_or(|m| t.month() == m)),
    );
    store
        .budgets()
        .iter()
        .map(|b| {
            let u = budget_utilization(b, &spending);
            BudgetStatusRow {
                category_id: b.category_id,
                category: category_label(store.categories(), b.category_id).to_string(),
                monthly_budget: b.monthly_budget,
                spent: u.spent,
                remaining: u.remaining,
                percentage: u.percentage.round_dp(1),
                over_budget: u.over_budget,
            }
        })
        .collect()
}

fn status<P: DataProvider>(store: &Store<P>, prefs: &Preferences, sub: &ArgMatches) -> Result<()> {
    let month = arg(sub, "month").map(parse_month).transpose()?;
    let data = status_rows(store, month.as_deref(), sub.get_flag("all"));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    prefs.format_money(&r.monthly_budget),
                    prefs.format_money(&r.spent),
                    prefs.format_money(&r.remaining),
                    format!("{}%", r.percentage),
                    if r.over_budget { "OVER".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Budget", "Spent", "Remaining", "Used", ""],
                rows
            )
        );
    }
    Ok(())
}
