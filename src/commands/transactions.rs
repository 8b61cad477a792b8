// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{account_label, category_label, contact_label};
use crate::commands::{arg, optional_text, record_id, required_arg};
use crate::models::{Transaction, TransactionPatch, TransactionStatus, TransactionType};
use crate::prefs::Preferences;
use crate::provider::DataProvider;
use crate::store::Store;
use crate::utils::{
    id_for_account, id_for_category, id_for_client, id_for_vendor, maybe_print_json, parse_date,
    parse_decimal, parse_month, pretty_table,
};
use anyhow::Result;
use clap::ArgMatches;
use serde::Serialize;

pub fn handle<P: DataProvider>(
    store: &mut Store<P>,
    prefs: &Preferences,
    m: &ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, prefs, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = record_id(sub)?;
            if store.remove::<Transaction>(id)? {
                println!("Removed transaction {}", id);
            } else {
                println!("No transaction with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn contact_id<P: DataProvider>(store: &Store<P>, kind: TransactionType, key: &str) -> Result<i64> {
    match kind {
        TransactionType::Income => id_for_client(store.clients(), key),
        TransactionType::Expense => id_for_vendor(store.vendors(), key),
    }
}

fn add<P: DataProvider>(store: &mut Store<P>, sub: &ArgMatches) -> Result<()> {
    let date = parse_date(required_arg(sub, "date")?)?;
    let description = required_arg(sub, "description")?.to_string();
    let amount = parse_decimal(required_arg(sub, "amount")?)?;
    let kind: TransactionType = required_arg(sub, "type")?.parse()?;
    let category_id = id_for_category(store.categories(), required_arg(sub, "category")?)?;
    let account_id = arg(sub, "account")
        .map(|a| id_for_account(store.accounts(), a))
        .transpose()?;
    let client_vendor_id = arg(sub, "contact")
        .map(|c| contact_id(store, kind, c))
        .transpose()?;
    let status: TransactionStatus = arg(sub, "status").unwrap_or("completed").parse()?;

    let created = store.add(Transaction {
        id: 0,
        description,
        amount,
        r#type: kind,
        category_id,
        date,
        notes: optional_text(sub, "notes").flatten(),
        account_id,
        client_vendor_id,
        status,
        recurring: sub.get_flag("recurring"),
    })?;
    println!(
        "Recorded {} of {} on {} '{}' (id {})",
        created.r#type, created.amount, created.date, created.description, created.id
    );
    Ok(())
}

fn edit<P: DataProvider>(store: &mut Store<P>, sub: &ArgMatches) -> Result<()> {
    let id = record_id(sub)?;
    let mut patch = TransactionPatch {
        description: arg(sub, "description").map(str::to_string),
        notes: optional_text(sub, "notes"),
        recurring: sub.get_one::<bool>("recurring").copied(),
        ..TransactionPatch::default()
    };
    if let Some(d) = arg(sub, "date") {
        patch.date = Some(parse_date(d)?);
    }
    if let Some(a) = arg(sub, "amount") {
        patch.amount = Some(parse_decimal(a)?);
    }
    if let Some(t) = arg(sub, "type") {
        patch.r#type = Some(t.parse()?);
    }
    if let Some(s) = arg(sub, "status") {
        patch.status = Some(s.parse()?);
    }
    if let Some(c) = arg(sub, "category") {
        patch.category_id = Some(id_for_category(store.categories(), c)?);
    }
    if let Some(a) = arg(sub, "account") {
        patch.account_id = Some(if a.is_empty() {
            None
        } else {
            Some(id_for_account(store.accounts(), a)?)
        });
    }
    if let Some(c) = arg(sub, "contact") {
        let kind = patch
            .r#type
            .or_else(|| store.get::<Transaction>(id).map(|t| t.r#type))
            .unwrap_or(TransactionType::Expense);
        patch.client_vendor_id = Some(if c.is_empty() {
            None
        } else {
            Some(contact_id(store, kind, c)?)
        });
    }

    if store.update::<Transaction>(id, patch)? {
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub account: String,
    pub contact: String,
    pub status: String,
    pub notes: String,
}

/// Transactions matching the list filters, newest first.
pub fn query_rows<P: DataProvider>(store: &Store<P>, sub: &ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = arg(sub, "month").map(parse_month).transpose()?;
    let kind: Option<TransactionType> = arg(sub, "type").map(str::parse).transpose()?;
    let status: Option<TransactionStatus> = arg(sub, "status").map(str::parse).transpose()?;
    let category = arg(sub, "category")
        .map(|c| id_for_category(store.categories(), c))
        .transpose()?;

    let mut selected: Vec<&Transaction> = store
        .transactions()
        .iter()
        .filter(|t| month.as_ref().is_none_or(|m| t.month() == *m))
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .filter(|t| status.is_none_or(|s| t.status == s))
        .filter(|t| category.is_none_or(|c| t.category_id == c))
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        selected.truncate(*limit);
    }

    Ok(selected
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description.clone(),
            r#type: t.r#type.to_string(),
            amount: format!("{:.2}", t.amount),
            category: category_label(store.categories(), t.category_id).to_string(),
            account: account_label(store.accounts(), t.account_id).to_string(),
            contact: contact_label(store.clients(), store.vendors(), t).to_string(),
            status: t.status.to_string(),
            notes: t.notes.clone().unwrap_or_default(),
        })
        .collect())
}

fn list<P: DataProvider>(store: &Store<P>, prefs: &Preferences, sub: &ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let amount = r
                    .amount
                    .parse()
                    .map(|a| prefs.format_money(&a))
                    .unwrap_or_else(|_| r.amount.clone());
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.r#type.clone(),
                    amount,
                    r.category.clone(),
                    r.account.clone(),
                    r.status.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Date", "Description", "Type", "Amount", "Category", "Account",
                    "Status", "Notes"
                ],
                rows,
            )
        );
    }
    Ok(())
}
