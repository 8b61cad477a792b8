// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::total_balance;
use crate::commands::{arg, optional_text, record_id, required_arg};
use crate::models::{Account, AccountPatch};
use crate::prefs::Preferences;
use crate::provider::DataProvider;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use clap::ArgMatches;

pub fn handle<P: DataProvider>(
    store: &mut Store<P>,
    prefs: &Preferences,
    m: &ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let created = store.add(Account {
                id: 0,
                name: required_arg(sub, "name")?.to_string(),
                r#type: required_arg(sub, "type")?.parse()?,
                balance: parse_decimal(arg(sub, "balance").unwrap_or("0"))?,
                institution: optional_text(sub, "institution").flatten(),
                low_balance_threshold: arg(sub, "threshold").map(parse_decimal).transpose()?,
            })?;
            println!(
                "Added account '{}' ({}, id {})",
                created.name, created.r#type, created.id
            );
        }
        Some(("list", sub)) => {
            let accounts = store.accounts();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
                let mut data: Vec<Vec<String>> = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.r#type.to_string(),
                            a.institution.clone().unwrap_or_default(),
                            prefs.format_money(&a.balance),
                            if a.is_low_balance() { "low".into() } else { String::new() },
                        ]
                    })
                    .collect();
                data.push(vec![
                    String::new(),
                    "Total".into(),
                    String::new(),
                    String::new(),
                    prefs.format_money(&total_balance(accounts)),
                    String::new(),
                ]);
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Name", "Type", "Institution", "Balance", "Alert"],
                        data
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let id = record_id(sub)?;
            let patch = AccountPatch {
                name: arg(sub, "name").map(str::to_string),
                r#type: arg(sub, "type").map(str::parse).transpose()?,
                balance: arg(sub, "balance").map(parse_decimal).transpose()?,
                institution: optional_text(sub, "institution"),
                low_balance_threshold: match arg(sub, "threshold") {
                    Some("") => Some(None),
                    Some(t) => Some(Some(parse_decimal(t)?)),
                    None => None,
                },
            };
            if store.update::<Account>(id, patch)? {
                println!("Updated account {}", id);
            } else {
                println!("No account with id {}", id);
            }
        }
        Some(("rm", sub)) => {
            let id = record_id(sub)?;
            if store.remove::<Account>(id)? {
                println!("Removed account {}", id);
            } else {
                println!("No account with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}
