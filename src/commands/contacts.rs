// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Clients and vendors share one shape on the command line.

use crate::commands::{arg, optional_text, record_id, required_arg};
use crate::models::{Client, ClientPatch, Vendor, VendorPatch};
use crate::prefs::Preferences;
use crate::provider::DataProvider;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use clap::ArgMatches;
use rust_decimal::Decimal;

fn text(sub: &ArgMatches, name: &str) -> String {
    arg(sub, name).unwrap_or_default().to_string()
}

fn removed(kind: &str, id: i64, found: bool) {
    if found {
        println!("Removed {} {}", kind, id);
    } else {
        println!("No {} with id {}", kind, id);
    }
}

fn updated(kind: &str, id: i64, found: bool) {
    if found {
        println!("Updated {} {}", kind, id);
    } else {
        println!("No {} with id {}", kind, id);
    }
}

pub fn handle_clients<P: DataProvider>(
    store: &mut Store<P>,
    prefs: &Preferences,
    m: &ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let created = store.add(Client {
                id: 0,
                name: required_arg(sub, "name")?.to_string(),
                email: text(sub, "email"),
                phone: text(sub, "phone"),
                address: text(sub, "address"),
                payment_terms: optional_text(sub, "terms").flatten(),
                total_paid: arg(sub, "total-paid")
                    .map(parse_decimal)
                    .transpose()?
                    .unwrap_or(Decimal::ZERO),
                status: arg(sub, "status").unwrap_or("active").parse()?,
            })?;
            println!("Added client '{}' (id {})", created.name, created.id);
        }
        Some(("list", sub)) => {
            let clients = store.clients();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &clients)? {
                let data = clients
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.email.clone(),
                            c.phone.clone(),
                            c.payment_terms.clone().unwrap_or_default(),
                            prefs.format_money(&c.total_paid),
                            c.status.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Name", "Email", "Phone", "Terms", "Total paid", "Status"],
                        data
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let id = record_id(sub)?;
            let patch = ClientPatch {
                name: arg(sub, "name").map(str::to_string),
                email: arg(sub, "email").map(str::to_string),
                phone: arg(sub, "phone").map(str::to_string),
                address: arg(sub, "address").map(str::to_string),
                payment_terms: optional_text(sub, "terms"),
                total_paid: arg(sub, "total-paid").map(parse_decimal).transpose()?,
                status: arg(sub, "status").map(str::parse).transpose()?,
            };
            let found = store.update::<Client>(id, patch)?;
            updated("client", id, found);
        }
        Some(("rm", sub)) => {
            let id = record_id(sub)?;
            let found = store.remove::<Client>(id)?;
            removed("client", id, found);
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_vendors<P: DataProvider>(
    store: &mut Store<P>,
    prefs: &Preferences,
    m: &ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let created = store.add(Vendor {
                id: 0,
                name: required_arg(sub, "name")?.to_string(),
                email: text(sub, "email"),
                phone: text(sub, "phone"),
                address: text(sub, "address"),
                category: text(sub, "category"),
                total_spent: arg(sub, "total-spent")
                    .map(parse_decimal)
                    .transpose()?
                    .unwrap_or(Decimal::ZERO),
                status: arg(sub, "status").unwrap_or("active").parse()?,
            })?;
            println!("Added vendor '{}' (id {})", created.name, created.id);
        }
        Some(("list", sub)) => {
            let vendors = store.vendors();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &vendors)? {
                let data = vendors
                    .iter()
                    .map(|v| {
                        vec![
                            v.id.to_string(),
                            v.name.clone(),
                            v.email.clone(),
                            v.phone.clone(),
                            v.category.clone(),
                            prefs.format_money(&v.total_spent),
                            v.status.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Name", "Email", "Phone", "Category", "Total spent", "Status"],
                        data
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let id = record_id(sub)?;
            let patch = VendorPatch {
                name: arg(sub, "name").map(str::to_string),
                email: arg(sub, "email").map(str::to_string),
                phone: arg(sub, "phone").map(str::to_string),
                address: arg(sub, "address").map(str::to_string),
                category: arg(sub, "category").map(str::to_string),
                total_spent: arg(sub, "total-spent").map(parse_decimal).transpose()?,
                status: arg(sub, "status").map(str::parse).transpose()?,
            };
            let found = store.update::<Vendor>(id, patch)?;
            updated("vendor", id, found);
        }
        Some(("rm", sub)) => {
            let id = record_id(sub)?;
            let found = store.remove::<Vendor>(id)?;
            removed("vendor", id, found);
        }
        _ => {}
    }
    Ok(())
}
