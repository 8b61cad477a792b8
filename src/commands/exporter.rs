// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{account_label, category_label, contact_label};
use crate::commands::required_arg;
use crate::provider::DataProvider;
use crate::store::Store;
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io::Write;

pub const CSV_HEADER: [&str; 8] = [
    "date",
    "type",
    "amount",
    "category",
    "account",
    "client/vendor",
    "status",
    "notes",
];

pub fn handle<P: DataProvider>(store: &Store<P>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => {
            let out = required_arg(sub, "out")?;
            let doc = store.export_all()?;
            std::fs::write(out, doc).with_context(|| format!("Write {}", out))?;
            println!("Exported all data to {}", out);
        }
        Some(("csv", sub)) => {
            let out = required_arg(sub, "out")?;
            let file = std::fs::File::create(out).with_context(|| format!("Create {}", out))?;
            write_csv(store, file)?;
            println!("Exported transactions to {}", out);
        }
        _ => {}
    }
    Ok(())
}

/// One row per transaction, with names in place of ids.
pub fn write_csv<P: DataProvider, W: Write>(store: &Store<P>, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for t in store.transactions() {
        wtr.write_record([
            t.date.to_string(),
            t.r#type.to_string(),
            format!("{:.2}", t.amount),
            category_label(store.categories(), t.category_id).to_string(),
            account_label(store.accounts(), t.account_id).to_string(),
            contact_label(store.clients(), store.vendors(), t).to_string(),
            t.status.to_string(),
            t.notes.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
