// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required_arg;
use crate::provider::DataProvider;
use crate::store::Store;
use anyhow::{Context, Result};
use clap::ArgMatches;

pub fn handle<P: DataProvider>(store: &mut Store<P>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => {
            let path = required_arg(sub, "path")?;
            let text = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
            let summary = store
                .import_all(&text)
                .with_context(|| format!("Import {}", path))?;
            println!("{}", summary);
        }
        _ => {}
    }
    Ok(())
}
