// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{arg, optional_text, record_id, required_arg};
use crate::models::{Category, CategoryPatch};
use crate::provider::DataProvider;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use clap::ArgMatches;

pub fn handle<P: DataProvider>(store: &mut Store<P>, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let created = store.add(Category {
                id: 0,
                name: required_arg(sub, "name")?.to_string(),
                r#type: required_arg(sub, "type")?.parse()?,
                color: arg(sub, "color").unwrap_or("#3b82f6").to_string(),
                icon: optional_text(sub, "icon").flatten(),
            })?;
            println!("Added category '{}' (id {})", created.name, created.id);
        }
        Some(("list", sub)) => {
            let cats = store.categories();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.icon.clone().unwrap_or_default(),
                            c.name.clone(),
                            c.r#type.to_string(),
                            c.color.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Icon", "Category", "Type", "Color"], data)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = record_id(sub)?;
            let patch = CategoryPatch {
                name: arg(sub, "name").map(str::to_string),
                r#type: arg(sub, "type").map(str::parse).transpose()?,
                color: arg(sub, "color").map(str::to_string),
                icon: optional_text(sub, "icon"),
            };
            if store.update::<Category>(id, patch)? {
                println!("Updated category {}", id);
            } else {
                println!("No category with id {}", id);
            }
        }
        Some(("rm", sub)) => {
            let id = record_id(sub)?;
            if store.remove::<Category>(id)? {
                println!("Removed category {}", id);
            } else {
                println!("No category with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}
