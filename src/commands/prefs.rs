// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::arg;
use crate::prefs::{CURRENCIES, Preferences};
use crate::storage::Storage;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use clap::ArgMatches;

pub fn handle<S: Storage>(storage: &mut S, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let prefs = Preferences::load(&*storage);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &prefs)? {
                let data = vec![
                    vec!["Theme".into(), prefs.theme.label().to_string()],
                    vec!["Currency".into(), currency_name(&prefs.currency)],
                    vec!["Dark mode".into(), prefs.dark_mode.to_string()],
                ];
                println!("{}", pretty_table(&["Preference", "Value"], data));
            }
        }
        Some(("set", sub)) => {
            let prefs = apply(Preferences::load(&*storage), sub)?;
            prefs.save(storage)?;
            println!(
                "Preferences saved: theme={}, currency={}, dark={}",
                prefs.theme, prefs.currency, prefs.dark_mode
            );
        }
        _ => {}
    }
    Ok(())
}

/// Preferences with the given `set` flags applied.
pub fn apply(mut prefs: Preferences, sub: &ArgMatches) -> Result<Preferences> {
    if let Some(theme) = arg(sub, "theme") {
        prefs.theme = theme.parse()?;
    }
    if let Some(code) = arg(sub, "currency") {
        prefs.set_currency(code)?;
    }
    if let Some(dark) = sub.get_one::<bool>("dark") {
        prefs.dark_mode = *dark;
    }
    Ok(prefs)
}

fn currency_name(code: &str) -> String {
    CURRENCIES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(c, symbol, name)| format!("{} ({} {})", c, symbol, name))
        .unwrap_or_else(|| code.to_string())
}
