// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod contacts;
pub mod doctor;
pub mod exporter;
pub mod importer;
pub mod prefs;
pub mod reports;
pub mod transactions;

pub(crate) fn arg<'a>(m: &'a ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name).map(|s| s.trim())
}

pub(crate) fn required_arg<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    arg(m, name).with_context(|| format!("--{} is required", name))
}

pub(crate) fn record_id(m: &ArgMatches) -> Result<i64> {
    m.get_one::<i64>("id").copied().context("record id is required")
}

/// Empty strings clear an optional field; anything else sets it.
pub(crate) fn optional_text(m: &ArgMatches, name: &str) -> Option<Option<String>> {
    arg(m, name).map(|s| (!s.is_empty()).then(|| s.to_string()))
}
