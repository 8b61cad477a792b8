// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::{Account, Category, Client, Vendor};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// `symbol` followed by the amount with two decimals and thousands separators,
/// e.g. `-$1,250.25`.
pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    let rounded = d.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}.{}", sign, symbol, grouped, frac_part)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Resolve a category given either its numeric id or its name.
pub fn id_for_category(categories: &[Category], key: &str) -> Result<i64> {
    let key = key.trim();
    categories
        .iter()
        .find(|c| c.id.to_string() == key || c.name.eq_ignore_ascii_case(key))
        .map(|c| c.id)
        .ok_or_else(|| anyhow!("Category '{}' not found", key))
}

pub fn id_for_account(accounts: &[Account], key: &str) -> Result<i64> {
    let key = key.trim();
    accounts
        .iter()
        .find(|a| a.id.to_string() == key || a.name.eq_ignore_ascii_case(key))
        .map(|a| a.id)
        .ok_or_else(|| anyhow!("Account '{}' not found", key))
}

pub fn id_for_client(clients: &[Client], key: &str) -> Result<i64> {
    let key = key.trim();
    clients
        .iter()
        .find(|c| c.id.to_string() == key || c.name.eq_ignore_ascii_case(key))
        .map(|c| c.id)
        .ok_or_else(|| anyhow!("Client '{}' not found", key))
}

pub fn id_for_vendor(vendors: &[Vendor], key: &str) -> Result<i64> {
    let key = key.trim();
    vendors
        .iter()
        .find(|v| v.id.to_string() == key || v.name.eq_ignore_ascii_case(key))
        .map(|v| v.id)
        .ok_or_else(|| anyhow!("Vendor '{}' not found", key))
}
