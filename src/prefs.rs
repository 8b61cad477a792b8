// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display preferences kept next to the data in durable storage.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::models::Theme;
use crate::storage::Storage;
use crate::utils::fmt_money;

pub const THEME_KEY: &str = "moneyflow_theme";
pub const CURRENCY_KEY: &str = "moneyflow_currency";
pub const DARK_MODE_KEY: &str = "moneyflow_dark";

pub const DEFAULT_CURRENCY: &str = "USD";

/// (code, symbol, name)
pub const CURRENCIES: [(&str, &str, &str); 10] = [
    ("USD", "$", "US Dollar"),
    ("EUR", "€", "Euro"),
    ("GBP", "£", "British Pound"),
    ("JPY", "¥", "Japanese Yen"),
    ("INR", "₹", "Indian Rupee"),
    ("CAD", "C$", "Canadian Dollar"),
    ("AUD", "A$", "Australian Dollar"),
    ("CHF", "Fr", "Swiss Franc"),
    ("CNY", "¥", "Chinese Yuan"),
    ("SEK", "kr", "Swedish Krona"),
];

fn currency_symbol(code: &str) -> Option<&'static str> {
    CURRENCIES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, symbol, _)| *symbol)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    pub currency: String,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            dark_mode: false,
        }
    }
}

fn read<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Option<T> {
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable preference");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read preference");
            None
        }
    }
}

impl Preferences {
    /// Stored preferences, with defaults for anything missing, unreadable or
    /// naming an unknown currency.
    pub fn load<S: Storage>(storage: &S) -> Self {
        let defaults = Self::default();
        let currency = read::<S, String>(storage, CURRENCY_KEY)
            .filter(|code| currency_symbol(code).is_some())
            .unwrap_or(defaults.currency);
        Self {
            theme: read(storage, THEME_KEY).unwrap_or(defaults.theme),
            currency,
            dark_mode: read(storage, DARK_MODE_KEY).unwrap_or(defaults.dark_mode),
        }
    }

    pub fn save<S: Storage>(&self, storage: &mut S) -> StoreResult<()> {
        storage.set_many(&[
            (THEME_KEY, serde_json::to_string(&self.theme)?),
            (CURRENCY_KEY, serde_json::to_string(&self.currency)?),
            (DARK_MODE_KEY, serde_json::to_string(&self.dark_mode)?),
        ])
    }

    pub fn set_currency(&mut self, code: &str) -> StoreResult<()> {
        let code = code.trim().to_uppercase();
        if currency_symbol(&code).is_none() {
            return Err(StoreError::Validation(format!(
                "unsupported currency '{}'",
                code
            )));
        }
        self.currency = code;
        Ok(())
    }

    pub fn symbol(&self) -> &'static str {
        currency_symbol(&self.currency).unwrap_or("$")
    }

    pub fn format_money(&self, amount: &Decimal) -> String {
        fmt_money(amount, self.symbol())
    }
}
