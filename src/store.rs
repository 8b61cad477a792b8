// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The in-memory source of truth for all six collections. Every mutation goes
//! through the injected [`DataProvider`] first and only then lands in memory,
//! so a failed write leaves the store as it was.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::defaults;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Account, Budget, Category, Client, CollectionKind, Collections, Entity, PartialCollections,
    Transaction, Vendor,
};
use crate::provider::DataProvider;

pub const APP_VERSION: &str = "1.0.0";

/// Opt-in constraints. Both are off by default, which accepts duplicate
/// budgets and dangling references the way the data has always been kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Reject a second budget for a category that already has one.
    pub unique_budgets: bool,
    /// Reject records whose category/account ids do not resolve, and
    /// transactions whose type differs from their category's.
    pub check_references: bool,
}

impl StoreOptions {
    pub fn strict() -> Self {
        Self {
            unique_budgets: true,
            check_references: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    transactions: &'a [Transaction],
    categories: &'a [Category],
    accounts: &'a [Account],
    clients: &'a [Client],
    vendors: &'a [Vendor],
    budgets: &'a [Budget],
    export_date: DateTime<Utc>,
    app_version: &'a str,
}

/// What an import replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub collections: Vec<CollectionKind>,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.collections.is_empty() {
            return f.write_str("Nothing to import");
        }
        let names: Vec<&str> = self.collections.iter().map(|k| k.name()).collect();
        write!(f, "Data imported successfully: {}", names.join(", "))
    }
}

pub struct Store<P: DataProvider> {
    provider: P,
    data: Collections,
    options: StoreOptions,
}

impl<P: DataProvider> Store<P> {
    pub fn open(provider: P) -> StoreResult<Self> {
        Self::open_with(provider, StoreOptions::default())
    }

    pub fn open_with(provider: P, options: StoreOptions) -> StoreResult<Self> {
        let mut store = Self {
            provider,
            data: Collections::default(),
            options,
        };
        store.load()?;
        Ok(store)
    }

    /// Read every collection from the provider.
    ///
    /// Missing or corrupt collections fall back to the sample set, which is
    /// then written back. Any other read failure also falls back, but only in
    /// memory.
    pub fn load(&mut self) -> StoreResult<()> {
        let sample = defaults::sample();
        let mut write_back = PartialCollections::default();

        self.data.transactions = self.load_kind(sample.transactions, &mut write_back.transactions);
        self.data.categories = self.load_kind(sample.categories, &mut write_back.categories);
        self.data.accounts = self.load_kind(sample.accounts, &mut write_back.accounts);
        self.data.clients = self.load_kind(sample.clients, &mut write_back.clients);
        self.data.vendors = self.load_kind(sample.vendors, &mut write_back.vendors);
        self.data.budgets = self.load_kind(sample.budgets, &mut write_back.budgets);

        if !write_back.is_empty() {
            self.replace(write_back)?;
        }
        Ok(())
    }

    /// Write `incoming` through the provider, then fold it into memory. When
    /// the provider renumbers what it stores, the written collections are read
    /// back so memory carries the provider's ids.
    fn replace(&mut self, incoming: PartialCollections) -> StoreResult<()> {
        self.provider.replace_all(&incoming)?;
        let stored = if self.provider.reassigns_ids() {
            PartialCollections {
                transactions: self.read_back(&incoming.transactions)?,
                categories: self.read_back(&incoming.categories)?,
                accounts: self.read_back(&incoming.accounts)?,
                clients: self.read_back(&incoming.clients)?,
                vendors: self.read_back(&incoming.vendors)?,
                budgets: self.read_back(&incoming.budgets)?,
            }
        } else {
            incoming
        };
        stored.merge_into(&mut self.data);
        Ok(())
    }

    fn read_back<E: Entity>(&mut self, written: &Option<Vec<E>>) -> StoreResult<Option<Vec<E>>> {
        if written.is_none() {
            return Ok(None);
        }
        Ok(Some(self.provider.get_all::<E>()?.unwrap_or_default()))
    }

    fn load_kind<E: Entity>(&mut self, fallback: Vec<E>, write_back: &mut Option<Vec<E>>) -> Vec<E> {
        match self.provider.get_all::<E>() {
            Ok(Some(items)) => items,
            Ok(None) => {
                tracing::debug!(collection = %E::KIND, "nothing stored, using defaults");
                *write_back = Some(fallback.clone());
                fallback
            }
            Err(err @ StoreError::Corrupt { .. }) => {
                tracing::warn!(collection = %E::KIND, error = %err, "discarding corrupt data, using defaults");
                *write_back = Some(fallback.clone());
                fallback
            }
            Err(err) => {
                tracing::warn!(collection = %E::KIND, error = %err, "could not load, using defaults");
                fallback
            }
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn collections(&self) -> &Collections {
        &self.data
    }

    pub fn all<E: Entity>(&self) -> &[E] {
        E::collection(&self.data)
    }

    pub fn get<E: Entity>(&self, id: i64) -> Option<&E> {
        self.all::<E>().iter().find(|e| e.id() == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn accounts(&self) -> &[Account] {
        &self.data.accounts
    }

    pub fn clients(&self) -> &[Client] {
        &self.data.clients
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.data.vendors
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.data.budgets
    }

    /// First budget recorded for a category.
    pub fn budget_for(&self, category_id: i64) -> Option<&Budget> {
        self.data.budgets.iter().find(|b| b.category_id == category_id)
    }

    fn check_constraints<E: Entity>(&self, entity: &E) -> StoreResult<()> {
        if self.options.check_references {
            entity.check_references(&self.data)?;
        }
        if self.options.unique_budgets {
            let taken = self
                .all::<E>()
                .iter()
                .any(|other| other.id() != entity.id() && entity.duplicates(other));
            if taken {
                return Err(StoreError::Integrity(format!(
                    "{} already holds a record for this key",
                    E::KIND
                )));
            }
        }
        Ok(())
    }

    /// Validate, assign an id and persist a new record.
    pub fn add<E: Entity>(&mut self, entity: E) -> StoreResult<E> {
        entity.validate()?;
        self.check_constraints(&entity)?;
        let created = self.provider.create(entity)?;
        tracing::debug!(collection = %E::KIND, id = created.id(), "added");
        E::collection_mut(&mut self.data).push(created.clone());
        Ok(created)
    }

    /// Apply `patch` to the record with `id`. Returns `false` when there is none.
    pub fn update<E: Entity>(&mut self, id: i64, patch: E::Patch) -> StoreResult<bool> {
        let Some(current) = self.get::<E>(id) else {
            tracing::debug!(collection = %E::KIND, id, "update skipped, no such record");
            return Ok(false);
        };
        let mut next = current.clone();
        next.apply(patch);
        next.validate()?;
        self.check_constraints(&next)?;
        self.provider.update(&next)?;
        for item in E::collection_mut(&mut self.data)
            .iter_mut()
            .filter(|i| i.id() == id)
        {
            *item = next.clone();
        }
        tracing::debug!(collection = %E::KIND, id, "updated");
        Ok(true)
    }

    /// Delete the record with `id`. Returns `false` when there is none.
    pub fn remove<E: Entity>(&mut self, id: i64) -> StoreResult<bool> {
        let Some(existing) = self.get::<E>(id).cloned() else {
            return Ok(false);
        };
        self.provider.delete(&existing)?;
        E::collection_mut(&mut self.data).retain(|i| i.id() != id);
        tracing::debug!(collection = %E::KIND, id, "removed");
        Ok(true)
    }

    /// All collections as one pretty-printed JSON document stamped with `now`.
    pub fn export_at(&self, now: DateTime<Utc>) -> StoreResult<String> {
        let doc = ExportDocument {
            transactions: &self.data.transactions,
            categories: &self.data.categories,
            accounts: &self.data.accounts,
            clients: &self.data.clients,
            vendors: &self.data.vendors,
            budgets: &self.data.budgets,
            export_date: now,
            app_version: APP_VERSION,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    pub fn export_all(&self) -> StoreResult<String> {
        self.export_at(Utc::now())
    }

    /// Replace every collection present in `text`.
    ///
    /// The whole document is parsed and checked before anything is written:
    /// malformed JSON, a collection that does not match its record shape, or
    /// duplicate ids within a collection reject the import and leave the store
    /// untouched.
    pub fn import_all(&mut self, text: &str) -> StoreResult<ImportSummary> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| StoreError::InvalidImport(e.to_string()))?;
        if !value.is_object() {
            return Err(StoreError::InvalidImport(
                "expected a JSON object with collections".into(),
            ));
        }
        let incoming: PartialCollections =
            serde_json::from_value(value).map_err(|e| StoreError::InvalidImport(e.to_string()))?;

        ensure_unique_ids(&incoming.transactions)?;
        ensure_unique_ids(&incoming.categories)?;
        ensure_unique_ids(&incoming.accounts)?;
        ensure_unique_ids(&incoming.clients)?;
        ensure_unique_ids(&incoming.vendors)?;
        ensure_unique_ids(&incoming.budgets)?;

        let summary = ImportSummary {
            collections: incoming.kinds(),
        };
        self.replace(incoming)?;
        tracing::info!(collections = ?summary.collections, "imported data");
        Ok(summary)
    }

    /// Drop all activity and restore the default categories and accounts.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.replace(PartialCollections::from(defaults::cleared()))?;
        tracing::info!("cleared all data");
        Ok(())
    }

    /// Every broken invariant in the current data, without changing anything.
    pub fn integrity_report(&self) -> Vec<String> {
        let mut issues = Vec::new();
        collect_duplicate_ids(self.transactions(), &mut issues);
        collect_duplicate_ids(self.categories(), &mut issues);
        collect_duplicate_ids(self.accounts(), &mut issues);
        collect_duplicate_ids(self.clients(), &mut issues);
        collect_duplicate_ids(self.vendors(), &mut issues);
        collect_duplicate_ids(self.budgets(), &mut issues);

        for t in self.transactions() {
            if let Err(e) = t.check_references(&self.data) {
                issues.push(e.to_string());
            }
        }
        for b in self.budgets() {
            if let Err(e) = b.check_references(&self.data) {
                issues.push(e.to_string());
            }
        }

        let mut per_category: HashMap<i64, usize> = HashMap::new();
        for b in self.budgets() {
            *per_category.entry(b.category_id).or_default() += 1;
        }
        let mut doubled: Vec<(i64, usize)> =
            per_category.into_iter().filter(|(_, n)| *n > 1).collect();
        doubled.sort();
        for (category_id, n) in doubled {
            issues.push(format!("category {} has {} budgets", category_id, n));
        }
        issues
    }
}

fn ensure_unique_ids<E: Entity>(items: &Option<Vec<E>>) -> StoreResult<()> {
    let Some(items) = items else {
        return Ok(());
    };
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(StoreError::InvalidImport(format!(
                "duplicate id {} in {}",
                item.id(),
                E::KIND
            )));
        }
    }
    Ok(())
}

fn collect_duplicate_ids<E: Entity>(items: &[E], issues: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            issues.push(format!("duplicate id {} in {}", item.id(), E::KIND));
        }
    }
}
