// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The persistence seam behind the store. Each provider offers the same
//! get-all/create/update/delete capability per collection, so a local or a
//! remote backend can be swapped in without touching the store.

use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::models::{Entity, PartialCollections};
use crate::storage::Storage;

pub trait DataProvider {
    /// All records of one kind; `Ok(None)` when nothing was ever stored.
    fn get_all<E: Entity>(&mut self) -> StoreResult<Option<Vec<E>>>;

    /// Persist a new record and return it with the id the backend assigned.
    fn create<E: Entity>(&mut self, entity: E) -> StoreResult<E>;

    /// Replace the stored record with the same id.
    fn update<E: Entity>(&mut self, entity: &E) -> StoreResult<()>;

    fn delete<E: Entity>(&mut self, entity: &E) -> StoreResult<()>;

    /// Overwrite every collection included in `data`.
    fn replace_all(&mut self, data: &PartialCollections) -> StoreResult<()>;

    /// Whether `replace_all` stores records under new ids instead of the
    /// ones it was given.
    fn reassigns_ids(&self) -> bool {
        false
    }
}

/// Next id for a collection: one past the largest id in use.
pub fn next_id<E: Entity>(items: &[E]) -> i64 {
    items.iter().map(Entity::id).max().unwrap_or(0) + 1
}

/// Provider that mirrors each collection as one JSON array in durable storage.
pub struct LocalProvider<S: Storage> {
    storage: S,
}

impl<S: Storage> LocalProvider<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn load<E: Entity>(&self) -> StoreResult<Vec<E>> {
        Ok(self.get_stored::<E>()?.unwrap_or_default())
    }

    fn get_stored<E: Entity>(&self) -> StoreResult<Option<Vec<E>>> {
        let key = E::KIND.storage_key();
        match self.storage.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    fn save<E: Entity>(&mut self, items: &[E]) -> StoreResult<()> {
        let key = E::KIND.storage_key();
        let raw = serde_json::to_string(items)?;
        self.storage.set(key, &raw)?;
        tracing::debug!(key, count = items.len(), "persisted collection");
        Ok(())
    }
}

fn encode<T: Serialize>(items: &Option<Vec<T>>) -> StoreResult<Option<String>> {
    items
        .as_ref()
        .map(|v| serde_json::to_string(v).map_err(StoreError::from))
        .transpose()
}

impl<S: Storage> DataProvider for LocalProvider<S> {
    fn get_all<E: Entity>(&mut self) -> StoreResult<Option<Vec<E>>> {
        self.get_stored()
    }

    fn create<E: Entity>(&mut self, mut entity: E) -> StoreResult<E> {
        let mut items = self.load::<E>()?;
        entity.set_id(next_id(&items));
        items.push(entity.clone());
        self.save(&items)?;
        Ok(entity)
    }

    fn update<E: Entity>(&mut self, entity: &E) -> StoreResult<()> {
        let mut items = self.load::<E>()?;
        for item in items.iter_mut().filter(|i| i.id() == entity.id()) {
            *item = entity.clone();
        }
        self.save(&items)
    }

    fn delete<E: Entity>(&mut self, entity: &E) -> StoreResult<()> {
        let mut items = self.load::<E>()?;
        items.retain(|i| i.id() != entity.id());
        self.save(&items)
    }

    fn replace_all(&mut self, data: &PartialCollections) -> StoreResult<()> {
        use crate::models::CollectionKind as K;

        let encoded = [
            (K::Transactions, encode(&data.transactions)?),
            (K::Categories, encode(&data.categories)?),
            (K::Accounts, encode(&data.accounts)?),
            (K::Clients, encode(&data.clients)?),
            (K::Vendors, encode(&data.vendors)?),
            (K::Budgets, encode(&data.budgets)?),
        ];
        let entries: Vec<(&str, String)> = encoded
            .into_iter()
            .filter_map(|(kind, raw)| raw.map(|r| (kind.storage_key(), r)))
            .collect();
        self.storage.set_many(&entries)?;
        tracing::debug!(collections = entries.len(), "replaced collections");
        Ok(())
    }
}
