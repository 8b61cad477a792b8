// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::StoreResult;
use crate::models::{Budget, Entity, PartialCollections, Transaction};
use crate::provider::DataProvider;

const UA: &str = concat!("moneyflow/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(UA)
        .build()
}

/// Old-to-new ids of records the backend renumbered while replacing them.
#[derive(Debug, Default)]
pub struct IdMaps {
    pub categories: HashMap<i64, i64>,
    pub accounts: HashMap<i64, i64>,
    pub clients: HashMap<i64, i64>,
    pub vendors: HashMap<i64, i64>,
}

fn remap(ids: &HashMap<i64, i64>, id: i64) -> i64 {
    ids.get(&id).copied().unwrap_or(id)
}

impl IdMaps {
    /// `t` pointing at the new ids. Ids that were not renumbered are kept.
    pub fn transaction(&self, t: &Transaction) -> Transaction {
        let contacts = if t.is_expense() {
            &self.vendors
        } else {
            &self.clients
        };
        Transaction {
            category_id: remap(&self.categories, t.category_id),
            account_id: t.account_id.map(|id| remap(&self.accounts, id)),
            client_vendor_id: t.client_vendor_id.map(|id| remap(contacts, id)),
            ..t.clone()
        }
    }

    pub fn budget(&self, b: &Budget) -> Budget {
        Budget {
            category_id: remap(&self.categories, b.category_id),
            ..b.clone()
        }
    }
}

/// Provider backed by the REST API under `{base}/api`.
///
/// The backend assigns its own ids on create, so `replace_all` writes
/// categories, accounts and contacts first and points transactions and
/// budgets at their new ids. It is not atomic: records go one request at a
/// time, and a failure midway leaves the backend partly updated.
pub struct RemoteProvider {
    client: Client,
    base: String,
}

impl RemoteProvider {
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Ok(Self {
            client: http_client()?,
            base: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn collection_url<E: Entity>(&self) -> String {
        format!("{}/api/{}", self.base, E::KIND.name())
    }

    pub fn record_url<E: Entity>(&self, entity: &E) -> String {
        format!("{}/{}", self.collection_url::<E>(), entity.remote_id())
    }

    fn fetch<E: Entity>(&self) -> StoreResult<Vec<E>> {
        let url = self.collection_url::<E>();
        tracing::debug!(%url, "GET");
        let items = self.client.get(&url).send()?.error_for_status()?.json()?;
        Ok(items)
    }

    fn clear<E: Entity>(&mut self, items: &Option<Vec<E>>) -> StoreResult<()> {
        if items.is_none() {
            return Ok(());
        }
        for existing in self.fetch::<E>()? {
            self.delete(&existing)?;
        }
        Ok(())
    }

    fn recreate<E: Entity>(&mut self, items: &[E]) -> StoreResult<HashMap<i64, i64>> {
        let mut ids = HashMap::with_capacity(items.len());
        for item in items {
            let created = self.create(item.clone())?;
            ids.insert(item.id(), created.id());
        }
        Ok(ids)
    }
}

impl DataProvider for RemoteProvider {
    fn get_all<E: Entity>(&mut self) -> StoreResult<Option<Vec<E>>> {
        self.fetch().map(Some)
    }

    fn create<E: Entity>(&mut self, entity: E) -> StoreResult<E> {
        let url = self.collection_url::<E>();
        tracing::debug!(%url, "POST");
        let created = self
            .client
            .post(&url)
            .json(&entity)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(created)
    }

    fn update<E: Entity>(&mut self, entity: &E) -> StoreResult<()> {
        let url = self.record_url(entity);
        tracing::debug!(%url, "PUT");
        self.client
            .put(&url)
            .json(entity)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn delete<E: Entity>(&mut self, entity: &E) -> StoreResult<()> {
        let url = self.record_url(entity);
        tracing::debug!(%url, "DELETE");
        self.client.delete(&url).send()?.error_for_status()?;
        Ok(())
    }

    fn replace_all(&mut self, data: &PartialCollections) -> StoreResult<()> {
        // Dependents go first on the way out and last on the way in.
        self.clear(&data.transactions)?;
        self.clear(&data.budgets)?;
        self.clear(&data.vendors)?;
        self.clear(&data.clients)?;
        self.clear(&data.accounts)?;
        self.clear(&data.categories)?;

        let mut maps = IdMaps::default();
        if let Some(items) = &data.categories {
            maps.categories = self.recreate(items)?;
        }
        if let Some(items) = &data.accounts {
            maps.accounts = self.recreate(items)?;
        }
        if let Some(items) = &data.clients {
            maps.clients = self.recreate(items)?;
        }
        if let Some(items) = &data.vendors {
            maps.vendors = self.recreate(items)?;
        }
        if let Some(items) = &data.transactions {
            let items: Vec<Transaction> = items.iter().map(|t| maps.transaction(t)).collect();
            self.recreate(&items)?;
        }
        if let Some(items) = &data.budgets {
            let items: Vec<Budget> = items.iter().map(|b| maps.budget(b)).collect();
            self.recreate(&items)?;
        }
        tracing::debug!(collections = ?data.kinds(), "replaced remote collections");
        Ok(())
    }

    fn reassigns_ids(&self) -> bool {
        true
    }
}
