// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::error::StoreResult;

/// Durable key -> JSON string storage.
pub trait Storage {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Write several keys together. Backends that can do so write all or none.
    fn set_many(&mut self, entries: &[(&str, String)]) -> StoreResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Process-local storage, used by tests and as a scratch backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
