// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreResult;
use crate::storage::Storage;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.moneyflow", "Moneyflow", "moneyflow"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneyflow.sqlite"))
}

/// Key-value storage in a single SQLite table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Create data dir {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS storage(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

const UPSERT: &str = "INSERT INTO storage(key, value) VALUES (?1, ?2)
     ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')";

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(UPSERT, params![key, value])?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM storage WHERE key=?1", params![key])?;
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            tx.execute(UPSERT, params![key, value])?;
        }
        tx.commit()?;
        Ok(())
    }
}
