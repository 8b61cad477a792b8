// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Everything the store, its providers and its storage backends can fail with.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("stored data under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("invalid import data: {0}")]
    InvalidImport(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("integrity check failed: {0}")]
    Integrity(String),

    #[error("remote request failed: {0}")]
    Remote(#[from] reqwest::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
