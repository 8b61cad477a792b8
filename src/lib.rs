// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod db;
pub mod defaults;
pub mod error;
pub mod models;
pub mod prefs;
pub mod provider;
pub mod remote;
pub mod storage;
pub mod store;
pub mod utils;

pub use error::{StoreError, StoreResult};
pub use provider::{DataProvider, LocalProvider};
pub use store::{Store, StoreOptions};
