// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::provider::DataProvider;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<P: DataProvider>(store: &Store<P>) -> Result<()> {
    let issues = store.integrity_report();
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|issue| vec![issue]).collect();
        println!("{}", pretty_table(&["Issue"], rows));
    }
    Ok(())
}
