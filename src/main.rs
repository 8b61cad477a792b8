// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;
use tracing_subscriber::EnvFilter;

use moneyflow::db::{self, SqliteStorage};
use moneyflow::prefs::Preferences;
use moneyflow::remote::RemoteProvider;
use moneyflow::{DataProvider, LocalProvider, Store, StoreOptions, cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p.trim()),
        None => db::db_path()?,
    };
    let options = if matches.get_flag("strict") {
        StoreOptions::strict()
    } else {
        StoreOptions::default()
    };
    let mut settings = SqliteStorage::open(&path)?;

    match matches.get_one::<String>("remote") {
        Some(url) => {
            tracing::debug!(url = %url, "using remote backend");
            let store = Store::open_with(RemoteProvider::new(url)?, options)?;
            run(store, &mut settings, &path, &matches)
        }
        None => {
            let store = Store::open_with(LocalProvider::new(SqliteStorage::open(&path)?), options)?;
            run(store, &mut settings, &path, &matches)
        }
    }
}

fn run<P: DataProvider>(
    mut store: Store<P>,
    settings: &mut SqliteStorage,
    path: &std::path::Path,
    matches: &ArgMatches,
) -> Result<()> {
    let prefs = Preferences::load(&*settings);
    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, &prefs, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut store, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&mut store, &prefs, sub)?,
        Some(("client", sub)) => commands::contacts::handle_clients(&mut store, &prefs, sub)?,
        Some(("vendor", sub)) => commands::contacts::handle_vendors(&mut store, &prefs, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, &prefs, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &prefs, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, sub)?,
        Some(("prefs", sub)) => commands::prefs::handle(settings, sub)?,
        Some(("reset", _)) => {
            store.clear_all()?;
            println!("All data cleared; default categories and accounts restored");
        }
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
