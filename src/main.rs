// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use pocketledger::{cli, commands, db, ledger::Ledger, logging, storage::SqliteStore, utils};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_arg = matches.get_one::<PathBuf>("db").cloned();
    let conn = db::open_or_init(db_arg.as_deref())?;
    let mut ledger = Ledger::load(SqliteStore::new(conn)?);
    let today = utils::today();

    match matches.subcommand() {
        Some(("init", _)) => match db_arg {
            Some(p) => println!("Ledger initialized at {}", p.display()),
            None => println!("Ledger initialized at {}", db::db_path()?.display()),
        },
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&ledger, sub, today)?,
        Some(("chart", sub)) => commands::dashboard::chart(&ledger, sub, today)?,
        Some(("settings", sub)) => commands::settings::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
