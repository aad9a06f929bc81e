// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::storage::Store;
use crate::utils::arg;
use anyhow::{Result, anyhow};
use std::path::Path;

pub fn handle<S: Store>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(m, "format")?.to_lowercase();
    let out = arg(m, "out")?.trim().to_string();

    match fmt.as_str() {
        "json" => std::fs::write(&out, to_json(ledger.transactions())?)?,
        "csv" => write_csv(ledger.transactions(), Path::new(&out))?,
        _ => return Err(anyhow!("Unknown format: {} (use json|csv)", fmt)),
    }
    println!(
        "Exported {} transactions to {}",
        ledger.transactions().len(),
        out
    );
    Ok(())
}

/// The live collection, verbatim, as pretty JSON.
pub fn to_json(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

pub fn write_csv(transactions: &[Transaction], out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "type",
        "amount",
        "description",
        "category",
        "date",
        "createdAt",
        "updatedAt",
    ])?;
    for tx in transactions {
        wtr.write_record([
            tx.id.clone(),
            tx.kind.to_string(),
            tx.amount.normalize().to_string(),
            tx.description.clone(),
            tx.category.clone(),
            tx.date.clone(),
            tx.created_at.to_rfc3339(),
            tx.updated_at.to_rfc3339(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
