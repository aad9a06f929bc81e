// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ImportError;
use crate::ledger::Ledger;
use crate::models::{Transaction, TxType};
use crate::storage::Store;
use crate::utils::arg;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

pub fn handle<S: Store>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let path = arg(m, "path")?.trim().to_string();
    let raw = std::fs::read_to_string(&path).with_context(|| format!("Open {}", path))?;
    let transactions = parse_transactions(&raw, Utc::now())?;
    let count = transactions.len();
    ledger.replace_all(transactions)?;
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}

fn timestamp(obj: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    obj.get(key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

fn convert(obj: &Map<String, Value>, now: DateTime<Utc>) -> Option<Transaction> {
    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
    let kind: TxType = obj.get("type")?.as_str()?.parse().ok()?;
    let amount = Decimal::try_from(obj.get("amount")?.as_f64()?).ok()?;
    if amount <= Decimal::ZERO {
        return None;
    }
    let created_at = timestamp(obj, "createdAt").unwrap_or(now);
    Some(Transaction {
        id: text("id")?,
        kind,
        amount,
        description: text("description")?,
        category: text("category")?,
        date: text("date")?,
        created_at,
        updated_at: timestamp(obj, "updatedAt").unwrap_or(created_at),
    })
}

/// Parse a JSON backup. Either every record is accepted or none is.
pub fn parse_transactions(raw: &str, now: DateTime<Utc>) -> Result<Vec<Transaction>, ImportError> {
    let data: Value = serde_json::from_str(raw)?;
    if !crate::validators::validate_import_data(&data) {
        return Err(ImportError::InvalidStructure);
    }
    data.as_array()
        .into_iter()
        .flatten()
        .map(|item| {
            item.as_object()
                .and_then(|obj| convert(obj, now))
                .ok_or(ImportError::InvalidStructure)
        })
        .collect()
}
