// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{Settings, Transaction, TxType};
use crate::money::display_money;
use crate::records::{EditDraft, TransactionDraft};
use crate::search::{compile_matcher, filter, highlight};
use crate::sort::{SortField, SortState};
use crate::storage::Store;
use crate::utils::{arg, maybe_print_json, pretty_table, today};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle<S: Store>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => remove(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: Store>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxType = arg(sub, "type")?.parse().map_err(|e: String| anyhow!(e))?;
    let date = sub
        .get_one::<String>("date")
        .cloned()
        .unwrap_or_else(|| today().format("%Y-%m-%d").to_string());
    let draft = TransactionDraft {
        kind,
        amount: arg(sub, "amount")?.clone(),
        description: arg(sub, "description")?.clone(),
        category: arg(sub, "category")?.clone(),
        date,
    };
    let tx = ledger.add(&draft)?;
    println!(
        "Recorded {} {} on {} '{}' ({})",
        tx.kind,
        display_money(tx.amount, ledger.settings()),
        tx.date,
        tx.description,
        tx.id
    );
    Ok(())
}

fn edit<S: Store>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?.trim().to_string();
    let draft = EditDraft {
        amount: sub.get_one::<String>("amount").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        date: sub.get_one::<String>("date").cloned(),
    };
    let tx = ledger.update(&id, &draft)?;
    println!("Updated {} '{}'", tx.id, tx.description);
    Ok(())
}

fn remove<S: Store>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?.trim().to_string();
    let tx = ledger.delete(&id)?;
    println!("Removed {} '{}'", tx.id, tx.description);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
}

#[derive(Debug)]
pub struct RecordsView {
    pub rows: Vec<TransactionRow>,
    /// Set when the search pattern did not compile; rows are then unfiltered.
    pub notice: Option<String>,
}

pub fn query_rows(
    transactions: &[Transaction],
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<RecordsView> {
    let pattern = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let case_sensitive = sub.get_flag("case_sensitive");
    let mark = sub.get_flag("highlight");

    let (matcher, notice) = match compile_matcher(pattern, case_sensitive) {
        Ok(m) => (m, None),
        Err(err) => (None, Some(err.to_string())),
    };

    let field: SortField = arg(sub, "sort")?.parse().map_err(|e: String| anyhow!(e))?;
    let state = SortState {
        field,
        ascending: !sub.get_flag("desc"),
    };
    let data = state.apply(&filter(transactions, matcher.as_ref()));

    let rows = data
        .iter()
        .map(|tx| {
            let (description, category) = if mark {
                (
                    highlight(&tx.description, matcher.as_ref()),
                    highlight(&tx.category, matcher.as_ref()),
                )
            } else {
                (tx.description.clone(), tx.category.clone())
            };
            TransactionRow {
                id: tx.id.clone(),
                date: tx.date.clone(),
                description,
                category,
                kind: tx.kind.to_string(),
                amount: display_money(tx.amount, settings),
            }
        })
        .collect();
    Ok(RecordsView { rows, notice })
}

fn list<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = query_rows(ledger.transactions(), ledger.settings(), sub)?;
    if let Some(ref notice) = view.notice {
        eprintln!("{}", notice);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &view.rows)? {
        if view.rows.is_empty() {
            println!("No transactions found.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = view
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Type", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}
