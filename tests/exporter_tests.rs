// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use pocketledger::commands::{exporter, importer};
use pocketledger::models::{Transaction, TxType};
use pocketledger::{cli, ledger::Ledger, storage::SqliteStore};
use rusqlite::Connection;
use rust_decimal_macros::dec;
use serde_json::json;
use tempfile::tempdir;

fn ledger_with_one() -> Ledger<SqliteStore> {
    let mut ledger =
        Ledger::load(SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap());
    let ts = Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap();
    ledger
        .replace_all(vec![Transaction {
            id: "rec_0001".into(),
            kind: TxType::Expense,
            amount: dec!(12.34),
            description: "Corner shop".into(),
            category: "Groceries".into(),
            date: "2025-01-02".into(),
            created_at: ts,
            updated_at: ts,
        }])
        .unwrap();
    ledger
}

fn run_export(ledger: &Ledger<SqliteStore>, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "export",
        "--format",
        format,
        "--out",
        out,
    ]);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(ledger, export_m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn export_writes_pretty_json_verbatim() {
    let ledger = ledger_with_one();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("ledger_backup.json");
    run_export(&ledger, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.contains("\n  {\n    \"id\": \"rec_0001\",\n    \"type\": \"expense\""));
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": "rec_0001",
                "type": "expense",
                "amount": 12.34,
                "description": "Corner shop",
                "category": "Groceries",
                "date": "2025-01-02",
                "createdAt": "2025-01-02T09:30:00Z",
                "updatedAt": "2025-01-02T09:30:00Z"
            }
        ])
    );
}

#[test]
fn exported_json_imports_back() {
    let ledger = ledger_with_one();
    let raw = exporter::to_json(ledger.transactions()).unwrap();
    let back = importer::parse_transactions(&raw, Utc::now()).unwrap();
    assert_eq!(back, ledger.transactions());
}

#[test]
fn export_csv_has_header_and_rows() {
    let ledger = ledger_with_one();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("ledger.csv");
    run_export(&ledger, "csv", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("id,type,amount,description,category,date,createdAt,updatedAt")
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("rec_0001,expense,12.34,Corner shop,Groceries,2025-01-02,"));
}

#[test]
fn export_rejects_unknown_format() {
    let ledger = ledger_with_one();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.xml");
    assert!(run_export(&ledger, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
