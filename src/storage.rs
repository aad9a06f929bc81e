// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence of the two ledger documents. Loading never fails: missing or
//! unreadable data comes back as defaults.

use crate::db::{SETTINGS_KEY, TRANSACTIONS_KEY, kv_get, kv_set};
use crate::error::LedgerError;
use crate::models::{Settings, Transaction};
use rusqlite::Connection;
use serde::de::DeserializeOwned;

pub trait Store {
    fn load_transactions(&self) -> Vec<Transaction>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), LedgerError>;
    fn load_settings(&self) -> Settings;
    fn save_settings(&self, settings: &Settings) -> Result<(), LedgerError>;
}

/// JSON documents in the `kv` table of a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<SqliteStore, LedgerError> {
        crate::db::init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match kv_get(&self.conn, key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                tracing::warn!(key, error = %err, "could not read stored document, using defaults");
                return T::default();
            }
        };
        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(v)) => v,
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!(key, error = %err, "stored document is corrupt, using defaults");
                T::default()
            }
        }
    }
}

impl Store for SqliteStore {
    fn load_transactions(&self) -> Vec<Transaction> {
        self.load_or_default(TRANSACTIONS_KEY)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        let doc = serde_json::to_string(transactions)?;
        kv_set(&self.conn, TRANSACTIONS_KEY, &doc)?;
        tracing::debug!(count = transactions.len(), "transactions saved");
        Ok(())
    }

    fn load_settings(&self) -> Settings {
        self.load_or_default(SETTINGS_KEY)
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), LedgerError> {
        let doc = serde_json::to_string(settings)?;
        kv_set(&self.conn, SETTINGS_KEY, &doc)?;
        tracing::debug!("settings saved");
        Ok(())
    }
}
