// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The stateful shell: holds the current snapshot, runs the pure operations
//! from [`crate::records`], and persists after every change.

use crate::error::LedgerError;
use crate::models::{Settings, SettingsPatch, Transaction};
use crate::records::{
    EditDraft, TransactionDraft, build_patch, build_transaction, next_id, with_added,
    with_updated, without,
};
use crate::storage::Store;
use crate::validators::{parse_amount, validate_cap};
use crate::money::to_canonical;
use chrono::Utc;

pub struct Ledger<S: Store> {
    store: S,
    transactions: Vec<Transaction>,
    settings: Settings,
}

impl<S: Store> Ledger<S> {
    pub fn load(store: S) -> Ledger<S> {
        let transactions = store.load_transactions();
        let settings = store.load_settings();
        tracing::debug!(count = transactions.len(), "ledger loaded");
        Ledger {
            store,
            transactions,
            settings,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn commit(&mut self, next: Vec<Transaction>) -> Result<(), LedgerError> {
        self.store.save_transactions(&next)?;
        self.transactions = next;
        Ok(())
    }

    /// Validate and record a new entry; returns the stored record.
    pub fn add(&mut self, draft: &TransactionDraft) -> Result<Transaction, LedgerError> {
        let id = next_id(&self.transactions);
        let tx = build_transaction(draft, &self.settings, id, Utc::now())?;
        self.commit(with_added(&self.transactions, tx.clone()))?;
        tracing::info!(id = %tx.id, kind = %tx.kind, "transaction added");
        Ok(tx)
    }

    pub fn update(&mut self, id: &str, draft: &EditDraft) -> Result<Transaction, LedgerError> {
        let patch = build_patch(draft, &self.settings)?;
        let next = with_updated(&self.transactions, id, &patch, Utc::now())
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let updated = next
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        self.commit(next)?;
        tracing::info!(id, "transaction updated");
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<Transaction, LedgerError> {
        let removed = self
            .transactions
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        self.commit(without(&self.transactions, id))?;
        tracing::info!(id, "transaction deleted");
        Ok(removed)
    }

    /// Replace the whole collection, as an import does.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        let count = transactions.len();
        self.commit(transactions)?;
        tracing::info!(count, "transactions replaced");
        Ok(())
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<&Settings, LedgerError> {
        let next = self.settings.merged(patch);
        self.store.save_settings(&next)?;
        self.settings = next;
        Ok(&self.settings)
    }

    /// Validate a cap typed in the display currency and store it canonical.
    pub fn set_cap(&mut self, raw: &str) -> Result<&Settings, LedgerError> {
        validate_cap(raw).map_err(LedgerError::InvalidCap)?;
        let display = parse_amount(raw).ok_or(LedgerError::InvalidCap(
            crate::error::ValidationError::CapFormat,
        ))?;
        let cap = to_canonical(display, &self.settings);
        self.update_settings(SettingsPatch {
            cap: Some(cap),
            ..SettingsPatch::default()
        })
    }
}
