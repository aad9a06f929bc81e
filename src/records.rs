// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure operations on the transaction collection. Nothing here mutates its
//! input; every change produces the next collection.

use crate::error::ValidationError;
use crate::models::{Settings, Transaction, TransactionPatch, TxType};
use crate::money::to_canonical;
use crate::validators::{
    parse_amount, validate_amount, validate_category, validate_date, validate_description,
};
use chrono::{DateTime, Utc};
use std::fmt;

const ID_PREFIX: &str = "rec_";

/// Raw entry-form input. `amount` is in the display currency.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TxType,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
}

/// Every field that failed, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<(&'static str, ValidationError)>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<ValidationError> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, e)| *e)
    }

    fn check(&mut self, field: &'static str, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.0.push((field, e));
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, err)| format!("{}: {}", field, err))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

pub fn validate_draft(draft: &TransactionDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check("description", validate_description(&draft.description));
    errors.check("amount", validate_amount(&draft.amount));
    errors.check("date", validate_date(&draft.date));
    errors.check("category", validate_category(&draft.category));
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Next free id: one past the highest `rec_NNNN` suffix in use.
pub fn next_id(transactions: &[Transaction]) -> String {
    let max = transactions
        .iter()
        .filter_map(|tx| tx.id.strip_prefix(ID_PREFIX))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:04}", ID_PREFIX, max.saturating_add(1))
}

/// Validate a draft and turn it into a stored record, converting the amount to
/// the canonical unit.
pub fn build_transaction(
    draft: &TransactionDraft,
    settings: &Settings,
    id: String,
    now: DateTime<Utc>,
) -> Result<Transaction, FieldErrors> {
    validate_draft(draft)?;
    let display_amount = parse_amount(&draft.amount).ok_or_else(|| {
        FieldErrors(vec![("amount", ValidationError::AmountFormat)])
    })?;
    Ok(Transaction {
        id,
        kind: draft.kind,
        amount: to_canonical(display_amount, settings),
        description: draft.description.trim().to_string(),
        category: draft.category.clone(),
        date: draft.date.clone(),
        created_at: now,
        updated_at: now,
    })
}

pub fn with_added(transactions: &[Transaction], tx: Transaction) -> Vec<Transaction> {
    let mut next = transactions.to_vec();
    next.push(tx);
    next
}

pub fn without(transactions: &[Transaction], id: &str) -> Vec<Transaction> {
    transactions.iter().filter(|tx| tx.id != id).cloned().collect()
}

/// Merge `patch` into the record with `id` and stamp `updated_at`. `None` when
/// no record has that id.
pub fn with_updated(
    transactions: &[Transaction],
    id: &str,
    patch: &TransactionPatch,
    now: DateTime<Utc>,
) -> Option<Vec<Transaction>> {
    if !transactions.iter().any(|tx| tx.id == id) {
        return None;
    }
    Some(
        transactions
            .iter()
            .map(|tx| {
                if tx.id != id {
                    return tx.clone();
                }
                let mut updated = tx.clone();
                if let Some(amount) = patch.amount {
                    updated.amount = amount;
                }
                if let Some(ref d) = patch.description {
                    updated.description = d.trim().to_string();
                }
                if let Some(ref c) = patch.category {
                    updated.category = c.clone();
                }
                if let Some(ref d) = patch.date {
                    updated.date = d.clone();
                }
                updated.updated_at = now;
                updated
            })
            .collect(),
    )
}

/// Raw edit-form input; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditDraft {
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// Validate the supplied edit fields and produce a canonical patch.
pub fn build_patch(draft: &EditDraft, settings: &Settings) -> Result<TransactionPatch, FieldErrors> {
    let mut errors = FieldErrors::default();
    if let Some(ref d) = draft.description {
        errors.check("description", validate_description(d));
    }
    if let Some(ref a) = draft.amount {
        errors.check("amount", validate_amount(a));
    }
    if let Some(ref d) = draft.date {
        errors.check("date", validate_date(d));
    }
    if let Some(ref c) = draft.category {
        errors.check("category", validate_category(c));
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(TransactionPatch {
        amount: draft
            .amount
            .as_deref()
            .and_then(parse_amount)
            .map(|a| to_canonical(a, settings)),
        description: draft.description.clone(),
        category: draft.category.clone(),
        date: draft.date.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn tx(id: &str) -> Transaction {
        let now = Utc::now();
        Transaction {
            id: id.into(),
            kind: TxType::Expense,
            amount: Decimal::ONE,
            description: "Bus".into(),
            category: "Transport".into(),
            date: "2025-01-01".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn next_id_skips_past_gaps() {
        assert_eq!(next_id(&[]), "rec_0001");
        let txs = vec![tx("rec_0001"), tx("rec_0007"), tx("imported")];
        assert_eq!(next_id(&txs), "rec_0008");
        let huge = vec![tx("rec_18446744073709551615")];
        assert_eq!(next_id(&huge), "rec_18446744073709551615");
    }

    #[test]
    fn draft_reports_every_field() {
        let draft = TransactionDraft {
            kind: TxType::Expense,
            amount: "0".into(),
            description: "ok".into(),
            category: "Food 2".into(),
            date: "2025-1-1".into(),
        };
        let errs = validate_draft(&draft).unwrap_err();
        assert_eq!(errs.get("amount"), Some(ValidationError::AmountNotPositive));
        assert_eq!(errs.get("date"), Some(ValidationError::DateFormat));
        assert_eq!(errs.get("category"), Some(ValidationError::CategoryFormat));
        assert_eq!(errs.get("description"), None);
    }

    #[test]
    fn update_of_unknown_id_is_none() {
        let txs = vec![tx("rec_0001")];
        assert!(with_updated(&txs, "rec_0009", &TransactionPatch::default(), Utc::now()).is_none());
    }
}
