// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Description,
    Category,
    Type,
    Id,
    Amount,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "description" => Ok(SortField::Description),
            "category" => Ok(SortField::Category),
            "type" => Ok(SortField::Type),
            "id" => Ok(SortField::Id),
            "amount" => Ok(SortField::Amount),
            other => Err(format!("Unknown sort field '{}'", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortField::Date => "date",
            SortField::Description => "description",
            SortField::Category => "category",
            SortField::Type => "type",
            SortField::Id => "id",
            SortField::Amount => "amount",
        };
        f.write_str(s)
    }
}

/// Current sort column and direction of the records view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            field: SortField::Date,
            ascending: true,
        }
    }
}

impl SortState {
    /// Same field flips direction; a new field starts ascending.
    pub fn toggle(self, field: SortField) -> SortState {
        if self.field == field {
            SortState {
                field,
                ascending: !self.ascending,
            }
        } else {
            SortState {
                field,
                ascending: true,
            }
        }
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        sort(transactions, self.field, self.ascending)
    }
}

fn text_key(tx: &Transaction, field: SortField) -> String {
    match field {
        SortField::Date => tx.date.to_lowercase(),
        SortField::Description => tx.description.to_lowercase(),
        SortField::Category => tx.category.to_lowercase(),
        SortField::Type => tx.kind.as_str().to_string(),
        SortField::Id => tx.id.to_lowercase(),
        SortField::Amount => String::new(),
    }
}

fn compare(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Amount => a.amount.cmp(&b.amount),
        _ => text_key(a, field).cmp(&text_key(b, field)),
    }
}

/// Stable sort into a new vector; equal keys keep their input order in both
/// directions.
pub fn sort(transactions: &[Transaction], field: SortField, ascending: bool) -> Vec<Transaction> {
    let mut out = transactions.to_vec();
    out.sort_by(|a, b| {
        let ord = compare(a, b, field);
        if ascending { ord } else { ord.reverse() }
    });
    out
}
