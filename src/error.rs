// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// A user-fixable problem with a single input field.
///
/// The `Display` text is the message shown next to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description is required.")]
    DescriptionRequired,
    #[error("Description cannot start or end with spaces.")]
    DescriptionPadded,
    #[error("Description contains a repeated word (e.g. \"the the\").")]
    DescriptionRepeatedWord,
    #[error("Amount is required.")]
    AmountRequired,
    #[error("Enter a valid amount (e.g. 12 or 12.50).")]
    AmountFormat,
    #[error("Amount must be greater than zero.")]
    AmountNotPositive,
    #[error("Amount is too large.")]
    AmountTooLarge,
    #[error("Date is required.")]
    DateRequired,
    #[error("Date must be in YYYY-MM-DD format.")]
    DateFormat,
    #[error("Category is required.")]
    CategoryRequired,
    #[error("Category can only contain letters, spaces, or hyphens.")]
    CategoryFormat,
    #[error("Please enter a spending cap.")]
    CapRequired,
    #[error("Cap must be a valid positive number.")]
    CapFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Invalid regex pattern.")]
    InvalidPattern(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read file. Make sure it is valid JSON.")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid file structure.")]
    InvalidStructure,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction '{0}' not found")]
    NotFound(String),
    #[error("Invalid transaction: {0}")]
    Invalid(#[from] crate::records::FieldErrors),
    #[error("Invalid spending cap: {0}")]
    InvalidCap(ValidationError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("could not encode stored document: {0}")]
    Encode(#[from] serde_json::Error),
}
