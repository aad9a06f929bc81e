// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Field validators. Each one runs an ordered list of rules and reports the
//! first one that fails.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S(?:.*\S)?$").unwrap());
static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$").unwrap());
// Day-of-month is only range checked; 2025-02-30 passes.
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").unwrap()
});
static CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").unwrap());
// ASCII word characters only, so "café café" is not a repeat.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u:\w)+").unwrap());

struct Rule {
    check: fn(&str) -> bool,
    error: ValidationError,
}

fn run_rules(value: &str, rules: &[Rule]) -> Result<(), ValidationError> {
    for rule in rules {
        if !(rule.check)(value) {
            return Err(rule.error);
        }
    }
    Ok(())
}

fn not_blank(v: &str) -> bool {
    !v.trim().is_empty()
}

fn not_empty(v: &str) -> bool {
    !v.is_empty()
}

/// `None` for text that is not an amount or does not fit a `Decimal`.
fn amount_value(v: &str) -> Option<Decimal> {
    if AMOUNT_RE.is_match(v) {
        v.parse::<Decimal>().ok()
    } else {
        None
    }
}

/// True when two adjacent words, separated only by whitespace, are the same
/// word ignoring case ("the the", "Go\tgo").
pub fn has_repeated_word(text: &str) -> bool {
    let mut prev: Option<regex::Match<'_>> = None;
    for word in WORD_RE.find_iter(text) {
        if let Some(p) = prev {
            let gap = &text[p.end()..word.start()];
            if gap.chars().all(char::is_whitespace)
                && p.as_str().to_lowercase() == word.as_str().to_lowercase()
            {
                return true;
            }
        }
        prev = Some(word);
    }
    false
}

static DESCRIPTION_RULES: &[Rule] = &[
    Rule {
        check: not_blank,
        error: ValidationError::DescriptionRequired,
    },
    Rule {
        check: |v| DESCRIPTION_RE.is_match(v),
        error: ValidationError::DescriptionPadded,
    },
    Rule {
        check: |v| !has_repeated_word(v),
        error: ValidationError::DescriptionRepeatedWord,
    },
];

static AMOUNT_RULES: &[Rule] = &[
    Rule {
        check: not_empty,
        error: ValidationError::AmountRequired,
    },
    Rule {
        check: |v| AMOUNT_RE.is_match(v),
        error: ValidationError::AmountFormat,
    },
    Rule {
        check: |v| amount_value(v).is_some(),
        error: ValidationError::AmountTooLarge,
    },
    Rule {
        check: |v| amount_value(v).is_some_and(|d| d > Decimal::ZERO),
        error: ValidationError::AmountNotPositive,
    },
];

static DATE_RULES: &[Rule] = &[
    Rule {
        check: not_empty,
        error: ValidationError::DateRequired,
    },
    Rule {
        check: |v| DATE_RE.is_match(v),
        error: ValidationError::DateFormat,
    },
];

static CATEGORY_RULES: &[Rule] = &[
    Rule {
        check: not_empty,
        error: ValidationError::CategoryRequired,
    },
    Rule {
        check: |v| CATEGORY_RE.is_match(v),
        error: ValidationError::CategoryFormat,
    },
];

static CAP_RULES: &[Rule] = &[
    Rule {
        check: not_empty,
        error: ValidationError::CapRequired,
    },
    Rule {
        check: |v| amount_value(v).is_some_and(|d| d >= Decimal::ZERO),
        error: ValidationError::CapFormat,
    },
];

pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    run_rules(value, DESCRIPTION_RULES)
}

pub fn validate_amount(value: &str) -> Result<(), ValidationError> {
    run_rules(value, AMOUNT_RULES)
}

pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    run_rules(value, DATE_RULES)
}

pub fn validate_category(value: &str) -> Result<(), ValidationError> {
    run_rules(value, CATEGORY_RULES)
}

pub fn validate_cap(value: &str) -> Result<(), ValidationError> {
    run_rules(value, CAP_RULES)
}

/// Parse an amount or cap string that already passed validation.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    amount_value(value)
}

/// Shape check for an import payload: an array of objects, each carrying the
/// string fields `id`, `description`, `category`, `date`, `type` and a
/// numeric `amount`. A single bad element rejects the whole payload.
pub fn validate_import_data(data: &Value) -> bool {
    let Some(items) = data.as_array() else {
        return false;
    };
    items.iter().all(|item| {
        let Some(obj) = item.as_object() else {
            return false;
        };
        ["id", "description", "category", "date", "type"]
            .iter()
            .all(|k| obj.get(*k).is_some_and(Value::is_string))
            && obj.get("amount").is_some_and(Value::is_number)
    })
}
