// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::SearchError;
use crate::models::Transaction;
use regex::{Regex, RegexBuilder};

/// A compiled search pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    re: Regex,
}

impl Matcher {
    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }
}

/// `Ok(None)` means "no filtering" (blank pattern); `Err` means the pattern
/// does not compile and the caller should say so.
pub fn compile_matcher(pattern: &str, case_sensitive: bool) -> Result<Option<Matcher>, SearchError> {
    if pattern.trim().is_empty() {
        return Ok(None);
    }
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map(|re| Some(Matcher { re }))
        .map_err(|err| SearchError::InvalidPattern(err.to_string()))
}

/// Keep transactions whose description, category, date or canonical amount
/// matches. With no matcher the input comes back unchanged.
pub fn filter(transactions: &[Transaction], matcher: Option<&Matcher>) -> Vec<Transaction> {
    let Some(m) = matcher else {
        return transactions.to_vec();
    };
    transactions
        .iter()
        .filter(|tx| {
            m.is_match(&tx.description)
                || m.is_match(&tx.category)
                || m.is_match(&tx.date)
                || m.is_match(&tx.amount.normalize().to_string())
        })
        .cloned()
        .collect()
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape first, then wrap every non-empty match of the escaped text in
/// `<mark>`.
pub fn highlight(text: &str, matcher: Option<&Matcher>) -> String {
    let escaped = escape_html(text);
    let Some(m) = matcher else {
        return escaped;
    };

    let mut out = String::with_capacity(escaped.len() + 16);
    let mut last = 0;
    for found in m.re.find_iter(&escaped) {
        if found.as_str().is_empty() {
            continue;
        }
        out.push_str(&escaped[last..found.start()]);
        out.push_str("<mark>");
        out.push_str(found.as_str());
        out.push_str("</mark>");
        last = found.end();
    }
    out.push_str(&escaped[last..]);
    out
}
