// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Conversion between the canonical unit (USD) and the display currency.
//!
//! Amounts are stored canonical; these helpers are only called at input and
//! output boundaries.

use crate::models::{Currency, Settings};
use rust_decimal::Decimal;

/// Canonical amount -> amount in the selected display currency. Saturates at
/// the `Decimal` range.
pub fn to_display(amount: Decimal, settings: &Settings) -> Decimal {
    match settings.currency {
        Currency::Usd => amount,
        _ => amount.saturating_mul(settings.display_rate()),
    }
}

/// Display-currency amount (user input) -> canonical amount for storage.
pub fn to_canonical(amount: Decimal, settings: &Settings) -> Decimal {
    match settings.currency {
        Currency::Usd => amount,
        _ => saturating_div(amount, settings.display_rate()),
    }
}

/// `a / b`, clamped to `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
/// `b` must be non-zero.
pub fn saturating_div(a: Decimal, b: Decimal) -> Decimal {
    a.checked_div(b).unwrap_or_else(|| {
        if a.is_sign_negative() != b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

pub fn currency_symbol(currency: Currency) -> &'static str {
    match currency {
        Currency::Usd => "$ ",
        Currency::Ksh => "KSH ",
        Currency::Rwf => "RWF ",
    }
}

/// Two fixed decimals with comma thousands grouping: `1234.5` -> `1,234.50`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Symbol plus formatted display-currency value of a canonical amount.
pub fn display_money(amount: Decimal, settings: &Settings) -> String {
    format!(
        "{}{}",
        currency_symbol(settings.currency),
        format_amount(to_display(amount, settings))
    )
}
