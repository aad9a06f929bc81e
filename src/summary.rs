// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period totals, savings rate, spending cap progress and the daily expense
//! series. Everything here works in the canonical unit.

use crate::models::{Settings, Transaction, TxType};
use crate::money::{display_money, saturating_div};
use crate::period::ViewCursor;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

const WARN_PERCENT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
/// Longest daily expense series `daily_expenses` will build.
pub const MAX_CHART_DAYS: u64 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub savings_rate: i64,
}

/// JavaScript-style rounding: halves go toward positive infinity. Values
/// beyond the `i64` range clamp to its ends.
fn round_half_up(v: Decimal) -> i64 {
    let rounded = v.saturating_add(Decimal::new(5, 1)).floor();
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// `part / whole * 100`, saturating. `whole` must be non-zero.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    saturating_div(part, whole).saturating_mul(HUNDRED)
}

pub fn aggregate<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for tx in transactions {
        match tx.kind {
            TxType::Income => total_income = total_income.saturating_add(tx.amount),
            TxType::Expense => total_expenses = total_expenses.saturating_add(tx.amount),
        }
    }
    let balance = total_income.saturating_sub(total_expenses);
    let savings_rate = if total_income > Decimal::ZERO {
        round_half_up(percent_of(balance, total_income))
    } else {
        0
    };
    Summary {
        total_income,
        total_expenses,
        balance,
        savings_rate,
    }
}

/// Transactions dated inside `period`, matched on the `YYYY-MM` prefix.
pub fn in_month<'a>(transactions: &'a [Transaction], period: &ViewCursor) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| period.contains(&tx.date))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapState {
    Normal,
    Warn,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapProgress {
    pub cap: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent: Decimal,
    pub state: CapState,
}

impl CapProgress {
    /// Percent label: "Over cap!" or a whole percentage.
    pub fn label(&self) -> String {
        match self.state {
            CapState::Over => "Over cap!".to_string(),
            _ => format!("{}%", round_half_up(self.percent)),
        }
    }

    pub fn message(&self, settings: &Settings) -> String {
        match self.state {
            CapState::Over => format!(
                "You have exceeded your spending cap by {}!",
                display_money(self.remaining.abs(), settings)
            ),
            _ => format!(
                "You have {} remaining from your monthly cap.",
                display_money(self.remaining, settings)
            ),
        }
    }
}

/// `None` when no cap is set (cap <= 0).
pub fn cap_progress(cap: Decimal, total_expenses: Decimal) -> Option<CapProgress> {
    if cap <= Decimal::ZERO {
        return None;
    }
    let remaining = cap.saturating_sub(total_expenses);
    let percent = percent_of(total_expenses, cap).min(HUNDRED);
    let state = if total_expenses > cap {
        CapState::Over
    } else if percent >= WARN_PERCENT {
        CapState::Warn
    } else {
        CapState::Normal
    };
    Some(CapProgress {
        cap,
        spent: total_expenses,
        remaining,
        percent,
        state,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub expenses: Decimal,
    /// Bar height as a percentage of the largest day.
    pub bar_height: Decimal,
}

/// Expense totals for the `days` calendar days ending at `today`, oldest first.
/// At most `MAX_CHART_DAYS` days are produced.
pub fn daily_expenses(transactions: &[Transaction], today: NaiveDate, days: u64) -> Vec<DailyTotal> {
    let dates: Vec<NaiveDate> = (0..days.min(MAX_CHART_DAYS))
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .collect();

    let totals: Vec<Decimal> = dates
        .iter()
        .map(|d| {
            let key = d.format("%Y-%m-%d").to_string();
            transactions
                .iter()
                .filter(|tx| tx.kind == TxType::Expense && tx.date == key)
                .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.amount))
        })
        .collect();

    let max = totals.iter().copied().max().unwrap_or(Decimal::ZERO);
    let max = if max.is_zero() { Decimal::ONE } else { max };

    dates
        .into_iter()
        .zip(totals)
        .map(|(date, expenses)| DailyTotal {
            date,
            expenses,
            bar_height: percent_of(expenses, max),
        })
        .collect()
}
