// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{Settings, Transaction};
use crate::money::display_money;
use crate::period::ViewCursor;
use crate::storage::Store;
use crate::summary::{CapProgress, Summary, aggregate, cap_progress, daily_expenses, in_month};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub month: String,
    pub label: String,
    pub currency: String,
    pub summary: Summary,
    pub cap: Option<CapProgress>,
    pub can_advance: bool,
}

/// Pick the period from `--month` or `--back`; the current month otherwise.
pub fn resolve_period(sub: &clap::ArgMatches, today: NaiveDate) -> Result<ViewCursor> {
    let current = ViewCursor::current(today);
    if let Some(raw) = sub.get_one::<String>("month") {
        let cursor = ViewCursor::parse(raw)?;
        if cursor > current {
            return Err(anyhow!("Month {} is in the future", cursor));
        }
        return Ok(cursor);
    }
    let back = sub.get_one::<u32>("back").copied().unwrap_or(0);
    Ok(current.back(back))
}

pub fn build_view(
    transactions: &[Transaction],
    settings: &Settings,
    period: ViewCursor,
    today: NaiveDate,
) -> DashboardView {
    let summary = aggregate(in_month(transactions, &period));
    DashboardView {
        month: period.key(),
        label: period.label(),
        currency: settings.currency.to_string(),
        summary,
        cap: cap_progress(settings.cap, summary.total_expenses),
        can_advance: period.can_advance(today),
    }
}

pub fn handle<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let period = resolve_period(sub, today)?;
    let settings = ledger.settings();
    let view = build_view(ledger.transactions(), settings, period, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }

    let s = &view.summary;
    let balance_note = if s.balance < Decimal::ZERO {
        " (deficit)"
    } else {
        ""
    };
    let mut rows = vec![
        vec!["Income".into(), display_money(s.total_income, settings)],
        vec!["Expenses".into(), display_money(s.total_expenses, settings)],
        vec![
            "Balance".into(),
            format!("{}{}", display_money(s.balance.abs(), settings), balance_note),
        ],
        vec!["Savings rate".into(), format!("{}%", s.savings_rate)],
    ];
    if let Some(ref cap) = view.cap {
        rows.push(vec![
            "Cap progress".into(),
            format!(
                "{} (spent {} of {})",
                cap.label(),
                display_money(cap.spent, settings),
                display_money(cap.cap, settings)
            ),
        ]);
    }
    println!("{}", view.label);
    println!("{}", pretty_table(&["", "Amount"], rows));
    if let Some(ref cap) = view.cap {
        println!("{}", cap.message(settings));
    }
    Ok(())
}

pub fn chart<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let days = sub.get_one::<u64>("days").copied().unwrap_or(7);
    let series = daily_expenses(ledger.transactions(), today, days);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    let settings = ledger.settings();
    let rows = series
        .iter()
        .map(|d| {
            // 20 cells for a full-height bar
            let cells = (d.bar_height / Decimal::new(5, 0))
                .round()
                .to_usize()
                .unwrap_or(0);
            vec![
                d.date.format("%a %Y-%m-%d").to_string(),
                display_money(d.expenses, settings),
                "#".repeat(cells),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Expenses", ""], rows));
    Ok(())
}
