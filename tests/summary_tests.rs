// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use pocketledger::models::{Currency, Settings, Transaction, TxType};
use pocketledger::period::ViewCursor;
use pocketledger::summary::{
    CapState, MAX_CHART_DAYS, aggregate, cap_progress, daily_expenses, in_month,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn tx(kind: TxType, amount: Decimal, date: &str) -> Transaction {
    let now = Utc::now();
    Transaction {
        id: format!("rec_{}", date),
        kind,
        amount,
        description: "Entry".into(),
        category: "General".into(),
        date: date.into(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn totals_and_savings_rate() {
    let txs = vec![
        tx(TxType::Income, dec!(2000), "2025-03-01"),
        tx(TxType::Expense, dec!(450.50), "2025-03-05"),
        tx(TxType::Expense, dec!(49.50), "2025-03-09"),
    ];
    let s = aggregate(&txs);
    assert_eq!(s.total_income, dec!(2000));
    assert_eq!(s.total_expenses, dec!(500));
    assert_eq!(s.balance, dec!(1500));
    assert_eq!(s.savings_rate, 75);
}

#[test]
fn no_income_means_zero_rate() {
    let txs = vec![tx(TxType::Expense, dec!(80), "2025-03-05")];
    let s = aggregate(&txs);
    assert_eq!(s.savings_rate, 0);
    assert_eq!(s.balance, dec!(-80));
    assert_eq!(aggregate(&Vec::<Transaction>::new()).savings_rate, 0);
}

#[test]
fn negative_savings_rate_rounds_half_up() {
    // (100 - 102.5) / 100 * 100 = -2.5 -> -2
    let txs = vec![
        tx(TxType::Income, dec!(100), "2025-03-01"),
        tx(TxType::Expense, dec!(102.5), "2025-03-02"),
    ];
    assert_eq!(aggregate(&txs).savings_rate, -2);
}

#[test]
fn cap_states() {
    let p = cap_progress(dec!(100), dec!(80)).unwrap();
    assert_eq!(p.percent, dec!(80));
    assert_eq!(p.state, CapState::Warn);
    assert_eq!(p.remaining, dec!(20));

    let p = cap_progress(dec!(100), dec!(120)).unwrap();
    assert_eq!(p.state, CapState::Over);
    assert_eq!(p.remaining, dec!(-20));
    assert_eq!(p.percent, dec!(100));

    let p = cap_progress(dec!(100), dec!(100)).unwrap();
    assert_eq!(p.state, CapState::Warn);

    let p = cap_progress(dec!(100), dec!(74.99)).unwrap();
    assert_eq!(p.state, CapState::Normal);

    assert!(cap_progress(Decimal::ZERO, dec!(5000)).is_none());
    assert!(cap_progress(dec!(-1), dec!(1)).is_none());
}

#[test]
fn tiny_cap_with_huge_spend_is_over() {
    let p = cap_progress(dec!(0.01), dec!(1000000000000000000000000000)).unwrap();
    assert_eq!(p.state, CapState::Over);
    assert_eq!(p.percent, dec!(100));
    assert!(p.remaining < Decimal::ZERO);
    assert_eq!(p.label(), "Over cap!");
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    let txs = vec![
        tx(TxType::Income, Decimal::MAX, "2025-03-01"),
        tx(TxType::Income, Decimal::MAX, "2025-03-02"),
    ];
    let s = aggregate(&txs);
    assert_eq!(s.total_income, Decimal::MAX);
    assert_eq!(s.savings_rate, 100);

    let txs = vec![
        tx(TxType::Income, dec!(0.01), "2025-03-01"),
        tx(TxType::Expense, dec!(1000000000000000000000000000), "2025-03-02"),
    ];
    let s = aggregate(&txs);
    assert!(s.balance < Decimal::ZERO);
    assert_eq!(s.savings_rate, i64::MIN);
}

#[test]
fn oversized_rate_still_renders() {
    let settings = Settings {
        currency: Currency::Ksh,
        ksh_rate: Decimal::MAX,
        ..Settings::default()
    };
    let p = cap_progress(dec!(100), dec!(40)).unwrap();
    assert_eq!(
        p.message(&settings),
        "You have KSH 7,800.00 remaining from your monthly cap."
    );
}

#[test]
fn cap_messages_use_display_currency() {
    let ksh = Settings {
        currency: Currency::Ksh,
        ..Settings::default()
    };
    let over = cap_progress(dec!(100), dec!(120)).unwrap();
    assert_eq!(
        over.message(&ksh),
        "You have exceeded your spending cap by KSH 2,600.00!"
    );
    let under = cap_progress(dec!(100), dec!(40)).unwrap();
    assert_eq!(
        under.message(&Settings::default()),
        "You have $ 60.00 remaining from your monthly cap."
    );
}

#[test]
fn month_selection_by_prefix() {
    let txs = vec![
        tx(TxType::Expense, dec!(1), "2025-01-31"),
        tx(TxType::Expense, dec!(2), "2025-02-01"),
        tx(TxType::Expense, dec!(3), "2025-02-30"),
        tx(TxType::Expense, dec!(4), "2024-02-10"),
    ];
    let feb = ViewCursor { year: 2025, month: 2 };
    let picked = in_month(&txs, &feb);
    assert_eq!(picked.len(), 2);
    assert_eq!(aggregate(picked).total_expenses, dec!(5));
}

#[test]
fn seven_day_series() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let txs = vec![
        tx(TxType::Expense, dec!(10), "2025-03-10"),
        tx(TxType::Expense, dec!(30), "2025-03-04"),
        tx(TxType::Income, dec!(500), "2025-03-08"),
        tx(TxType::Expense, dec!(99), "2025-03-03"),
    ];
    let series = daily_expenses(&txs, today, 7);
    assert_eq!(series.len(), 7);
    assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    assert_eq!(series[6].date, today);
    assert_eq!(series[0].expenses, dec!(30));
    assert_eq!(series[0].bar_height, dec!(100));
    assert_eq!(series[4].expenses, Decimal::ZERO);
    assert_eq!(series[6].expenses, dec!(10));

    let empty = daily_expenses(&[], today, 7);
    assert!(empty.iter().all(|d| d.bar_height.is_zero()));
}

#[test]
fn series_length_is_bounded() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let series = daily_expenses(&[], today, u64::MAX);
    assert_eq!(series.len() as u64, MAX_CHART_DAYS);
    assert_eq!(series.last().map(|d| d.date), Some(today));
}
