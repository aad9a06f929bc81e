// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{Currency, MAX_RATE, SettingsPatch, Theme};
use crate::money::display_money;
use crate::storage::Store;
use crate::utils::{arg, maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;

pub fn handle<S: Store>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ledger, sub)?,
        Some(("cap", sub)) => {
            let raw = arg(sub, "amount")?.trim().to_string();
            let settings = ledger.set_cap(&raw)?;
            if settings.cap.is_zero() {
                println!("Spending cap disabled");
            } else {
                println!("Spending cap saved: {}", display_money(settings.cap, settings));
            }
        }
        Some(("currency", sub)) => {
            let patch = currency_patch(sub)?;
            let settings = ledger.update_settings(patch)?;
            println!(
                "Currency settings saved: {} (KSH rate {}, RWF rate {})",
                settings.currency, settings.ksh_rate, settings.rwf_rate
            );
        }
        Some(("theme", sub)) => {
            let theme: Theme = arg(sub, "theme")?.parse().map_err(|e: String| anyhow!(e))?;
            ledger.update_settings(SettingsPatch {
                theme: Some(theme),
                ..SettingsPatch::default()
            })?;
            println!("Theme set to {}", theme);
        }
        _ => {}
    }
    Ok(())
}

fn parse_rate(sub: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>> {
    let Some(raw) = sub.get_one::<String>(name) else {
        return Ok(None);
    };
    let rate = raw
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid rate '{}'", raw))?;
    if rate > MAX_RATE {
        return Err(anyhow!("Rate {} is too large (at most {})", rate, MAX_RATE));
    }
    Ok(Some(rate))
}

/// Rates that are zero or negative are replaced by the currency default when
/// merged into the settings. Rates above `MAX_RATE` are rejected.
pub fn currency_patch(sub: &clap::ArgMatches) -> Result<SettingsPatch> {
    let currency = sub
        .get_one::<String>("currency")
        .map(|s| s.parse::<Currency>().map_err(|e| anyhow!(e)))
        .transpose()?;
    Ok(SettingsPatch {
        currency,
        ksh_rate: parse_rate(sub, "ksh_rate")?,
        rwf_rate: parse_rate(sub, "rwf_rate")?,
        ..SettingsPatch::default()
    })
}

fn show<S: Store>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let settings = ledger.settings();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), settings)? {
        return Ok(());
    }
    let cap = if settings.cap.is_zero() {
        "none".to_string()
    } else {
        display_money(settings.cap, settings)
    };
    let rows = vec![
        vec!["Spending cap".to_string(), cap],
        vec!["Currency".to_string(), settings.currency.to_string()],
        vec!["KSH rate".to_string(), settings.rate_for(Currency::Ksh).to_string()],
        vec!["RWF rate".to_string(), settings.rate_for(Currency::Rwf).to_string()],
        vec!["Theme".to_string(), settings.theme.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
