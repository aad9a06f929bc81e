// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

/// A single ledger record. `amount` is always in the canonical unit (USD).
///
/// Field order here is the field order of exported JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: String, // YYYY-MM-DD, lexically validated
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Ksh,
    Rwf,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ksh => "KSH",
            Currency::Rwf => "RWF",
        }
    }

    /// Rate used whenever the stored one is missing or not positive.
    pub fn default_rate(&self) -> Decimal {
        match self {
            Currency::Usd => Decimal::ONE,
            Currency::Ksh => Decimal::new(130, 0),
            Currency::Rwf => Decimal::new(1300, 0),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "KSH" => Ok(Currency::Ksh),
            "RWF" => Ok(Currency::Rwf),
            other => Err(format!("Unsupported currency '{}' (use USD|KSH|RWF)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}' (use light|dark)", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

/// Largest accepted display rate (display units per USD).
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

fn default_ksh_rate() -> Decimal {
    Currency::Ksh.default_rate()
}

fn default_rwf_rate() -> Decimal {
    Currency::Rwf.default_rate()
}

/// Read one field, substituting `fallback()` when its stored value does not
/// decode. The rest of the document is unaffected.
fn recover<'de, D, T>(
    deserializer: D,
    field: &'static str,
    fallback: fn() -> T,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|err| {
        tracing::warn!(field, error = %err, "unreadable settings field, using default");
        fallback()
    }))
}

fn lenient_cap<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    recover(d, "cap", Decimal::default)
}

fn lenient_currency<'de, D: Deserializer<'de>>(d: D) -> Result<Currency, D::Error> {
    recover(d, "currency", Currency::default)
}

fn lenient_ksh_rate<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    recover(d, "kshRate", default_ksh_rate)
}

fn lenient_rwf_rate<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    recover(d, "rwfRate", default_rwf_rate)
}

fn lenient_theme<'de, D: Deserializer<'de>>(d: D) -> Result<Theme, D::Error> {
    recover(d, "theme", Theme::default)
}

/// User configuration. Every field falls back to its default on its own, so a
/// partially written or partly corrupt document still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_cap"
    )]
    pub cap: Decimal, // canonical unit, 0 = no cap
    #[serde(default, deserialize_with = "lenient_currency")]
    pub currency: Currency,
    #[serde(
        default = "default_ksh_rate",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_ksh_rate"
    )]
    pub ksh_rate: Decimal,
    #[serde(
        default = "default_rwf_rate",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_rwf_rate"
    )]
    pub rwf_rate: Decimal,
    #[serde(default, deserialize_with = "lenient_theme")]
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cap: Decimal::ZERO,
            currency: Currency::Usd,
            ksh_rate: default_ksh_rate(),
            rwf_rate: default_rwf_rate(),
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Conversion rate for `currency`, always in `(0, MAX_RATE]`.
    pub fn rate_for(&self, currency: Currency) -> Decimal {
        let stored = match currency {
            Currency::Usd => Decimal::ONE,
            Currency::Ksh => self.ksh_rate,
            Currency::Rwf => self.rwf_rate,
        };
        sanitize_rate(stored, currency)
    }

    /// Rate of the currently selected display currency.
    pub fn display_rate(&self) -> Decimal {
        self.rate_for(self.currency)
    }

    pub fn merged(&self, patch: SettingsPatch) -> Settings {
        let mut next = self.clone();
        if let Some(cap) = patch.cap {
            next.cap = cap;
        }
        if let Some(currency) = patch.currency {
            next.currency = currency;
        }
        if let Some(rate) = patch.ksh_rate {
            next.ksh_rate = sanitize_rate(rate, Currency::Ksh);
        }
        if let Some(rate) = patch.rwf_rate {
            next.rwf_rate = sanitize_rate(rate, Currency::Rwf);
        }
        if let Some(theme) = patch.theme {
            next.theme = theme;
        }
        next
    }
}

fn sanitize_rate(rate: Decimal, currency: Currency) -> Decimal {
    if rate > Decimal::ZERO && rate <= MAX_RATE {
        rate
    } else {
        currency.default_rate()
    }
}

/// Partial update for [`Settings`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub cap: Option<Decimal>,
    pub currency: Option<Currency>,
    pub ksh_rate: Option<Decimal>,
    pub rwf_rate: Option<Decimal>,
    pub theme: Option<Theme>,
}

/// Partial update for a [`Transaction`]. Amount is already canonical here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_fields_take_defaults() {
        let s: Settings = serde_json::from_str(r#"{"currency":"KSH"}"#).unwrap();
        assert_eq!(s.currency, Currency::Ksh);
        assert_eq!(s.ksh_rate, Decimal::new(130, 0));
        assert_eq!(s.rwf_rate, Decimal::new(1300, 0));
        assert_eq!(s.cap, Decimal::ZERO);
        assert_eq!(s.theme, Theme::Light);
    }

    #[test]
    fn non_positive_rate_falls_back() {
        let s = Settings {
            ksh_rate: Decimal::ZERO,
            rwf_rate: Decimal::new(-5, 0),
            ..Settings::default()
        };
        assert_eq!(s.rate_for(Currency::Ksh), Decimal::new(130, 0));
        assert_eq!(s.rate_for(Currency::Rwf), Decimal::new(1300, 0));
        assert_eq!(s.rate_for(Currency::Usd), Decimal::ONE);
    }

    #[test]
    fn out_of_range_rate_falls_back() {
        let s = Settings {
            ksh_rate: Decimal::MAX,
            ..Settings::default()
        };
        assert_eq!(s.rate_for(Currency::Ksh), Decimal::new(130, 0));

        let merged = Settings::default().merged(SettingsPatch {
            rwf_rate: Some(MAX_RATE + Decimal::ONE),
            ..SettingsPatch::default()
        });
        assert_eq!(merged.rwf_rate, Decimal::new(1300, 0));

        let at_limit = Settings::default().merged(SettingsPatch {
            ksh_rate: Some(MAX_RATE),
            ..SettingsPatch::default()
        });
        assert_eq!(at_limit.ksh_rate, MAX_RATE);
    }

    #[test]
    fn bad_settings_field_resets_alone() {
        let s: Settings = serde_json::from_str(
            r#"{"cap":50,"currency":"KSH","kshRate":"lots","rwfRate":900,"theme":"blue"}"#,
        )
        .unwrap();
        assert_eq!(s.cap, Decimal::new(50, 0));
        assert_eq!(s.currency, Currency::Ksh);
        assert_eq!(s.ksh_rate, Decimal::new(130, 0));
        assert_eq!(s.rwf_rate, Decimal::new(900, 0));
        assert_eq!(s.theme, Theme::Light);
    }

    #[test]
    fn settings_serialize_rates_as_numbers() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(
            json,
            r#"{"cap":0.0,"currency":"USD","kshRate":130.0,"rwfRate":1300.0,"theme":"light"}"#
        );
    }

    #[test]
    fn transaction_serializes_in_stable_order() {
        let ts = DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let tx = Transaction {
            id: "rec_0001".into(),
            kind: TxType::Expense,
            amount: Decimal::new(1250, 2),
            description: "Lunch".into(),
            category: "Food".into(),
            date: "2025-03-01".into(),
            created_at: ts,
            updated_at: ts,
        };
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.starts_with(r#"{"id":"rec_0001","type":"expense","amount":12.5,"description""#));
        assert!(json.contains(r#""createdAt":"2025-03-01T10:00:00Z""#));
    }
}
