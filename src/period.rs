// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The month shown on the dashboard. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewCursor {
    pub year: i32,
    pub month: u32,
}

impl ViewCursor {
    pub fn current(today: NaiveDate) -> ViewCursor {
        ViewCursor {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<ViewCursor> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid month '{}', expected YYYY-MM", s))?;
        let year: i32 = y
            .parse()
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        let month: u32 = m
            .parse()
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        if y.len() != 4 || m.len() != 2 || !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month '{}', expected YYYY-MM", s));
        }
        Ok(ViewCursor { year, month })
    }

    /// One month back. There is no lower bound.
    pub fn prev(self) -> ViewCursor {
        if self.month == 1 {
            ViewCursor {
                year: self.year - 1,
                month: 12,
            }
        } else {
            ViewCursor {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// `months` months back, clamped at the earliest representable year.
    pub fn back(self, months: u32) -> ViewCursor {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 - i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).unwrap_or(i32::MIN);
        ViewCursor {
            year,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// One month forward, unless that would pass the real current month.
    /// Returns the cursor and whether it moved.
    pub fn next(self, today: NaiveDate) -> (ViewCursor, bool) {
        if !self.can_advance(today) {
            return (self, false);
        }
        let moved = if self.month == 12 {
            ViewCursor {
                year: self.year + 1,
                month: 1,
            }
        } else {
            ViewCursor {
                year: self.year,
                month: self.month + 1,
            }
        };
        (moved, true)
    }

    pub fn can_advance(&self, today: NaiveDate) -> bool {
        *self < ViewCursor::current(today)
    }

    /// `YYYY-MM`, the prefix shared by every date in the period.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn contains(&self, date: &str) -> bool {
        date.get(..7) == Some(self.key().as_str())
    }

    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for ViewCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn prev_wraps_year() {
        let c = ViewCursor { year: 2025, month: 1 };
        assert_eq!(c.prev(), ViewCursor { year: 2024, month: 12 });
    }

    #[test]
    fn back_matches_repeated_prev() {
        let c = ViewCursor { year: 2025, month: 3 };
        assert_eq!(c.back(0), c);
        assert_eq!(c.back(3), c.prev().prev().prev());
        assert_eq!(c.back(27), ViewCursor { year: 2022, month: 12 });
        let far = c.back(u32::MAX);
        assert!(far < c);
        assert!((1..=12).contains(&far.month));
    }

    #[test]
    fn next_stops_at_current_month() {
        let today = day(2025, 3, 14);
        let c = ViewCursor::current(today);
        assert_eq!(c.next(today), (c, false));

        let back = c.prev().prev();
        let (one, moved) = back.next(today);
        assert!(moved);
        assert_eq!(one, ViewCursor { year: 2025, month: 2 });
        let (two, _) = one.next(today);
        assert_eq!(two, c);
    }

    #[test]
    fn parse_and_label() {
        let c = ViewCursor::parse("2024-12").unwrap();
        assert_eq!(c.label(), "December 2024");
        assert!(c.contains("2024-12-31"));
        assert!(!c.contains("2024-11-30"));
        assert!(ViewCursor::parse("2024-13").is_err());
        assert!(ViewCursor::parse("24-1").is_err());
    }
}
