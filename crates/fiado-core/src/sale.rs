//! Daily sales and the duplicate-date policy.
//!
//! Several sale rows may legitimately share one calendar date; the day's
//! total is the sum across them. Recording onto an occupied date is therefore
//! ambiguous, and the ambiguity is reported as data ([`SaleOutcome`]) rather
//! than as an error — the caller decides and resubmits.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

// ─── Records ─────────────────────────────────────────────────────────────────

/// One recorded sales figure for a calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySale {
  pub sale_id: Uuid,
  pub date:    NaiveDate,
  pub amount:  f64,
  pub notes:   Option<String>,
}

/// Input to [`crate::store::LedgerStore::record_daily_sale`] and
/// [`crate::store::LedgerStore::update_daily_sale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
  pub date:   NaiveDate,
  pub amount: f64,
  pub notes:  Option<String>,
}

// ─── Duplicate-date policy ───────────────────────────────────────────────────

/// The caller's choice when a draft lands on a date that already has rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateResolution {
  /// Replace the first recorded row for the date in place, keeping its id
  /// and date.
  Overwrite,
  /// Keep existing rows and insert an independent additional one.
  RegisterAdditional,
}

/// Outcome of [`crate::store::LedgerStore::record_daily_sale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaleOutcome {
  /// The draft was written.
  Recorded { sale: DailySale },
  /// Rows already exist for the draft's date and no resolution was supplied.
  /// Nothing was written; resubmit with a [`DuplicateResolution`].
  NeedsResolution { existing: Vec<DailySale> },
}

// ─── Month filter ────────────────────────────────────────────────────────────

/// A calendar month, parsed from and rendered as `YYYY-MM`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct CalendarMonth {
  pub year:  i32,
  pub month: u32,
}

impl CalendarMonth {
  pub fn of(date: NaiveDate) -> Self {
    Self { year: date.year(), month: date.month() }
  }

  /// The month immediately before this one.
  pub fn pred(self) -> Self {
    if self.month == 1 {
      Self { year: self.year - 1, month: 12 }
    } else {
      Self { year: self.year, month: self.month - 1 }
    }
  }

  pub fn contains(self, date: NaiveDate) -> bool {
    date.year() == self.year && date.month() == self.month
  }
}

impl fmt::Display for CalendarMonth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:04}-{:02}", self.year, self.month)
  }
}

impl FromStr for CalendarMonth {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid =
      || Error::Validation(format!("invalid month {s:?}, expected YYYY-MM"));
    let (year, month) = s.split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
      return Err(invalid());
    }
    Ok(Self { year, month })
  }
}

impl From<CalendarMonth> for String {
  fn from(month: CalendarMonth) -> Self { month.to_string() }
}

impl TryFrom<String> for CalendarMonth {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn month_parses_and_renders() {
    let month: CalendarMonth = "2024-03".parse().unwrap();
    assert_eq!(month, CalendarMonth { year: 2024, month: 3 });
    assert_eq!(month.to_string(), "2024-03");
  }

  #[test]
  fn month_rejects_garbage() {
    assert!("2024".parse::<CalendarMonth>().is_err());
    assert!("2024-13".parse::<CalendarMonth>().is_err());
    assert!("2024-0".parse::<CalendarMonth>().is_err());
    assert!("march".parse::<CalendarMonth>().is_err());
  }

  #[test]
  fn pred_steps_across_year_boundary() {
    let jan = CalendarMonth { year: 2024, month: 1 };
    assert_eq!(jan.pred(), CalendarMonth { year: 2023, month: 12 });
  }

  #[test]
  fn contains_matches_only_same_month() {
    let month = CalendarMonth { year: 2024, month: 3 };
    assert!(month.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
    assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
  }
}
