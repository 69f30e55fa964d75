//! Calendar arithmetic shared by the scheduling calculators.
//!
//! Covers clamped month addition (payoff dates), business-day counting with
//! an optional holiday list, and the tolerant holiday-list parser used by the
//! CLI.

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use regex::Regex;
use thiserror::Error;

/// Errors produced by date-range calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// The end date precedes the start date.
    #[error("end date is before start date")]
    EndBeforeStart,
}

/// Adds `months` calendar months to `date`, clamping to the last day of the
/// target month when the day does not exist there (Jan 31 + 1 month is
/// Feb 28/29).
///
/// Returns `None` only when the result falls outside chrono's representable
/// range, which no realistic payoff horizon reaches.
pub fn add_months_clamped(
    date: NaiveDate,
    months: u32,
) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Returns the last day of the given month.
pub fn last_day_of_month(
    year: i32,
    month: u32,
) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    // The first of a month always exists; its predecessor is the last day of
    // the month before it.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Counts business days (Monday through Friday) in the inclusive range
/// `[start, end]`, excluding any date listed in `holidays`.
///
/// # Errors
///
/// Returns [`DateRangeError::EndBeforeStart`] when `end < start`.
pub fn business_days_between(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HashSet<NaiveDate>,
) -> Result<u32, DateRangeError> {
    if end < start {
        return Err(DateRangeError::EndBeforeStart);
    }

    let count = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !is_weekend(*d) && !holidays.contains(d))
        .count();

    Ok(count as u32)
}

/// Whether the date falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parses a comma- or newline-separated holiday list.
///
/// Only tokens in strict `YYYY-MM-DD` form naming a real calendar date are
/// accepted; everything else is silently skipped so a sloppy list still
/// yields the valid entries.
pub fn parse_holiday_set(raw: &str) -> HashSet<NaiveDate> {
    static ISO_DATE: OnceLock<Regex> = OnceLock::new();
    let pattern = ISO_DATE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern")
    });

    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|token| pattern.is_match(token))
        .filter_map(|token| NaiveDate::parse_from_str(token, "%Y-%m-%d").ok())
        .collect()
}
