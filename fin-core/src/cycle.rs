//! The payday-anchored 31-day budget cycle.
//!
//! The budget tracker divides time into cycles that start on the user's
//! payday and run for 31 days. Every daily spend entry belongs to exactly one
//! cycle, identified by the ISO date of the cycle's first day.

use chrono::{Datelike, Days, NaiveDate};

use crate::dates::last_day_of_month;

/// Payday used when the user has never chosen one.
pub const DEFAULT_PAYDAY: u32 = 25;

/// Fixed cycle length: the 31-day hard rule.
pub const CYCLE_DAYS: u64 = 31;

/// Clamps a payday into the valid 1..=31 range.
pub fn clamp_payday(day: u32) -> u32 {
    day.clamp(1, 31)
}

/// A single 31-day budget cycle, `start` and `end` both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCycle {
    start: NaiveDate,
    end: NaiveDate,
}

impl BudgetCycle {
    /// Returns the cycle that contains `today` for the given payday.
    ///
    /// If today is on or after this month's payday the cycle starts this
    /// month, otherwise it started on last month's payday. A payday beyond
    /// the length of a month falls on that month's last day (payday 31 in
    /// February starts the cycle on Feb 28/29).
    pub fn containing(
        payday: u32,
        today: NaiveDate,
    ) -> Self {
        let payday = clamp_payday(payday);

        let this_month = payday_date(today.year(), today.month(), payday);
        let start = if today >= this_month {
            this_month
        } else {
            let (year, month) = previous_month(today.year(), today.month());
            payday_date(year, month, payday)
        };

        Self::starting(start)
    }

    /// Returns the cycle that starts on the given date.
    pub fn starting(start: NaiveDate) -> Self {
        let end = start
            .checked_add_days(Days::new(CYCLE_DAYS - 1))
            .unwrap_or(start);
        Self { start, end }
    }

    /// First day of the cycle.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the cycle (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Stable persistence key for this cycle: the ISO date of its first day.
    pub fn key(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Whether the date falls inside the cycle.
    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        date >= self.start && date <= self.end
    }

    /// Zero-based index of the date within the cycle, if it belongs to it.
    pub fn day_index(
        &self,
        date: NaiveDate,
    ) -> Option<u32> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.start).num_days() as u32)
    }

    /// Iterates every day of the cycle in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// The payday date for a specific month, clamped to the month's last day.
fn payday_date(
    year: i32,
    month: u32,
    payday: u32,
) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, payday).unwrap_or_else(|| last_day_of_month(year, month))
}

fn previous_month(
    year: i32,
    month: u32,
) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // clamp_payday tests
    // =========================================================================

    #[test]
    fn clamp_payday_passes_valid_days() {
        assert_eq!(clamp_payday(1), 1);
        assert_eq!(clamp_payday(25), 25);
        assert_eq!(clamp_payday(31), 31);
    }

    #[test]
    fn clamp_payday_clamps_out_of_range() {
        assert_eq!(clamp_payday(0), 1);
        assert_eq!(clamp_payday(45), 31);
    }

    // =========================================================================
    // containing tests
    // =========================================================================

    #[test]
    fn containing_on_or_after_payday_starts_this_month() {
        let cycle = BudgetCycle::containing(25, date(2025, 6, 26));

        assert_eq!(cycle.start(), date(2025, 6, 25));
        assert_eq!(cycle.end(), date(2025, 7, 25));
    }

    #[test]
    fn containing_exactly_on_payday_starts_this_month() {
        let cycle = BudgetCycle::containing(25, date(2025, 6, 25));

        assert_eq!(cycle.start(), date(2025, 6, 25));
    }

    #[test]
    fn containing_before_payday_starts_last_month() {
        let cycle = BudgetCycle::containing(25, date(2025, 6, 24));

        assert_eq!(cycle.start(), date(2025, 5, 25));
        assert_eq!(cycle.end(), date(2025, 6, 24));
    }

    #[test]
    fn containing_crosses_year_boundary() {
        let cycle = BudgetCycle::containing(25, date(2026, 1, 10));

        assert_eq!(cycle.start(), date(2025, 12, 25));
    }

    #[test]
    fn containing_clamps_payday_to_short_month() {
        // Payday 31 in mid-March anchors to February's last day.
        let cycle = BudgetCycle::containing(31, date(2025, 3, 15));

        assert_eq!(cycle.start(), date(2025, 2, 28));
    }

    #[test]
    fn containing_clamps_payday_in_leap_february() {
        let cycle = BudgetCycle::containing(30, date(2024, 2, 29));

        assert_eq!(cycle.start(), date(2024, 2, 29));
    }

    // =========================================================================
    // cycle shape tests
    // =========================================================================

    #[test]
    fn cycle_spans_exactly_31_days() {
        let cycle = BudgetCycle::starting(date(2025, 1, 25));

        assert_eq!(cycle.days().count(), 31);
        assert_eq!(cycle.end(), date(2025, 2, 24));
    }

    #[test]
    fn key_is_iso_date_of_start() {
        let cycle = BudgetCycle::starting(date(2025, 6, 25));

        assert_eq!(cycle.key(), "2025-06-25");
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let cycle = BudgetCycle::starting(date(2025, 6, 25));

        assert!(cycle.contains(date(2025, 6, 25)));
        assert!(cycle.contains(date(2025, 7, 25)));
        assert!(!cycle.contains(date(2025, 6, 24)));
        assert!(!cycle.contains(date(2025, 7, 26)));
    }

    #[test]
    fn day_index_counts_from_zero() {
        let cycle = BudgetCycle::starting(date(2025, 6, 25));

        assert_eq!(cycle.day_index(date(2025, 6, 25)), Some(0));
        assert_eq!(cycle.day_index(date(2025, 6, 30)), Some(5));
        assert_eq!(cycle.day_index(date(2025, 7, 25)), Some(30));
        assert_eq!(cycle.day_index(date(2025, 8, 1)), None);
    }
}
