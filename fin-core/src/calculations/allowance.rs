//! Rolling daily allowance for the budget tracker.
//!
//! Money left after fixed expenses is spread evenly over the 31-day cycle
//! (whole units, rounded up). Underspending a day carries the remainder
//! forward; overspending borrows from the days ahead. The carry chain is
//! recomputed from the cycle start every time, so a corrected entry in the
//! past automatically reflows every later day.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::ceil_whole;
use crate::cycle::{BudgetCycle, CYCLE_DAYS};

/// Allowance state of one day in the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAllowance {
    /// What may be spent this day: the base allowance plus carry-over.
    pub allowance: Decimal,

    /// What was actually spent this day.
    pub spent: Decimal,

    /// Carry-over after this day: previous carry + (base − spent).
    pub carry_after: Decimal,
}

/// The base daily allowance: the variable pool spread over 31 days,
/// rounded up to whole units.
pub fn base_daily(
    income_total: Decimal,
    fixed_total: Decimal,
) -> Decimal {
    ceil_whole((income_total - fixed_total) / Decimal::from(CYCLE_DAYS))
}

/// Total spend recorded for one date.
pub fn day_spend(
    spend_by_date: &HashMap<NaiveDate, Decimal>,
    date: NaiveDate,
) -> Decimal {
    spend_by_date.get(&date).copied().unwrap_or(Decimal::ZERO)
}

/// Computes the allowance state for one day of the cycle.
///
/// Returns `None` for dates outside the cycle. The carry before the cycle's
/// first day is zero; every day after that carries forward
/// `base − spent` from each preceding day.
pub fn allowance_for(
    cycle: &BudgetCycle,
    base: Decimal,
    spend_by_date: &HashMap<NaiveDate, Decimal>,
    date: NaiveDate,
) -> Option<DayAllowance> {
    let index = cycle.day_index(date)?;

    let mut carry_before = Decimal::ZERO;
    for day in cycle.days().take(index as usize) {
        carry_before += base - day_spend(spend_by_date, day);
    }

    let spent = day_spend(spend_by_date, date);

    Some(DayAllowance {
        allowance: base + carry_before,
        spent,
        carry_after: carry_before + (base - spent),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_cycle() -> BudgetCycle {
        BudgetCycle::starting(date(2025, 6, 25))
    }

    // =========================================================================
    // base_daily tests
    // =========================================================================

    #[test]
    fn base_daily_divides_pool_over_31_days() {
        assert_eq!(base_daily(dec!(3100), dec!(0)), dec!(100));
        assert_eq!(base_daily(dec!(1000), dec!(690)), dec!(10));
    }

    #[test]
    fn base_daily_rounds_up_to_whole_units() {
        // 1000 / 31 = 32.25..., rounded up.
        assert_eq!(base_daily(dec!(1000), dec!(0)), dec!(33));
    }

    #[test]
    fn base_daily_negative_pool_stays_negative() {
        // Fixed expenses above income leave a negative pool: ceil(-100/31).
        assert_eq!(base_daily(dec!(900), dec!(1000)), dec!(-3));
    }

    // =========================================================================
    // allowance_for tests
    // =========================================================================

    #[test]
    fn first_day_has_no_carry() {
        let cycle = test_cycle();
        let spend = HashMap::new();

        let day = allowance_for(&cycle, dec!(100), &spend, date(2025, 6, 25)).unwrap();

        assert_eq!(day.allowance, dec!(100));
        assert_eq!(day.spent, dec!(0));
        assert_eq!(day.carry_after, dec!(100));
    }

    #[test]
    fn underspending_carries_forward() {
        let cycle = test_cycle();
        let mut spend = HashMap::new();
        spend.insert(date(2025, 6, 25), dec!(40));

        let day = allowance_for(&cycle, dec!(100), &spend, date(2025, 6, 26)).unwrap();

        assert_eq!(day.allowance, dec!(160));
    }

    #[test]
    fn overspending_borrows_from_later_days() {
        let cycle = test_cycle();
        let mut spend = HashMap::new();
        spend.insert(date(2025, 6, 25), dec!(40)); // +60 carried
        spend.insert(date(2025, 6, 26), dec!(200)); // -100 this day

        let day26 = allowance_for(&cycle, dec!(100), &spend, date(2025, 6, 26)).unwrap();
        assert_eq!(day26.allowance, dec!(160));
        assert_eq!(day26.carry_after, dec!(-40));

        let day27 = allowance_for(&cycle, dec!(100), &spend, date(2025, 6, 27)).unwrap();
        assert_eq!(day27.allowance, dec!(60));
    }

    #[test]
    fn editing_an_earlier_day_reflows_later_days() {
        let cycle = test_cycle();
        let mut spend = HashMap::new();
        spend.insert(date(2025, 6, 25), dec!(100));

        let before = allowance_for(&cycle, dec!(100), &spend, date(2025, 6, 28)).unwrap();
        assert_eq!(before.allowance, dec!(100));

        // Correct the first day downward; three untouched days follow it.
        spend.insert(date(2025, 6, 25), dec!(10));
        let after = allowance_for(&cycle, dec!(100), &spend, date(2025, 6, 28)).unwrap();
        assert_eq!(after.allowance, dec!(190));
    }

    #[test]
    fn dates_outside_cycle_have_no_allowance() {
        let cycle = test_cycle();
        let spend = HashMap::new();

        assert_eq!(allowance_for(&cycle, dec!(100), &spend, date(2025, 6, 24)), None);
        assert_eq!(allowance_for(&cycle, dec!(100), &spend, date(2025, 8, 1)), None);
    }

    #[test]
    fn last_cycle_day_accumulates_full_carry() {
        let cycle = test_cycle();
        let spend = HashMap::new();

        let last = allowance_for(&cycle, dec!(10), &spend, cycle.end()).unwrap();

        // 30 untouched days carry 10 each into the final day.
        assert_eq!(last.allowance, dec!(310));
    }
}
