//! 50/30/20 budget rule allocation.
//!
//! Splits a monthly income into needs / wants / savings buckets. Income in
//! other pay periods is normalized to a monthly figure first, and a partial
//! set of percentages is completed from the defaults (or auto-balanced when
//! exactly one of the three is missing).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fin_core::calculations::budget_split::{IncomePeriod, SplitInput, split};
//!
//! let input = SplitInput {
//!     income: dec!(3000.00),
//!     period: IncomePeriod::Monthly,
//!     needs_pct: None,
//!     wants_pct: None,
//!     savings_pct: None,
//! };
//!
//! let result = split(&input).unwrap();
//!
//! assert_eq!(result.needs, dec!(1500.00));
//! assert_eq!(result.wants, dec!(900.00));
//! assert_eq!(result.savings, dec!(600.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;

/// Errors that can occur when computing a budget split.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    /// The income amount must be greater than zero.
    #[error("income amount must be greater than 0")]
    NonPositiveIncome,

    /// A percentage may not be negative.
    #[error("{field} percentage may not be negative")]
    NegativePercent { field: &'static str },

    /// The three percentages must add up to 100.
    #[error("percentages must add up to 100%, got {total}%")]
    PercentsDoNotSum { total: Decimal },
}

/// How often the entered income amount arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomePeriod {
    Weekly,
    Fortnightly,
    Monthly,
    Annual,
}

impl IncomePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Fortnightly => "fortnightly",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Self::Weekly),
            "fortnightly" => Some(Self::Fortnightly),
            "monthly" => Some(Self::Monthly),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Converts an amount in this period to its monthly equivalent
    /// (52 weeks or 26 fortnights spread over 12 months).
    pub fn to_monthly(
        &self,
        amount: Decimal,
    ) -> Decimal {
        let twelve = Decimal::from(12);
        match self {
            Self::Weekly => amount * Decimal::from(52) / twelve,
            Self::Fortnightly => amount * Decimal::from(26) / twelve,
            Self::Monthly => amount,
            Self::Annual => amount / twelve,
        }
    }
}

/// Input for a budget split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInput {
    /// Income amount in the given period.
    pub income: Decimal,

    /// Pay period of the income amount.
    pub period: IncomePeriod,

    /// Needs share; `None` falls back to 50 (or is auto-balanced).
    pub needs_pct: Option<Decimal>,

    /// Wants share; `None` falls back to 30 (or is auto-balanced).
    pub wants_pct: Option<Decimal>,

    /// Savings/debt share; `None` falls back to 20 (or is auto-balanced).
    pub savings_pct: Option<Decimal>,
}

/// The resolved percentage split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPercents {
    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,
}

/// Result of a budget split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSplit {
    /// Income normalized to a monthly figure.
    pub monthly_income: Decimal,

    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,

    /// The percentages the amounts were derived from.
    pub percents: SplitPercents,
}

const DEFAULT_NEEDS: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const DEFAULT_WANTS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const DEFAULT_SAVINGS: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Computes the budget split.
///
/// When no percentages are supplied the 50/30/20 defaults apply. When some
/// are supplied, missing values fill from the defaults, except that exactly
/// one missing value is auto-balanced so the three reach 100.
///
/// # Errors
///
/// Returns a [`SplitError`] for a non-positive income, a negative
/// percentage, or a final split that does not sum to 100.
pub fn split(input: &SplitInput) -> Result<BudgetSplit, SplitError> {
    if input.income <= Decimal::ZERO {
        return Err(SplitError::NonPositiveIncome);
    }

    let percents = resolve_percents(input)?;

    let total = percents.needs + percents.wants + percents.savings;
    if (total - Decimal::ONE_HUNDRED).abs() > Decimal::new(1, 4) {
        return Err(SplitError::PercentsDoNotSum { total });
    }

    let monthly_income = input.period.to_monthly(input.income);
    let share = |pct: Decimal| round_half_up(monthly_income * pct / Decimal::ONE_HUNDRED);

    Ok(BudgetSplit {
        monthly_income: round_half_up(monthly_income),
        needs: share(percents.needs),
        wants: share(percents.wants),
        savings: share(percents.savings),
        percents,
    })
}

fn resolve_percents(input: &SplitInput) -> Result<SplitPercents, SplitError> {
    let mut needs = input.needs_pct.unwrap_or(DEFAULT_NEEDS);
    let mut wants = input.wants_pct.unwrap_or(DEFAULT_WANTS);
    let mut savings = input.savings_pct.unwrap_or(DEFAULT_SAVINGS);

    // With exactly one value missing, balance it so the split reaches 100.
    let provided = [input.needs_pct, input.wants_pct, input.savings_pct]
        .iter()
        .filter(|p| p.is_some())
        .count();
    if provided == 2 {
        if input.needs_pct.is_none() {
            needs = Decimal::ONE_HUNDRED - wants - savings;
        } else if input.wants_pct.is_none() {
            wants = Decimal::ONE_HUNDRED - needs - savings;
        } else {
            savings = Decimal::ONE_HUNDRED - needs - wants;
        }
    }

    for (value, field) in [(needs, "needs"), (wants, "wants"), (savings, "savings")] {
        if value < Decimal::ZERO {
            return Err(SplitError::NegativePercent { field });
        }
    }

    Ok(SplitPercents {
        needs,
        wants,
        savings,
    })
}
