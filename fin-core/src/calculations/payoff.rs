//! Revolving balance payoff simulation.
//!
//! This module answers the credit-card payoff question: given a balance, an
//! APR and a fixed monthly payment, how long until the balance clears and how
//! much interest accrues along the way. Optional levers are an extra monthly
//! amount and a one-time lump sum applied up front.
//!
//! # Simulation Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Lump sum reduces the balance before the first month |
//! | 2    | Each month interest accrues on the remaining balance |
//! | 3    | The payment covers interest first, then principal |
//! | 4    | A payment that cannot reduce the balance by a cent is an error |
//! | 5    | A baseline run without extras quantifies the savings |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fin_core::calculations::payoff::{PayoffInput, simulate};
//!
//! let input = PayoffInput {
//!     balance: dec!(1000.00),
//!     annual_rate_pct: dec!(0),
//!     monthly_payment: dec!(100.00),
//!     extra_monthly: dec!(0),
//!     lump_sum: dec!(0),
//!     start_date: None,
//! };
//!
//! let outcome = simulate(&input).unwrap();
//!
//! assert_eq!(outcome.months, 10);
//! assert_eq!(outcome.total_interest, dec!(0.00));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, round_half_up};
use crate::dates::add_months_clamped;

/// Practical payoff horizon: 100 years of months.
const MAX_PAYOFF_MONTHS: u32 = 1200;

/// Errors that can occur during a payoff simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayoffError {
    /// The starting balance must be greater than zero.
    #[error("balance must be greater than 0")]
    NonPositiveBalance,

    /// The APR may not be negative.
    #[error("APR may not be negative")]
    NegativeRate,

    /// The monthly payment must be greater than zero.
    #[error("monthly payment must be greater than 0")]
    NonPositivePayment,

    /// The extra monthly payment may not be negative.
    #[error("extra monthly payment may not be negative")]
    NegativeExtraPayment,

    /// The one-time extra payment may not be negative.
    #[error("one-time extra payment may not be negative")]
    NegativeLumpSum,

    /// The one-time extra payment may not exceed the balance.
    #[error("one-time extra payment cannot be greater than the current balance")]
    LumpSumExceedsBalance,

    /// The payment cannot reduce the balance at this APR.
    #[error("monthly payment is too small to reduce the balance; current monthly interest is {monthly_interest}")]
    PaymentTooSmall {
        /// Interest accrued in the month the payment stopped making progress.
        monthly_interest: Decimal,
    },

    /// The payoff did not complete within a practical timeframe.
    #[error("payoff exceeds a practical timeframe of {MAX_PAYOFF_MONTHS} months")]
    ExceedsHorizon,
}

/// Input values for a payoff simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffInput {
    /// Current balance owed.
    pub balance: Decimal,

    /// Annual percentage rate, e.g. `21.99`.
    pub annual_rate_pct: Decimal,

    /// Fixed payment made every month.
    pub monthly_payment: Decimal,

    /// Additional amount paid every month.
    pub extra_monthly: Decimal,

    /// One-time extra payment applied before the first month.
    pub lump_sum: Decimal,

    /// Anchor date for the projected payoff date, if the caller wants one.
    pub start_date: Option<NaiveDate>,
}

/// Totals for the no-extras comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffBaseline {
    /// Months to payoff with only the fixed monthly payment.
    pub months: u32,

    /// Interest paid with only the fixed monthly payment.
    pub total_interest: Decimal,
}

/// Result of a payoff simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffOutcome {
    /// Months until the balance reached zero.
    pub months: u32,

    /// Total interest accrued.
    pub total_interest: Decimal,

    /// Total paid: the full starting balance plus all interest.
    pub total_paid: Decimal,

    /// Projected payoff date when a start date was provided.
    pub payoff_date: Option<NaiveDate>,

    /// No-extras run, present only when the input actually used extras.
    pub baseline: Option<PayoffBaseline>,

    /// Months cut compared to the baseline (zero without extras).
    pub months_saved: u32,

    /// Interest avoided compared to the baseline (zero without extras).
    pub interest_saved: Decimal,
}

/// Runs the payoff simulation.
///
/// # Errors
///
/// Returns a [`PayoffError`] when an input is out of range, when the payment
/// cannot make progress against the accruing interest, or when payoff takes
/// longer than the 100-year horizon.
pub fn simulate(input: &PayoffInput) -> Result<PayoffOutcome, PayoffError> {
    validate(input)?;

    let (months, total_interest) = run(
        input.balance,
        input.annual_rate_pct,
        input.monthly_payment,
        input.extra_monthly,
        input.lump_sum,
    )?;

    let has_extras = input.extra_monthly > Decimal::ZERO || input.lump_sum > Decimal::ZERO;
    let baseline = if has_extras {
        let (base_months, base_interest) = run(
            input.balance,
            input.annual_rate_pct,
            input.monthly_payment,
            Decimal::ZERO,
            Decimal::ZERO,
        )?;
        Some(PayoffBaseline {
            months: base_months,
            total_interest: base_interest,
        })
    } else {
        None
    };

    let months_saved = baseline
        .as_ref()
        .map(|b| b.months.saturating_sub(months))
        .unwrap_or(0);
    let interest_saved = baseline
        .as_ref()
        .map(|b| max(b.total_interest - total_interest, Decimal::ZERO))
        .unwrap_or(Decimal::ZERO);

    let payoff_date = input
        .start_date
        .and_then(|start| add_months_clamped(start, months));

    Ok(PayoffOutcome {
        months,
        total_interest,
        total_paid: round_half_up(input.balance + total_interest),
        payoff_date,
        baseline,
        months_saved,
        interest_saved,
    })
}

/// Core month loop shared by the main and baseline runs.
fn run(
    balance: Decimal,
    annual_rate_pct: Decimal,
    monthly_payment: Decimal,
    extra_monthly: Decimal,
    lump_sum: Decimal,
) -> Result<(u32, Decimal), PayoffError> {
    let monthly_rate = annual_rate_pct / Decimal::from(1200);

    let mut remaining = round_half_up(balance - lump_sum);
    if remaining <= Decimal::ZERO {
        // The lump sum cleared the debt outright.
        return Ok((0, Decimal::ZERO));
    }

    let mut months = 0u32;
    let mut total_interest = Decimal::ZERO;

    while remaining > Decimal::ZERO {
        if months >= MAX_PAYOFF_MONTHS {
            return Err(PayoffError::ExceedsHorizon);
        }

        let interest = round_half_up(remaining * monthly_rate);
        let payment = monthly_payment + extra_monthly;

        // Progress requires at least one cent of principal reduction.
        if payment < interest + Decimal::new(1, 2) {
            return Err(PayoffError::PaymentTooSmall {
                monthly_interest: interest,
            });
        }

        total_interest += interest;

        let applied = payment.min(remaining + interest);
        let principal_reduction = max(applied - interest, Decimal::ZERO);
        remaining = round_half_up(remaining - principal_reduction);

        months += 1;
    }

    Ok((months, round_half_up(total_interest)))
}

fn validate(input: &PayoffInput) -> Result<(), PayoffError> {
    if input.balance <= Decimal::ZERO {
        return Err(PayoffError::NonPositiveBalance);
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(PayoffError::NegativeRate);
    }
    if input.monthly_payment <= Decimal::ZERO {
        return Err(PayoffError::NonPositivePayment);
    }
    if input.extra_monthly < Decimal::ZERO {
        return Err(PayoffError::NegativeExtraPayment);
    }
    if input.lump_sum < Decimal::ZERO {
        return Err(PayoffError::NegativeLumpSum);
    }
    if input.lump_sum > input.balance {
        return Err(PayoffError::LumpSumExceedsBalance);
    }
    Ok(())
}
