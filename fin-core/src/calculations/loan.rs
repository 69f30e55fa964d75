//! Amortization schedule calculations for fixed-rate installment loans.
//!
//! This module implements the standard annuity amortization of a fixed-rate
//! loan, with optional extra monthly payments and a month-by-month schedule.
//!
//! # Calculation Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Monthly rate `r` = APR / 100 / 12 |
//! | 2    | Scheduled payment = `P·r(1+r)ⁿ / ((1+r)ⁿ − 1)`, or `P/n` when `r` = 0 |
//! | 3    | Each month: interest = balance × r, scheduled principal = payment − interest |
//! | 4    | Extra payment applies to principal after the scheduled portion |
//! | 5    | The final payment is capped so the balance never goes negative |
//! | 6    | Baseline (no-extra) totals come from the closed form for comparison |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fin_core::calculations::loan::{LoanInput, amortize};
//!
//! let input = LoanInput {
//!     principal: dec!(1200.00),
//!     annual_rate_pct: dec!(0),
//!     term_months: 12,
//!     extra_monthly: dec!(0),
//! };
//!
//! let schedule = amortize(&input).unwrap();
//!
//! assert_eq!(schedule.monthly_payment, dec!(100.00));
//! assert_eq!(schedule.months, 12);
//! assert_eq!(schedule.total_interest, dec!(0.00));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, round_half_up};

/// Hard cap on schedule length; anything longer is treated as non-convergent.
const MAX_SCHEDULE_MONTHS: u32 = 5000;

/// Errors that can occur when building an amortization schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    /// The loan principal must be greater than zero.
    #[error("loan amount must be greater than 0")]
    NonPositivePrincipal,

    /// The loan term must be at least one month.
    #[error("loan term must be at least one month")]
    NonPositiveTerm,

    /// The annual rate may not be negative.
    #[error("interest rate may not be negative")]
    NegativeRate,

    /// APR above 200% is rejected as an input mistake.
    #[error("interest rate looks unusually high; enter an APR below 200%")]
    RateTooHigh,

    /// Terms beyond 100 years are rejected as an input mistake.
    #[error("loan term looks unusually long; enter a term under 100 years")]
    TermTooLong,

    /// The extra monthly payment may not be negative.
    #[error("extra monthly payment may not be negative")]
    NegativeExtraPayment,

    /// The scheduled payment does not cover the first month's interest.
    #[error("the scheduled payment does not cover the monthly interest at this rate")]
    PaymentBelowInterest,

    /// The schedule failed to reach a zero balance within the month cap.
    #[error("amortization did not converge within {MAX_SCHEDULE_MONTHS} months")]
    DidNotConverge,
}

/// Input values for an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Decimal,

    /// Annual percentage rate, e.g. `6.5` for 6.5% APR.
    pub annual_rate_pct: Decimal,

    /// Scheduled term in months.
    pub term_months: u32,

    /// Additional principal paid every month on top of the scheduled payment.
    pub extra_monthly: Decimal,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number.
    pub month: u32,

    /// Total paid this month (scheduled payment plus extra, capped at payoff).
    pub payment: Decimal,

    /// Interest portion of this month's payment.
    pub interest: Decimal,

    /// Scheduled principal portion (excluding extra).
    pub principal: Decimal,

    /// Extra principal actually applied this month.
    pub extra: Decimal,

    /// Remaining balance after this month's payment.
    pub balance: Decimal,
}

/// Result of an amortization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSchedule {
    /// Scheduled monthly payment from the annuity formula.
    pub monthly_payment: Decimal,

    /// Month-by-month breakdown, one row per month actually paid.
    pub rows: Vec<ScheduleRow>,

    /// Months until the balance reached zero (with extra payments).
    pub months: u32,

    /// Total interest paid (with extra payments).
    pub total_interest: Decimal,

    /// Total of all payments made (with extra payments).
    pub total_paid: Decimal,

    /// Scheduled term without extra payments.
    pub baseline_months: u32,

    /// Interest that would be paid making only the scheduled payment.
    pub baseline_interest: Decimal,

    /// Months cut from the scheduled term by extra payments.
    pub months_saved: u32,

    /// Interest avoided compared to the scheduled-payment baseline.
    pub interest_saved: Decimal,
}

/// Computes the scheduled monthly payment for a loan.
///
/// Uses the standard annuity formula. When the rate is zero the payment is
/// simply the principal divided evenly over the term.
///
/// # Errors
///
/// Returns [`LoanError::DidNotConverge`] if the rate/term combination
/// overflows decimal arithmetic.
pub fn payment(
    principal: Decimal,
    monthly_rate: Decimal,
    term_months: u32,
) -> Result<Decimal, LoanError> {
    if monthly_rate.is_zero() {
        return Ok(round_half_up(principal / Decimal::from(term_months)));
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(term_months))
        .ok_or(LoanError::DidNotConverge)?;

    let raw = principal * monthly_rate * growth / (growth - Decimal::ONE);
    Ok(round_half_up(raw))
}

/// Builds the full amortization schedule for a loan.
///
/// This is the main entry point. It validates the input, derives the
/// scheduled payment, then walks the balance month by month applying any
/// extra payment to principal until the loan is cleared.
///
/// # Errors
///
/// Returns a [`LoanError`] when an input is out of range, when the derived
/// payment cannot cover the first month's interest, or when the schedule
/// fails to converge.
pub fn amortize(input: &LoanInput) -> Result<LoanSchedule, LoanError> {
    validate(input)?;

    let monthly_rate = input.annual_rate_pct / Decimal::from(1200);
    let scheduled = payment(input.principal, monthly_rate, input.term_months)?;

    if !monthly_rate.is_zero() && scheduled <= round_half_up(input.principal * monthly_rate) {
        return Err(LoanError::PaymentBelowInterest);
    }

    let mut balance = round_half_up(input.principal);
    let mut total_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut months = 0u32;
    let mut rows = Vec::new();

    while balance > Decimal::ZERO {
        if months >= MAX_SCHEDULE_MONTHS {
            return Err(LoanError::DidNotConverge);
        }
        months += 1;

        let interest = if monthly_rate.is_zero() {
            Decimal::ZERO
        } else {
            round_half_up(balance * monthly_rate)
        };

        let scheduled_principal = max(scheduled - interest, Decimal::ZERO);

        let mut extra = input.extra_monthly;
        let mut reduction = scheduled_principal + extra;
        let payment_this_month;

        if reduction >= balance {
            // Last payment: pay exactly what remains.
            reduction = balance;
            extra = max(reduction - scheduled_principal, Decimal::ZERO);
            payment_this_month = interest + reduction;
        } else {
            payment_this_month = scheduled + extra;
        }

        balance = round_half_up(balance - reduction);
        total_interest += interest;
        total_paid += payment_this_month;

        rows.push(ScheduleRow {
            month: months,
            payment: round_half_up(payment_this_month),
            interest,
            principal: round_half_up(scheduled_principal.min(reduction)),
            extra: round_half_up(extra),
            balance,
        });
    }

    let baseline_interest = max(
        round_half_up(scheduled * Decimal::from(input.term_months) - input.principal),
        Decimal::ZERO,
    );
    let months_saved = input.term_months.saturating_sub(months);
    let interest_saved = max(
        round_half_up(baseline_interest - total_interest),
        Decimal::ZERO,
    );

    Ok(LoanSchedule {
        monthly_payment: scheduled,
        rows,
        months,
        total_interest: round_half_up(total_interest),
        total_paid: round_half_up(total_paid),
        baseline_months: input.term_months,
        baseline_interest,
        months_saved,
        interest_saved,
    })
}

fn validate(input: &LoanInput) -> Result<(), LoanError> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanError::NonPositivePrincipal);
    }
    if input.term_months == 0 {
        return Err(LoanError::NonPositiveTerm);
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(LoanError::NegativeRate);
    }
    if input.annual_rate_pct > Decimal::from(200) {
        return Err(LoanError::RateTooHigh);
    }
    if input.term_months > 1200 {
        return Err(LoanError::TermTooLong);
    }
    if input.extra_monthly < Decimal::ZERO {
        return Err(LoanError::NegativeExtraPayment);
    }
    Ok(())
}
