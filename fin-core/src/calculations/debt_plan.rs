//! Multi-debt repayment plan simulation (snowball / avalanche).
//!
//! This module simulates paying down a set of debts month by month. Every
//! month interest accrues, each debt receives its minimum payment, and the
//! pooled extra amount is directed at a single target debt chosen by the
//! selected strategy. When a debt is cleared, its minimum payment rolls into
//! the pool for all following months.
//!
//! # Simulation Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Accrue one month of interest on every active debt |
//! | 2    | Pay each active debt's minimum, capped at its balance |
//! | 3    | Direct extra + rolled-over minimums at the strategy target |
//! | 4    | A cleared target cascades the remaining extra to the next target |
//! | 5    | Minimums of cleared debts roll over from the following month |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fin_core::calculations::debt_plan::{PlanInput, Strategy, simulate};
//! use fin_core::models::DebtAccount;
//!
//! let input = PlanInput {
//!     debts: vec![
//!         DebtAccount {
//!             name: "Card".into(),
//!             balance: dec!(300.00),
//!             apr_pct: dec!(0),
//!             min_payment: dec!(100.00),
//!         },
//!         DebtAccount {
//!             name: "Loan".into(),
//!             balance: dec!(1000.00),
//!             apr_pct: dec!(0),
//!             min_payment: dec!(100.00),
//!         },
//!     ],
//!     extra_monthly: dec!(100.00),
//!     strategy: Strategy::Snowball,
//! };
//!
//! let plan = simulate(&input).unwrap();
//!
//! assert_eq!(plan.months, 5);
//! assert_eq!(plan.payoff_order[0].name, "Card");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::DebtAccount;

/// Longest plan the simulation will follow before giving up.
pub const MAX_PLAN_MONTHS: u32 = 1200;

/// How many leading months the plan keeps as a detailed preview.
const PREVIEW_MONTHS: u32 = 12;

/// Errors that can occur when simulating a repayment plan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    /// No debt with a positive balance was supplied.
    #[error("enter at least one debt balance greater than 0")]
    NoDebts,

    /// A debt with a balance has no positive minimum payment.
    #[error("debt '{name}' needs a minimum monthly payment greater than 0")]
    MissingMinimumPayment { name: String },

    /// The extra monthly payment may not be negative.
    #[error("extra payment per month may not be negative")]
    NegativeExtraPayment,

    /// The plan did not reach payoff within the month cap.
    #[error(
        "plan did not reach payoff within {max_months} months; check that minimum payments exceed monthly interest"
    )]
    DidNotConverge { max_months: u32 },
}

/// Which debt receives the extra payment each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Smallest balance first; ties go to the lower APR.
    Snowball,
    /// Highest APR first; ties go to the larger balance.
    Avalanche,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snowball => "snowball",
            Self::Avalanche => "avalanche",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "snowball" => Some(Self::Snowball),
            "avalanche" => Some(Self::Avalanche),
            _ => None,
        }
    }
}

/// Input for a repayment plan simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInput {
    /// Debts to include. Entries without a positive balance are skipped.
    pub debts: Vec<DebtAccount>,

    /// Amount available every month beyond the minimum payments.
    pub extra_monthly: Decimal,

    /// Target-selection strategy.
    pub strategy: Strategy,
}

/// The month a debt reached zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffEvent {
    pub name: String,
    pub month: u32,
}

/// Aggregate view of a single simulated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// 1-based month number.
    pub month: u32,

    /// Everything paid across all debts this month.
    pub payment: Decimal,

    /// Interest accrued across all debts this month.
    pub interest: Decimal,

    /// Total balance remaining after this month.
    pub remaining: Decimal,

    /// Debts that reached zero this month.
    pub paid_off: Vec<String>,
}

/// Result of a repayment plan simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPlan {
    pub strategy: Strategy,

    /// Months until every debt reached zero.
    pub months: u32,

    /// Sum of the included starting balances.
    pub starting_balance: Decimal,

    /// Total interest accrued across the whole plan.
    pub total_interest: Decimal,

    /// Starting balance plus total interest.
    pub total_paid: Decimal,

    /// Debts in the order they were cleared.
    pub payoff_order: Vec<PayoffEvent>,

    /// Detailed view of the first twelve months.
    pub preview: Vec<MonthSnapshot>,

    /// Some debt's minimum payment does not cover its first-month interest,
    /// so the projection may be optimistic.
    pub negative_amortization_risk: bool,
}

struct SimDebt {
    name: String,
    balance: Decimal,
    monthly_rate: Decimal,
    min_payment: Decimal,
    paid_off_month: Option<u32>,
}

impl SimDebt {
    fn active(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

/// Runs the repayment plan simulation.
///
/// Debts without a positive balance are dropped before simulation; a blank
/// name becomes `Debt N`; APR values outside 0..=100 are clamped with a
/// warning. Every remaining debt must carry a positive minimum payment.
///
/// # Errors
///
/// Returns a [`PlanError`] when no debt remains after filtering, a minimum
/// payment is missing, or the plan fails to converge within
/// [`MAX_PLAN_MONTHS`].
pub fn simulate(input: &PlanInput) -> Result<DebtPlan, PlanError> {
    if input.extra_monthly < Decimal::ZERO {
        return Err(PlanError::NegativeExtraPayment);
    }

    let mut debts = normalize(&input.debts)?;

    let starting_balance = round_half_up(debts.iter().map(|d| d.balance).sum());
    let negative_amortization_risk = debts.iter().any(|d| {
        d.monthly_rate > Decimal::ZERO
            && d.min_payment <= round_half_up(d.balance * d.monthly_rate)
    });

    let mut months = 0u32;
    let mut total_interest = Decimal::ZERO;
    let mut rollover = Decimal::ZERO;
    let mut payoff_order: Vec<PayoffEvent> = Vec::new();
    let mut preview = Vec::new();

    while debts.iter().any(SimDebt::active) {
        if months >= MAX_PLAN_MONTHS {
            return Err(PlanError::DidNotConverge {
                max_months: MAX_PLAN_MONTHS,
            });
        }
        months += 1;

        // Interest first. A runaway balance can outgrow decimal range long
        // before the month cap, so accrual is overflow-checked and treated
        // as non-convergence.
        let overflow = PlanError::DidNotConverge {
            max_months: MAX_PLAN_MONTHS,
        };
        let mut month_interest = Decimal::ZERO;
        for debt in debts.iter_mut().filter(|d| d.active()) {
            let interest = debt
                .balance
                .checked_mul(debt.monthly_rate)
                .map(round_half_up)
                .ok_or_else(|| overflow.clone())?;
            debt.balance = debt.balance.checked_add(interest).ok_or_else(|| overflow.clone())?;
            month_interest += interest;
        }
        total_interest = total_interest
            .checked_add(month_interest)
            .ok_or(overflow)?;

        // Minimum payments on every active debt.
        let mut month_payment = Decimal::ZERO;
        for debt in debts.iter_mut().filter(|d| d.active()) {
            let pay = debt.min_payment.min(debt.balance);
            debt.balance -= pay;
            month_payment += pay;
        }

        // Extra (plus rollover) goes to the strategy target, cascading to the
        // next target within the month when the target clears.
        let mut extra_this_month = input.extra_monthly + rollover;
        while extra_this_month > Decimal::ZERO {
            let Some(target) = pick_target(&debts, input.strategy) else {
                break;
            };

            let debt = &mut debts[target];
            let pay = extra_this_month.min(debt.balance);
            debt.balance -= pay;
            month_payment += pay;
            extra_this_month -= pay;

            if debt.balance > Decimal::ZERO {
                break;
            }
            if debt.paid_off_month.is_none() {
                debt.paid_off_month = Some(months);
                payoff_order.push(PayoffEvent {
                    name: debt.name.clone(),
                    month: months,
                });
                rollover += debt.min_payment;
            }
        }

        // Catch debts cleared by their own minimum payment.
        for debt in debts.iter_mut() {
            if debt.balance <= Decimal::ZERO && debt.paid_off_month.is_none() {
                debt.paid_off_month = Some(months);
                payoff_order.push(PayoffEvent {
                    name: debt.name.clone(),
                    month: months,
                });
                rollover += debt.min_payment;
            }
        }

        if months <= PREVIEW_MONTHS {
            let remaining = debts
                .iter()
                .filter(|d| d.active())
                .map(|d| d.balance)
                .sum();
            preview.push(MonthSnapshot {
                month: months,
                payment: round_half_up(month_payment),
                interest: round_half_up(month_interest),
                remaining: round_half_up(remaining),
                paid_off: payoff_order
                    .iter()
                    .filter(|e| e.month == months)
                    .map(|e| e.name.clone())
                    .collect(),
            });
        }
    }

    let total_interest = round_half_up(total_interest);

    Ok(DebtPlan {
        strategy: input.strategy,
        months,
        starting_balance,
        total_interest,
        total_paid: round_half_up(starting_balance + total_interest),
        payoff_order,
        preview,
        negative_amortization_risk,
    })
}

fn normalize(debts: &[DebtAccount]) -> Result<Vec<SimDebt>, PlanError> {
    let included: Vec<&DebtAccount> = debts
        .iter()
        .filter(|d| d.balance > Decimal::ZERO)
        .collect();

    if included.is_empty() {
        return Err(PlanError::NoDebts);
    }

    included
        .into_iter()
        .enumerate()
        .map(|(idx, debt)| {
            let name = if debt.name.trim().is_empty() {
                format!("Debt {}", idx + 1)
            } else {
                debt.name.trim().to_string()
            };

            let apr = clamp_apr(debt.apr_pct, &name);

            if debt.min_payment <= Decimal::ZERO {
                return Err(PlanError::MissingMinimumPayment { name });
            }

            Ok(SimDebt {
                name,
                balance: round_half_up(debt.balance),
                monthly_rate: apr / Decimal::from(1200),
                min_payment: debt.min_payment,
                paid_off_month: None,
            })
        })
        .collect()
}

/// Clamps an APR into 0..=100, warning when the input was out of range.
fn clamp_apr(
    apr_pct: Decimal,
    name: &str,
) -> Decimal {
    let clamped = apr_pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    if clamped != apr_pct {
        warn!(debt = name, apr = %apr_pct, "APR out of range, clamped to 0..=100");
    }
    clamped
}

fn pick_target(
    debts: &[SimDebt],
    strategy: Strategy,
) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (idx, debt) in debts.iter().enumerate() {
        if !debt.active() {
            continue;
        }
        let Some(current) = best else {
            best = Some(idx);
            continue;
        };
        let cur = &debts[current];

        let better = match strategy {
            Strategy::Snowball => {
                debt.balance < cur.balance
                    || (debt.balance == cur.balance && debt.monthly_rate < cur.monthly_rate)
            }
            Strategy::Avalanche => {
                debt.monthly_rate > cur.monthly_rate
                    || (debt.monthly_rate == cur.monthly_rate && debt.balance > cur.balance)
            }
        };
        if better {
            best = Some(idx);
        }
    }

    best
}
