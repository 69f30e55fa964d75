//! Calculator modules for the personal-finance suite.
//!
//! Each submodule is one self-contained calculation: validated input in,
//! computed result (or a typed error) out. Nothing in here touches storage;
//! the tracker-related math receives its figures from the caller.

pub mod allowance;
pub mod budget_split;
pub mod common;
pub mod coverage;
pub mod debt_plan;
pub mod loan;
pub mod payoff;

pub use allowance::{DayAllowance, allowance_for, base_daily};
pub use budget_split::{BudgetSplit, IncomePeriod, SplitError, SplitInput, split};
pub use coverage::{CoverageBand, CoverageError, CoverageInput, CoverageReport, diagnose};
pub use debt_plan::{DebtPlan, PlanError, PlanInput, Strategy, simulate as simulate_plan};
pub use loan::{LoanError, LoanInput, LoanSchedule, ScheduleRow, amortize};
pub use payoff::{PayoffError, PayoffInput, PayoffOutcome, simulate as simulate_payoff};
