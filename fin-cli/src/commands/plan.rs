use anyhow::{Result, anyhow};
use clap::Args;
use fin_core::calculations::debt_plan::{PlanInput, Strategy, simulate};
use fin_core::models::DebtAccount;
use rust_decimal::Decimal;

use crate::report::html::render_plan;
use crate::report::{format_money, format_month_span};
use crate::utils::{parse_decimal, parse_decimal_arg};

/// Debt repayment plan (snowball or avalanche).
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Repayment strategy: snowball or avalanche
    #[arg(long, default_value = "snowball")]
    pub strategy: String,

    /// A debt as NAME:BALANCE:APR:MIN_PAYMENT (repeatable)
    #[arg(long = "debt", value_parser = parse_debt_spec, required = true)]
    pub debts: Vec<DebtAccount>,

    /// Extra amount available every month beyond the minimums
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    pub extra: Decimal,
}

/// Parses `NAME:BALANCE:APR:MIN_PAYMENT` into a [`DebtAccount`].
pub fn parse_debt_spec(spec: &str) -> Result<DebtAccount, String> {
    let parts: Vec<&str> = spec.split(':').collect();
    let &[name, balance, apr, min_payment] = parts.as_slice() else {
        return Err(format!(
            "expected NAME:BALANCE:APR:MIN_PAYMENT, got '{spec}'"
        ));
    };

    let field = |label: &str, raw: &str| {
        parse_decimal(raw).map_err(|e| format!("{label} of '{name}': {e}"))
    };

    Ok(DebtAccount {
        name: name.trim().to_string(),
        balance: field("balance", balance)?,
        apr_pct: field("APR", apr)?,
        min_payment: field("minimum payment", min_payment)?,
    })
}

pub fn run(
    args: &PlanArgs,
    html: bool,
) -> Result<()> {
    let strategy = Strategy::parse(&args.strategy)
        .ok_or_else(|| anyhow!("unknown strategy '{}'; use snowball or avalanche", args.strategy))?;

    let input = PlanInput {
        debts: args.debts.clone(),
        extra_monthly: args.extra,
        strategy,
    };

    let plan = simulate(&input)?;

    if html {
        println!("{}", render_plan(&plan));
        return Ok(());
    }

    println!(
        "Estimated time to become debt-free:  {}",
        format_month_span(plan.months)
    );
    println!(
        "Starting total debt:                 {}",
        format_money(plan.starting_balance)
    );
    println!(
        "Estimated total interest paid:       {}",
        format_money(plan.total_interest)
    );
    println!(
        "Estimated total paid:                {}",
        format_money(plan.total_paid)
    );

    if plan.negative_amortization_risk {
        println!(
            "Note: at least one minimum payment may not cover monthly interest; \
             estimates may be optimistic."
        );
    }

    println!();
    println!("Payoff order ({}):", plan.strategy.as_str());
    for (idx, event) in plan.payoff_order.iter().enumerate() {
        println!(
            "  {}. {} — paid off in month {} ({})",
            idx + 1,
            event.name,
            event.month,
            format_month_span(event.month)
        );
    }

    println!();
    println!("First 12 months:");
    println!(
        "{:>5}  {:>13}  {:>12}  {:>17}  {}",
        "Month", "Total payment", "Interest", "Remaining balance", "Paid off"
    );
    for snapshot in &plan.preview {
        let paid_off = if snapshot.paid_off.is_empty() {
            "—".to_string()
        } else {
            snapshot.paid_off.join(", ")
        };
        println!(
            "{:>5}  {:>13}  {:>12}  {:>17}  {}",
            snapshot.month,
            format_money(snapshot.payment),
            format_money(snapshot.interest),
            format_money(snapshot.remaining),
            paid_off
        );
    }

    Ok(())
}
