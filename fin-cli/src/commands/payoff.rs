use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use fin_core::calculations::payoff::{PayoffInput, simulate};
use rust_decimal::Decimal;

use crate::report::html::render_payoff;
use crate::report::{format_money, format_month_span};
use crate::utils::parse_decimal_arg;

/// Payoff timeline for a revolving balance (credit card style).
#[derive(Debug, Args)]
pub struct PayoffArgs {
    /// Current balance owed
    #[arg(long, value_parser = parse_decimal_arg)]
    pub balance: Decimal,

    /// Annual interest rate in percent (e.g. 21.99)
    #[arg(long, value_parser = parse_decimal_arg)]
    pub rate: Decimal,

    /// Fixed monthly payment
    #[arg(long, value_parser = parse_decimal_arg)]
    pub payment: Decimal,

    /// Extra amount paid every month
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    pub extra: Decimal,

    /// One-time extra payment applied up front
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    pub lump_sum: Decimal,

    /// Start date (YYYY-MM-DD) used to project the payoff date
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run(
    args: &PayoffArgs,
    html: bool,
) -> Result<()> {
    let input = PayoffInput {
        balance: args.balance,
        annual_rate_pct: args.rate,
        monthly_payment: args.payment,
        extra_monthly: args.extra,
        lump_sum: args.lump_sum,
        start_date: args.start_date,
    };

    let outcome = simulate(&input)?;

    if html {
        println!("{}", render_payoff(&outcome));
        return Ok(());
    }

    println!(
        "Estimated time to payoff:  {}",
        format_month_span(outcome.months)
    );
    println!(
        "Estimated total interest:  {}",
        format_money(outcome.total_interest)
    );
    println!(
        "Estimated total paid:      {}",
        format_money(outcome.total_paid)
    );
    if let Some(date) = outcome.payoff_date {
        println!("Estimated payoff date:     {}", date.format("%Y-%m-%d"));
    }
    if let Some(baseline) = &outcome.baseline {
        println!(
            "Versus no extras:          {} months and {} in interest saved (baseline {} months)",
            outcome.months_saved,
            format_money(outcome.interest_saved),
            baseline.months
        );
    }

    Ok(())
}
