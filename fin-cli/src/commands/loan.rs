use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use fin_core::calculations::loan::{LoanInput, LoanSchedule, amortize};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::report::html::render_loan;
use crate::report::{format_money, format_month_span};
use crate::utils::parse_decimal_arg;

/// Amortization schedule for a fixed-rate loan.
#[derive(Debug, Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long, value_parser = parse_decimal_arg)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long, value_parser = parse_decimal_arg)]
    pub rate: Decimal,

    /// Loan term in years (fractions allowed, e.g. 2.5)
    #[arg(long, value_parser = parse_decimal_arg)]
    pub years: Decimal,

    /// Extra principal paid every month
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    pub extra: Decimal,

    /// Print the full month-by-month schedule
    #[arg(long, default_value_t = false)]
    pub schedule: bool,

    /// Write the schedule to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(
    args: &LoanArgs,
    html: bool,
) -> Result<()> {
    let term_months = (args.years * Decimal::from(12))
        .round()
        .to_u32()
        .filter(|n| *n > 0)
        .ok_or_else(|| anyhow::anyhow!("Enter a valid loan term in years."))?;

    let input = LoanInput {
        principal: args.principal,
        annual_rate_pct: args.rate,
        term_months,
        extra_monthly: args.extra,
    };

    let schedule = amortize(&input)?;

    if let Some(path) = &args.csv {
        write_schedule_csv(&schedule, path)?;
        println!("Schedule written to {}", path.display());
    }

    if html {
        println!("{}", render_loan(&schedule, args.schedule));
        return Ok(());
    }

    println!(
        "Estimated monthly payment:  {}",
        format_money(schedule.monthly_payment)
    );
    println!(
        "Total interest:             {}",
        format_money(schedule.total_interest)
    );
    println!(
        "Total paid:                 {}",
        format_money(schedule.total_paid)
    );
    println!(
        "Estimated payoff time:      {}",
        format_month_span(schedule.months)
    );

    if schedule.months_saved > 0 || schedule.interest_saved > Decimal::ZERO {
        println!(
            "Versus scheduled payments:  {} months and {} in interest saved",
            schedule.months_saved,
            format_money(schedule.interest_saved)
        );
    }

    if args.schedule {
        println!();
        println!(
            "{:>5}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}",
            "Month", "Payment", "Interest", "Principal", "Extra", "Balance"
        );
        for row in &schedule.rows {
            println!(
                "{:>5}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}",
                row.month,
                format_money(row.payment),
                format_money(row.interest),
                format_money(row.principal),
                format_money(row.extra),
                format_money(row.balance)
            );
        }
    }

    Ok(())
}

fn write_schedule_csv(
    schedule: &LoanSchedule,
    path: &PathBuf,
) -> Result<()> {
    if schedule.rows.is_empty() {
        bail!("nothing to export: the schedule is empty");
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write CSV to '{}'", path.display()))?;

    writer
        .write_record(["month", "payment", "interest", "principal", "extra", "balance"])
        .context("failed to write CSV header")?;

    for row in &schedule.rows {
        writer
            .write_record([
                row.month.to_string(),
                row.payment.to_string(),
                row.interest.to_string(),
                row.principal.to_string(),
                row.extra.to_string(),
                row.balance.to_string(),
            ])
            .with_context(|| format!("failed to write CSV row for month {}", row.month))?;
    }

    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}
