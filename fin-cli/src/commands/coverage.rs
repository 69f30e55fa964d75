use anyhow::Result;
use clap::Args;
use fin_core::calculations::coverage::{CoverageInput, diagnose};
use rust_decimal::Decimal;

use crate::report::format_money;
use crate::report::html::render_coverage;
use crate::utils::parse_decimal_arg;

/// Income vs. essential-expenses coverage diagnostic.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Typical monthly income
    #[arg(long, value_parser = parse_decimal_arg)]
    pub income: Decimal,

    /// Essential monthly expenses
    #[arg(long, value_parser = parse_decimal_arg)]
    pub essentials: Decimal,

    /// Income variability haircut in percent (0-30)
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    pub swing: Decimal,

    /// Hidden essentials uplift in percent (0-20)
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    pub hidden: Decimal,
}

pub fn run(
    args: &CoverageArgs,
    html: bool,
) -> Result<()> {
    let input = CoverageInput {
        income: args.income,
        essentials: args.essentials,
        income_swing_pct: args.swing,
        hidden_essentials_pct: args.hidden,
    };

    let report = diagnose(&input)?;

    if html {
        println!("{}", render_coverage(&report));
        return Ok(());
    }

    println!(
        "Result: {} ({}x essential coverage)",
        report.band.as_str(),
        report.ratio
    );
    println!("{}", report.note);
    println!(
        "Conservative income {} vs essentials {}",
        format_money(report.adjusted_income),
        format_money(report.adjusted_essentials)
    );
    println!();
    println!("Do this now:");
    for action in &report.actions {
        println!("  - {action}");
    }

    Ok(())
}
