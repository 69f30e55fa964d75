use anyhow::{Result, anyhow};
use clap::Args;
use fin_core::calculations::budget_split::{IncomePeriod, SplitInput, split};
use rust_decimal::Decimal;

use crate::report::format_money;
use crate::report::html::render_split;
use crate::utils::parse_decimal_arg;

/// 50/30/20 budget rule allocation.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Income amount
    #[arg(long, value_parser = parse_decimal_arg)]
    pub income: Decimal,

    /// Pay period of the income: weekly, fortnightly, monthly or annual
    #[arg(long, default_value = "monthly")]
    pub period: String,

    /// Needs percentage (defaults to 50, auto-balanced when omitted)
    #[arg(long, value_parser = parse_decimal_arg)]
    pub needs: Option<Decimal>,

    /// Wants percentage (defaults to 30, auto-balanced when omitted)
    #[arg(long, value_parser = parse_decimal_arg)]
    pub wants: Option<Decimal>,

    /// Savings/debt percentage (defaults to 20, auto-balanced when omitted)
    #[arg(long, value_parser = parse_decimal_arg)]
    pub savings: Option<Decimal>,
}

pub fn run(
    args: &SplitArgs,
    html: bool,
) -> Result<()> {
    let period = IncomePeriod::parse(&args.period).ok_or_else(|| {
        anyhow!(
            "unknown period '{}'; use weekly, fortnightly, monthly or annual",
            args.period
        )
    })?;

    let input = SplitInput {
        income: args.income,
        period,
        needs_pct: args.needs,
        wants_pct: args.wants,
        savings_pct: args.savings,
    };

    let result = split(&input)?;

    if html {
        println!("{}", render_split(&result));
        return Ok(());
    }

    println!(
        "Estimated monthly income:  {}",
        format_money(result.monthly_income)
    );
    println!(
        "Needs ({}%):               {}",
        result.percents.needs,
        format_money(result.needs)
    );
    println!(
        "Wants ({}%):               {}",
        result.percents.wants,
        format_money(result.wants)
    );
    println!(
        "Savings & debt ({}%):      {}",
        result.percents.savings,
        format_money(result.savings)
    );

    Ok(())
}
