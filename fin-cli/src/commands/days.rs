use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use fin_core::dates::{business_days_between, parse_holiday_set};

/// Business days between two dates (inclusive).
#[derive(Debug, Args)]
pub struct DaysArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Comma-separated holiday dates to exclude (YYYY-MM-DD)
    #[arg(long)]
    pub holidays: Option<String>,
}

pub fn run(args: &DaysArgs) -> Result<()> {
    let holidays = args
        .holidays
        .as_deref()
        .map(parse_holiday_set)
        .unwrap_or_default();

    let count = business_days_between(args.start, args.end, &holidays)?;

    let total = (args.end - args.start).num_days() + 1;
    println!(
        "{count} business days between {} and {} ({total} calendar days, {} holidays listed)",
        args.start, args.end, holidays.len()
    );

    Ok(())
}
