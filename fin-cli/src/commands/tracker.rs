use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use fin_core::calculations::allowance::{DayAllowance, allowance_for, base_daily};
use fin_core::calculations::common::ceil_whole;
use fin_core::cycle::{BudgetCycle, DEFAULT_PAYDAY, clamp_payday};
use fin_core::db::{DbConfig, RepositoryRegistry};
use fin_core::models::{DEFAULT_CATEGORIES, NewDayEntry, NewFixedExpense, NewIncomeLine};
use fin_core::{DayEntry, TrackerRepository};
use fin_db_sqlite::SqliteRepositoryFactory;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::report::format_money;
use crate::report::html::render_tracker_summary;
use crate::utils::parse_decimal_arg;

/// Payday-cycle budget tracker backed by the configured database.
#[derive(Debug, Args)]
pub struct TrackerArgs {
    #[command(subcommand)]
    pub action: TrackerAction,
}

#[derive(Debug, Subcommand)]
pub enum TrackerAction {
    /// Set the payday day-of-month (1-31) that anchors the cycle
    SetPayday {
        /// Day of month the cycle starts on
        day: u32,
    },

    /// Add a recurring income line
    AddIncome {
        /// Label of the income line
        label: String,
        /// Monthly amount (whole units, rounded up)
        #[arg(value_parser = parse_decimal_arg)]
        amount: Decimal,
    },

    /// Delete an income line by id
    RemoveIncome { id: i64 },

    /// Add a recurring fixed expense (its label also becomes a category)
    AddFixed {
        /// Label of the fixed expense
        label: String,
        /// Monthly amount (whole units, rounded up)
        #[arg(value_parser = parse_decimal_arg)]
        amount: Decimal,
    },

    /// Delete a fixed expense by id
    RemoveFixed { id: i64 },

    /// Add a spending category
    AddCategory { name: String },

    /// List all available categories
    Categories,

    /// Record a spend entry on a day of the current cycle
    Spend {
        /// Amount spent (whole units, rounded up)
        #[arg(value_parser = parse_decimal_arg)]
        amount: Decimal,
        /// Category of the spend
        #[arg(long, default_value = "Other")]
        category: String,
        /// Date of the spend (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },

    /// Show one day's entries and allowance state
    Day {
        /// Date to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete a single spend entry by id
    RemoveEntry { id: i64 },

    /// Delete all entries for one day of the current cycle
    ClearDay {
        /// Date to clear (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete all daily entries for the current cycle (income and fixed
    /// expenses remain)
    ClearCycle,

    /// Show the cycle summary: fixed total, variable pool, base daily
    /// allowance and today's rolling allowance
    Summary,
}

pub async fn run(
    args: &TrackerArgs,
    config: &Config,
    html: bool,
) -> Result<()> {
    let repo = open_repository(&config.db).await?;
    let today = Local::now().date_naive();

    match &args.action {
        TrackerAction::SetPayday { day } => {
            let clamped = clamp_payday(*day);
            repo.set_payday(clamped).await?;
            let cycle = BudgetCycle::containing(clamped, today);
            println!(
                "Payday set to day {clamped}. Current cycle: {} to {}.",
                cycle.start(),
                cycle.end()
            );
        }

        TrackerAction::AddIncome { label, amount } => {
            let line = new_budget_line(label, *amount, "income label")?;
            repo.create_income_line(NewIncomeLine {
                label: line.0,
                amount: line.1,
            })
            .await?;
            println!("Saved. Income line added.");
        }

        TrackerAction::RemoveIncome { id } => {
            repo.delete_income_line(*id).await?;
            println!("Income line {id} deleted.");
        }

        TrackerAction::AddFixed { label, amount } => {
            let line = new_budget_line(label, *amount, "fixed expense label")?;
            repo.create_fixed_expense(NewFixedExpense {
                label: line.0.clone(),
                amount: line.1,
            })
            .await?;
            // A fixed expense doubles as a spending category.
            repo.add_category(&line.0).await?;
            println!("Saved. Fixed expense added.");
        }

        TrackerAction::RemoveFixed { id } => {
            repo.delete_fixed_expense(*id).await?;
            println!("Fixed expense {id} deleted.");
        }

        TrackerAction::AddCategory { name } => {
            let name = name.trim();
            if name.is_empty() {
                bail!("Enter a category name.");
            }
            repo.add_category(name).await?;
            println!("Category '{name}' added.");
        }

        TrackerAction::Categories => {
            for name in merged_categories(repo.as_ref()).await? {
                println!("{name}");
            }
        }

        TrackerAction::Spend {
            amount,
            category,
            date,
            note,
        } => {
            let cycle = current_cycle(repo.as_ref(), config, today).await?;
            let date = date.unwrap_or(today);
            if !cycle.contains(date) {
                bail!(
                    "{date} is outside the current cycle ({} to {}).",
                    cycle.start(),
                    cycle.end()
                );
            }

            let amount = ceil_whole(*amount);
            if amount <= Decimal::ZERO {
                bail!("Enter a valid amount greater than 0.");
            }

            let category = match category.trim() {
                "" => "Other".to_string(),
                trimmed => trimmed.to_string(),
            };

            repo.add_day_entry(NewDayEntry {
                cycle_key: cycle.key(),
                entry_date: date,
                category,
                amount,
                note: note.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(String::from),
            })
            .await?;

            let state = day_state(repo.as_ref(), &cycle, date).await?;
            println!(
                "Saved. Spent {} on {date}; {} left of today's allowance.",
                format_money(amount),
                format_money(state.allowance - state.spent)
            );
        }

        TrackerAction::Day { date } => {
            let cycle = current_cycle(repo.as_ref(), config, today).await?;
            let date = date.unwrap_or(today);
            if !cycle.contains(date) {
                bail!(
                    "{date} is outside the current cycle ({} to {}).",
                    cycle.start(),
                    cycle.end()
                );
            }

            let entries = repo.list_day_entries(&cycle.key(), date).await?;
            if entries.is_empty() {
                println!("No entries for {date} yet.");
            } else {
                for entry in &entries {
                    println!("{}", format_entry(entry));
                }
            }

            let state = day_state(repo.as_ref(), &cycle, date).await?;
            println!(
                "Allowance {}, spent {}, carry {}.",
                format_money(state.allowance),
                format_money(state.spent),
                format_money(state.carry_after)
            );
        }

        TrackerAction::RemoveEntry { id } => {
            repo.delete_day_entry(*id).await?;
            println!("Entry {id} deleted.");
        }

        TrackerAction::ClearDay { date } => {
            let cycle = current_cycle(repo.as_ref(), config, today).await?;
            let date = date.unwrap_or(today);
            repo.clear_day(&cycle.key(), date).await?;
            println!("Cleared. Entries for {date} were removed.");
        }

        TrackerAction::ClearCycle => {
            let cycle = current_cycle(repo.as_ref(), config, today).await?;
            repo.clear_cycle(&cycle.key()).await?;
            println!(
                "Cleared. Daily entries for the cycle starting {} were removed; \
                 income and fixed expenses remain.",
                cycle.start()
            );
        }

        TrackerAction::Summary => {
            let cycle = current_cycle(repo.as_ref(), config, today).await?;
            let summary = summarize(repo.as_ref(), &cycle, today).await?;

            if html {
                println!(
                    "{}",
                    render_tracker_summary(
                        summary.fixed_total,
                        summary.variable_pool,
                        summary.base,
                        summary.today_allowance,
                    )
                );
                return Ok(());
            }

            println!(
                "Cycle: {} to {} (day {} of 31)",
                cycle.start(),
                cycle.end(),
                cycle.day_index(today).map(|i| i + 1).unwrap_or(0)
            );
            println!(
                "Fixed monthly expenses:          {}",
                format_money(summary.fixed_total)
            );
            println!(
                "Available for variable spending: {}",
                format_money(summary.variable_pool)
            );
            println!(
                "Base daily allowance (31 days):  {}",
                format_money(summary.base)
            );
            println!(
                "Today's rolling allowance:       {}",
                format_money(summary.today_allowance)
            );
        }
    }

    Ok(())
}

struct CycleSummary {
    fixed_total: Decimal,
    variable_pool: Decimal,
    base: Decimal,
    today_allowance: Decimal,
}

async fn open_repository(db: &DbConfig) -> Result<Box<dyn TrackerRepository>> {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    Ok(registry.create(db).await?)
}

/// The cycle containing `today`, anchored on the stored payday, then the
/// configured one, then the default.
async fn current_cycle(
    repo: &dyn TrackerRepository,
    config: &Config,
    today: NaiveDate,
) -> Result<BudgetCycle> {
    let payday = match repo.get_payday().await? {
        Some(day) => day,
        None => config.payday.unwrap_or(DEFAULT_PAYDAY),
    };
    Ok(BudgetCycle::containing(clamp_payday(payday), today))
}

fn new_budget_line(
    label: &str,
    amount: Decimal,
    label_kind: &str,
) -> Result<(String, Decimal)> {
    let label = label.trim();
    if label.is_empty() {
        bail!("Enter a {label_kind}.");
    }
    let amount = ceil_whole(amount);
    if amount < Decimal::ZERO {
        bail!("Enter a valid amount (0 or higher).");
    }
    Ok((label.to_string(), amount))
}

/// Spend per date for the cycle, summed from its stored entries.
async fn cycle_spend(
    repo: &dyn TrackerRepository,
    cycle: &BudgetCycle,
) -> Result<HashMap<NaiveDate, Decimal>> {
    let mut spend: HashMap<NaiveDate, Decimal> = HashMap::new();
    for entry in repo.list_cycle_entries(&cycle.key()).await? {
        *spend.entry(entry.entry_date).or_default() += entry.amount;
    }
    Ok(spend)
}

async fn day_state(
    repo: &dyn TrackerRepository,
    cycle: &BudgetCycle,
    date: NaiveDate,
) -> Result<DayAllowance> {
    let (income_total, fixed_total) = totals(repo).await?;
    let spend = cycle_spend(repo, cycle).await?;
    let base = base_daily(income_total, fixed_total);

    allowance_for(cycle, base, &spend, date)
        .ok_or_else(|| anyhow::anyhow!("{date} is outside the current cycle"))
}

/// (income total, fixed total) across all stored lines.
async fn totals(repo: &dyn TrackerRepository) -> Result<(Decimal, Decimal)> {
    let income: Decimal = repo
        .list_income_lines()
        .await?
        .iter()
        .map(|l| l.amount)
        .sum();
    let fixed: Decimal = repo
        .list_fixed_expenses()
        .await?
        .iter()
        .map(|e| e.amount)
        .sum();
    Ok((income, fixed))
}

async fn summarize(
    repo: &dyn TrackerRepository,
    cycle: &BudgetCycle,
    today: NaiveDate,
) -> Result<CycleSummary> {
    let (income_total, fixed_total) = totals(repo).await?;
    let base = base_daily(income_total, fixed_total);
    let today_allowance = day_state(repo, cycle, today).await.map(|s| s.allowance)?;

    Ok(CycleSummary {
        fixed_total,
        variable_pool: income_total - fixed_total,
        base,
        today_allowance,
    })
}

/// Categories shown to the user: built-in defaults, fixed-expense labels and
/// stored categories, deduplicated in that order.
async fn merged_categories(repo: &dyn TrackerRepository) -> Result<Vec<String>> {
    let mut seen = Vec::new();
    let mut push = |name: &str| {
        if !name.is_empty() && !seen.iter().any(|s| s == name) {
            seen.push(name.to_string());
        }
    };

    for name in DEFAULT_CATEGORIES {
        push(name);
    }
    for expense in repo.list_fixed_expenses().await? {
        push(expense.label.trim());
    }
    for category in repo.list_categories().await? {
        push(category.name.trim());
    }

    Ok(seen)
}

fn format_entry(entry: &DayEntry) -> String {
    let note = entry
        .note
        .as_deref()
        .filter(|n| !n.is_empty())
        .map(|n| format!(" — {n}"))
        .unwrap_or_default();
    format!(
        "#{} {}: {}{}",
        entry.id,
        entry.category,
        format_money(entry.amount),
        note
    )
}
