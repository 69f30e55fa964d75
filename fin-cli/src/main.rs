use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fin_cli::commands;
use fin_cli::commands::coverage::CoverageArgs;
use fin_cli::commands::days::DaysArgs;
use fin_cli::commands::loan::LoanArgs;
use fin_cli::commands::payoff::PayoffArgs;
use fin_cli::commands::plan::PlanArgs;
use fin_cli::commands::split::SplitArgs;
use fin_cli::commands::tracker::TrackerArgs;
use fin_cli::config::Config;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal-finance calculators and a payday-cycle budget tracker.
///
/// Every calculator validates its inputs, computes its result and prints a
/// text report; pass --html to emit the result as an HTML fragment instead.
#[derive(Debug, Parser)]
#[command(name = "fincalc", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Render the result as an HTML fragment instead of text.
    #[arg(long, global = true, default_value_t = false)]
    html: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Amortization schedule for a fixed-rate loan
    Loan(LoanArgs),

    /// Payoff timeline for a revolving balance
    Payoff(PayoffArgs),

    /// Debt repayment plan (snowball or avalanche)
    Plan(PlanArgs),

    /// 50/30/20 budget rule allocation
    Split(SplitArgs),

    /// Income vs. essential-expenses coverage diagnostic
    Coverage(CoverageArgs),

    /// Business days between two dates
    Days(DaysArgs),

    /// Payday-cycle budget tracker
    Tracker(TrackerArgs),
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    debug!(backend = %config.db.backend, "configuration loaded");

    match &cli.command {
        Command::Loan(args) => commands::loan::run(args, cli.html),
        Command::Payoff(args) => commands::payoff::run(args, cli.html),
        Command::Plan(args) => commands::plan::run(args, cli.html),
        Command::Split(args) => commands::split::run(args, cli.html),
        Command::Coverage(args) => commands::coverage::run(args, cli.html),
        Command::Days(args) => commands::days::run(args),
        Command::Tracker(args) => commands::tracker::run(args, &config, cli.html).await,
    }
}
