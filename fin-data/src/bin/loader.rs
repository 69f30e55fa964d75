use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fin_data::BudgetLineLoader;
use fin_db_sqlite::SqliteRepository;

/// Load budget line data from a CSV file into the tracker database.
///
/// The CSV file should have the following columns:
/// - kind: 'income' or 'fixed'
/// - label: display label of the line
/// - amount: monthly amount
#[derive(Parser, Debug)]
#[command(name = "fin-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing budget lines
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g. sqlite:budget.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:budget.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    println!("Loading budget lines from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = BudgetLineLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = BudgetLineLoader::load(&repo, &records)
        .await
        .context("Failed to load budget lines into database")?;

    println!(
        "Successfully loaded {} budget lines into the database.",
        inserted
    );

    Ok(())
}
