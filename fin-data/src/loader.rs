use std::io::Read;

use fin_core::{NewFixedExpense, NewIncomeLine, RepositoryError, TrackerRepository};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading budget line data.
#[derive(Debug, Error)]
pub enum BudgetLineLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid kind '{0}' (expected 'income' or 'fixed')")]
    InvalidKind(String),

    #[error("Line for '{label}' has a negative amount")]
    NegativeAmount { label: String },

    #[error("Record {record} has an empty label")]
    EmptyLabel { record: usize },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for BudgetLineLoaderError {
    fn from(err: csv::Error) -> Self {
        BudgetLineLoaderError::CsvParse(err.to_string())
    }
}

/// Which tracker table a budget line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Income,
    Fixed,
}

impl LineKind {
    fn parse(s: &str) -> Result<Self, BudgetLineLoaderError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "fixed" => Ok(Self::Fixed),
            other => Err(BudgetLineLoaderError::InvalidKind(other.to_string())),
        }
    }
}

/// A single record from the budget lines CSV file.
///
/// The CSV format:
/// - `kind`: `income` or `fixed`
/// - `label`: display label of the line
/// - `amount`: monthly amount
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BudgetLineRecord {
    pub kind: String,
    pub label: String,
    pub amount: Decimal,
}

/// Loader for budget line data from CSV files.
///
/// This loader reads CSV data and inserts it into the database via the
/// `TrackerRepository` trait, allowing it to work with any database backend.
///
/// A `fixed` line also registers its label as a spending category, the same
/// way the tracker does when a fixed expense is added interactively.
pub struct BudgetLineLoader;

impl BudgetLineLoader {
    /// Parse budget line records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BudgetLineRecord>, BudgetLineLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BudgetLineRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load budget line records into the database.
    ///
    /// Validates every record before inserting anything, so a bad record
    /// leaves the database untouched. Returns the number of lines inserted.
    ///
    /// # Errors
    ///
    /// Returns a [`BudgetLineLoaderError`] when a record has an unknown
    /// kind, an empty label or a negative amount, or when the repository
    /// rejects an insert.
    pub async fn load(
        repo: &dyn TrackerRepository,
        records: &[BudgetLineRecord],
    ) -> Result<usize, BudgetLineLoaderError> {
        let mut validated = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let kind = LineKind::parse(&record.kind)?;
            let label = record.label.trim();
            if label.is_empty() {
                return Err(BudgetLineLoaderError::EmptyLabel { record: idx + 1 });
            }
            if record.amount < Decimal::ZERO {
                return Err(BudgetLineLoaderError::NegativeAmount {
                    label: label.to_string(),
                });
            }
            validated.push((kind, label.to_string(), record.amount));
        }

        let mut inserted = 0;
        for (kind, label, amount) in validated {
            match kind {
                LineKind::Income => {
                    repo.create_income_line(NewIncomeLine { label, amount }).await?;
                }
                LineKind::Fixed => {
                    repo.create_fixed_expense(NewFixedExpense {
                        label: label.clone(),
                        amount,
                    })
                    .await?;
                    repo.add_category(&label).await?;
                }
            }
            inserted += 1;
        }

        Ok(inserted)
    }
}
