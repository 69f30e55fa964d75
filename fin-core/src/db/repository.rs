use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    Category, DayEntry, FixedExpense, IncomeLine, NewDayEntry, NewFixedExpense, NewIncomeLine,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage behind the budget tracker: the payday setting, the recurring
/// income and fixed-expense lines, user categories, and the per-day spend
/// entries partitioned by cycle key.
#[async_trait]
pub trait TrackerRepository: Send + Sync {
    // Settings
    async fn get_payday(&self) -> Result<Option<u32>, RepositoryError>;
    async fn set_payday(&self, day: u32) -> Result<(), RepositoryError>;

    // Income lines
    async fn create_income_line(
        &self,
        line: NewIncomeLine,
    ) -> Result<IncomeLine, RepositoryError>;

    async fn get_income_line(&self, id: i64) -> Result<IncomeLine, RepositoryError>;

    async fn update_income_line(&self, line: &IncomeLine) -> Result<(), RepositoryError>;

    async fn delete_income_line(&self, id: i64) -> Result<(), RepositoryError>;

    async fn list_income_lines(&self) -> Result<Vec<IncomeLine>, RepositoryError>;

    // Fixed expenses
    async fn create_fixed_expense(
        &self,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, RepositoryError>;

    async fn get_fixed_expense(&self, id: i64) -> Result<FixedExpense, RepositoryError>;

    async fn update_fixed_expense(&self, expense: &FixedExpense) -> Result<(), RepositoryError>;

    async fn delete_fixed_expense(&self, id: i64) -> Result<(), RepositoryError>;

    async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>, RepositoryError>;

    // Categories
    async fn add_category(&self, name: &str) -> Result<(), RepositoryError>;

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;

    // Day entries
    async fn add_day_entry(&self, entry: NewDayEntry) -> Result<DayEntry, RepositoryError>;

    async fn update_day_entry(&self, entry: &DayEntry) -> Result<(), RepositoryError>;

    async fn delete_day_entry(&self, id: i64) -> Result<(), RepositoryError>;

    async fn list_cycle_entries(
        &self,
        cycle_key: &str,
    ) -> Result<Vec<DayEntry>, RepositoryError>;

    async fn list_day_entries(
        &self,
        cycle_key: &str,
        date: NaiveDate,
    ) -> Result<Vec<DayEntry>, RepositoryError>;

    async fn clear_day(
        &self,
        cycle_key: &str,
        date: NaiveDate,
    ) -> Result<(), RepositoryError>;

    async fn clear_cycle(&self, cycle_key: &str) -> Result<(), RepositoryError>;
}
