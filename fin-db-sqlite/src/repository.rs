use chrono::{DateTime, NaiveDate, Utc};
use async_trait::async_trait;
use fin_core::{
    Category, DayEntry, FixedExpense, IncomeLine, NewDayEntry, NewFixedExpense, NewIncomeLine,
    RepositoryError, TrackerRepository,
};
use sqlx::{Row, sqlite::SqlitePool};

use crate::decimal::{decimal_to_f64, get_decimal};

/// Settings key holding the payday day-of-month.
const PAYDAY_KEY: &str = "payday_day";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        tracing::debug!(url = database_url, "opening sqlite database");
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_income_line(row: &sqlx::sqlite::SqliteRow) -> Result<IncomeLine, RepositoryError> {
    Ok(IncomeLine {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        label: row
            .try_get("label")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        amount: get_decimal(row, "amount")?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}

fn row_to_fixed_expense(row: &sqlx::sqlite::SqliteRow) -> Result<FixedExpense, RepositoryError> {
    Ok(FixedExpense {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        label: row
            .try_get("label")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        amount: get_decimal(row, "amount")?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}

fn row_to_day_entry(row: &sqlx::sqlite::SqliteRow) -> Result<DayEntry, RepositoryError> {
    Ok(DayEntry {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        cycle_key: row
            .try_get("cycle_key")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        entry_date: row
            .try_get::<NaiveDate, _>("entry_date")
            .map_err(|e| RepositoryError::Database(format!("Failed to get entry_date: {}", e)))?,
        category: row
            .try_get("category")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        amount: get_decimal(row, "amount")?,
        note: row
            .try_get("note")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

#[async_trait]
impl TrackerRepository for SqliteRepository {
    async fn get_payday(&self) -> Result<Option<u32>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM tracker_settings WHERE key = ?")
            .bind(PAYDAY_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        let day = value
            .parse::<u32>()
            .map_err(|e| RepositoryError::Database(format!("Invalid payday '{}': {}", value, e)))?;

        Ok(Some(day))
    }

    async fn set_payday(
        &self,
        day: u32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO tracker_settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(PAYDAY_KEY)
        .bind(day.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn create_income_line(
        &self,
        line: NewIncomeLine,
    ) -> Result<IncomeLine, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO income_lines (label, amount, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&line.label)
        .bind(decimal_to_f64(line.amount))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        self.get_income_line(result.last_insert_rowid()).await
    }

    async fn get_income_line(
        &self,
        id: i64,
    ) -> Result<IncomeLine, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, label, amount, created_at, updated_at FROM income_lines WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_income_line(&row)
    }

    async fn update_income_line(
        &self,
        line: &IncomeLine,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE income_lines SET label = ?, amount = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&line.label)
        .bind(decimal_to_f64(line.amount))
        .bind(Utc::now())
        .bind(line.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_income_line(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM income_lines WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_income_lines(&self) -> Result<Vec<IncomeLine>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, label, amount, created_at, updated_at FROM income_lines ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_income_line).collect()
    }

    async fn create_fixed_expense(
        &self,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO fixed_expenses (label, amount, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&expense.label)
        .bind(decimal_to_f64(expense.amount))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        self.get_fixed_expense(result.last_insert_rowid()).await
    }

    async fn get_fixed_expense(
        &self,
        id: i64,
    ) -> Result<FixedExpense, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, label, amount, created_at, updated_at FROM fixed_expenses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_fixed_expense(&row)
    }

    async fn update_fixed_expense(
        &self,
        expense: &FixedExpense,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE fixed_expenses SET label = ?, amount = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&expense.label)
        .bind(decimal_to_f64(expense.amount))
        .bind(Utc::now())
        .bind(expense.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_fixed_expense(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM fixed_expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, label, amount, created_at, updated_at FROM fixed_expenses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_fixed_expense).collect()
    }

    async fn add_category(
        &self,
        name: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query("SELECT name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(Category {
                    name: row
                        .try_get("name")
                        .map_err(|e| RepositoryError::Database(e.to_string()))?,
                })
            })
            .collect()
    }

    async fn add_day_entry(
        &self,
        entry: NewDayEntry,
    ) -> Result<DayEntry, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO day_entries (cycle_key, entry_date, category, amount, note, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.cycle_key)
        .bind(entry.entry_date)
        .bind(&entry.category)
        .bind(decimal_to_f64(entry.amount))
        .bind(&entry.note)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        let row = sqlx::query(
            "SELECT id, cycle_key, entry_date, category, amount, note, created_at
             FROM day_entries WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_day_entry(&row)
    }

    async fn update_day_entry(
        &self,
        entry: &DayEntry,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE day_entries SET category = ?, amount = ?, note = ? WHERE id = ?",
        )
        .bind(&entry.category)
        .bind(decimal_to_f64(entry.amount))
        .bind(&entry.note)
        .bind(entry.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_day_entry(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM day_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_cycle_entries(
        &self,
        cycle_key: &str,
    ) -> Result<Vec<DayEntry>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, cycle_key, entry_date, category, amount, note, created_at
             FROM day_entries WHERE cycle_key = ?
             ORDER BY entry_date, id",
        )
        .bind(cycle_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_day_entry).collect()
    }

    async fn list_day_entries(
        &self,
        cycle_key: &str,
        date: NaiveDate,
    ) -> Result<Vec<DayEntry>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, cycle_key, entry_date, category, amount, note, created_at
             FROM day_entries WHERE cycle_key = ? AND entry_date = ?
             ORDER BY id",
        )
        .bind(cycle_key)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_day_entry).collect()
    }

    async fn clear_day(
        &self,
        cycle_key: &str,
        date: NaiveDate,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM day_entries WHERE cycle_key = ? AND entry_date = ?")
            .bind(cycle_key)
            .bind(date)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn clear_cycle(
        &self,
        cycle_key: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM day_entries WHERE cycle_key = ?")
            .bind(cycle_key)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn test_date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_entry(
        cycle_key: &str,
        date: NaiveDate,
        amount: rust_decimal::Decimal,
    ) -> NewDayEntry {
        NewDayEntry {
            cycle_key: cycle_key.to_string(),
            entry_date: date,
            category: "Groceries".to_string(),
            amount,
            note: None,
        }
    }

    // =========================================================================
    // payday setting
    // =========================================================================

    #[tokio::test]
    async fn test_payday_unset_is_none() {
        let repo = setup_test_db().await;

        let payday = repo.get_payday().await.expect("Should read payday");

        assert_eq!(payday, None);
    }

    #[tokio::test]
    async fn test_payday_round_trip() {
        let repo = setup_test_db().await;

        repo.set_payday(25).await.expect("Should store payday");

        assert_eq!(repo.get_payday().await.unwrap(), Some(25));
    }

    #[tokio::test]
    async fn test_payday_overwrite() {
        let repo = setup_test_db().await;

        repo.set_payday(25).await.expect("Should store payday");
        repo.set_payday(1).await.expect("Should replace payday");

        assert_eq!(repo.get_payday().await.unwrap(), Some(1));
    }

    // =========================================================================
    // income lines
    // =========================================================================

    #[tokio::test]
    async fn test_create_and_get_income_line() {
        let repo = setup_test_db().await;

        let created = repo
            .create_income_line(NewIncomeLine {
                label: "Salary".to_string(),
                amount: dec!(3200.00),
            })
            .await
            .expect("Should create income line");

        assert!(created.id > 0);
        assert_eq!(created.label, "Salary");
        assert_eq!(created.amount, dec!(3200.00));

        let fetched = repo
            .get_income_line(created.id)
            .await
            .expect("Should fetch income line");
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.amount, dec!(3200.00));
    }

    #[tokio::test]
    async fn test_get_income_line_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_income_line(999).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_update_income_line() {
        let repo = setup_test_db().await;

        let mut created = repo
            .create_income_line(NewIncomeLine {
                label: "Salary".to_string(),
                amount: dec!(3200.00),
            })
            .await
            .expect("Should create income line");

        created.label = "Main salary".to_string();
        created.amount = dec!(3400.00);

        repo.update_income_line(&created)
            .await
            .expect("Should update income line");

        let fetched = repo.get_income_line(created.id).await.unwrap();
        assert_eq!(fetched.label, "Main salary");
        assert_eq!(fetched.amount, dec!(3400.00));
    }

    #[tokio::test]
    async fn test_update_income_line_not_found() {
        let repo = setup_test_db().await;

        let mut created = repo
            .create_income_line(NewIncomeLine {
                label: "Salary".to_string(),
                amount: dec!(3200.00),
            })
            .await
            .expect("Should create income line");
        created.id = 999;

        let result = repo.update_income_line(&created).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_income_line() {
        let repo = setup_test_db().await;

        let created = repo
            .create_income_line(NewIncomeLine {
                label: "Side income".to_string(),
                amount: dec!(250.00),
            })
            .await
            .expect("Should create income line");

        repo.delete_income_line(created.id)
            .await
            .expect("Should delete income line");

        assert_eq!(
            repo.get_income_line(created.id).await,
            Err(RepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_list_income_lines_in_insertion_order() {
        let repo = setup_test_db().await;

        for (label, amount) in [("Salary", dec!(3200.00)), ("Side income", dec!(250.00))] {
            repo.create_income_line(NewIncomeLine {
                label: label.to_string(),
                amount,
            })
            .await
            .expect("Should create income line");
        }

        let lines = repo.list_income_lines().await.expect("Should list");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, "Salary");
        assert_eq!(lines[1].label, "Side income");
    }

    // =========================================================================
    // fixed expenses
    // =========================================================================

    #[tokio::test]
    async fn test_create_and_list_fixed_expenses() {
        let repo = setup_test_db().await;

        let created = repo
            .create_fixed_expense(NewFixedExpense {
                label: "Rent".to_string(),
                amount: dec!(1200.00),
            })
            .await
            .expect("Should create fixed expense");

        assert_eq!(created.label, "Rent");
        assert_eq!(created.amount, dec!(1200.00));

        let all = repo.list_fixed_expenses().await.expect("Should list");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_update_fixed_expense() {
        let repo = setup_test_db().await;

        let mut created = repo
            .create_fixed_expense(NewFixedExpense {
                label: "Rent".to_string(),
                amount: dec!(1200.00),
            })
            .await
            .expect("Should create fixed expense");

        created.amount = dec!(1250.00);
        repo.update_fixed_expense(&created)
            .await
            .expect("Should update fixed expense");

        let fetched = repo.get_fixed_expense(created.id).await.unwrap();
        assert_eq!(fetched.amount, dec!(1250.00));
    }

    #[tokio::test]
    async fn test_delete_fixed_expense_not_found() {
        let repo = setup_test_db().await;

        let result = repo.delete_fixed_expense(42).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    // =========================================================================
    // categories
    // =========================================================================

    #[tokio::test]
    async fn test_add_category_is_idempotent() {
        let repo = setup_test_db().await;

        repo.add_category("Groceries").await.expect("Should add");
        repo.add_category("Groceries").await.expect("Should ignore duplicate");

        let categories = repo.list_categories().await.expect("Should list");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Groceries");
    }

    #[tokio::test]
    async fn test_list_categories_sorted_by_name() {
        let repo = setup_test_db().await;

        repo.add_category("Transport").await.expect("Should add");
        repo.add_category("Fuel").await.expect("Should add");

        let categories = repo.list_categories().await.expect("Should list");

        assert_eq!(categories[0].name, "Fuel");
        assert_eq!(categories[1].name, "Transport");
    }

    // =========================================================================
    // day entries
    // =========================================================================

    #[tokio::test]
    async fn test_add_and_list_day_entries() {
        let repo = setup_test_db().await;
        let day = test_date(2025, 6, 26);

        let created = repo
            .add_day_entry(NewDayEntry {
                cycle_key: "2025-06-25".to_string(),
                entry_date: day,
                category: "Eating out".to_string(),
                amount: dec!(18.00),
                note: Some("lunch".to_string()),
            })
            .await
            .expect("Should add entry");

        assert!(created.id > 0);
        assert_eq!(created.cycle_key, "2025-06-25");
        assert_eq!(created.entry_date, day);
        assert_eq!(created.category, "Eating out");
        assert_eq!(created.amount, dec!(18.00));
        assert_eq!(created.note.as_deref(), Some("lunch"));

        let entries = repo
            .list_day_entries("2025-06-25", day)
            .await
            .expect("Should list day");
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_list_cycle_entries_is_scoped_to_cycle() {
        let repo = setup_test_db().await;

        repo.add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 26), dec!(10)))
            .await
            .expect("Should add entry");
        repo.add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 27), dec!(20)))
            .await
            .expect("Should add entry");
        repo.add_day_entry(test_entry("2025-05-25", test_date(2025, 5, 26), dec!(30)))
            .await
            .expect("Should add entry");

        let entries = repo
            .list_cycle_entries("2025-06-25")
            .await
            .expect("Should list cycle");

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.cycle_key == "2025-06-25"));
        // Ordered by date.
        assert_eq!(entries[0].entry_date, test_date(2025, 6, 26));
        assert_eq!(entries[1].entry_date, test_date(2025, 6, 27));
    }

    #[tokio::test]
    async fn test_update_day_entry() {
        let repo = setup_test_db().await;

        let mut created = repo
            .add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 26), dec!(10)))
            .await
            .expect("Should add entry");

        created.category = "Other".to_string();
        created.amount = dec!(12.50);
        created.note = Some("corrected".to_string());

        repo.update_day_entry(&created)
            .await
            .expect("Should update entry");

        let entries = repo
            .list_day_entries("2025-06-25", test_date(2025, 6, 26))
            .await
            .unwrap();
        assert_eq!(entries[0].category, "Other");
        assert_eq!(entries[0].amount, dec!(12.50));
        assert_eq!(entries[0].note.as_deref(), Some("corrected"));
    }

    #[tokio::test]
    async fn test_delete_day_entry() {
        let repo = setup_test_db().await;

        let created = repo
            .add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 26), dec!(10)))
            .await
            .expect("Should add entry");

        repo.delete_day_entry(created.id)
            .await
            .expect("Should delete entry");

        let entries = repo
            .list_day_entries("2025-06-25", test_date(2025, 6, 26))
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_delete_day_entry_not_found() {
        let repo = setup_test_db().await;

        let result = repo.delete_day_entry(999).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_clear_day_removes_only_that_day() {
        let repo = setup_test_db().await;

        repo.add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 26), dec!(10)))
            .await
            .expect("Should add entry");
        repo.add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 26), dec!(15)))
            .await
            .expect("Should add entry");
        repo.add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 27), dec!(20)))
            .await
            .expect("Should add entry");

        repo.clear_day("2025-06-25", test_date(2025, 6, 26))
            .await
            .expect("Should clear day");

        let remaining = repo.list_cycle_entries("2025-06-25").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].entry_date, test_date(2025, 6, 27));
    }

    #[tokio::test]
    async fn test_clear_cycle_keeps_other_cycles() {
        let repo = setup_test_db().await;

        repo.add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 26), dec!(10)))
            .await
            .expect("Should add entry");
        repo.add_day_entry(test_entry("2025-05-25", test_date(2025, 5, 26), dec!(30)))
            .await
            .expect("Should add entry");

        repo.clear_cycle("2025-06-25")
            .await
            .expect("Should clear cycle");

        assert!(repo.list_cycle_entries("2025-06-25").await.unwrap().is_empty());
        assert_eq!(repo.list_cycle_entries("2025-05-25").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_cycle_leaves_income_and_fixed_lines() {
        let repo = setup_test_db().await;

        repo.create_income_line(NewIncomeLine {
            label: "Salary".to_string(),
            amount: dec!(3200.00),
        })
        .await
        .expect("Should create income line");
        repo.create_fixed_expense(NewFixedExpense {
            label: "Rent".to_string(),
            amount: dec!(1200.00),
        })
        .await
        .expect("Should create fixed expense");
        repo.add_day_entry(test_entry("2025-06-25", test_date(2025, 6, 26), dec!(10)))
            .await
            .expect("Should add entry");

        repo.clear_cycle("2025-06-25")
            .await
            .expect("Should clear cycle");

        assert_eq!(repo.list_income_lines().await.unwrap().len(), 1);
        assert_eq!(repo.list_fixed_expenses().await.unwrap().len(), 1);
    }
}
