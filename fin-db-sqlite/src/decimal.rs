use fin_core::RepositoryError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Row, TypeInfo, ValueRef};

/// Get a decimal value from a row, handling both INTEGER and REAL SQLite types.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        "NULL" => Ok(Decimal::ZERO),
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

/// Get an optional decimal value from a row, returning None for NULL values.
pub fn get_optional_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Option<Decimal>, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Ok(None);
    }

    get_decimal(row, column).map(Some)
}

/// Convert a Decimal to f64 for SQLite storage.
pub fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn create_test_table(pool: &sqlx::sqlite::SqlitePool) {
        sqlx::query(
            "CREATE TABLE test_decimals (
                id INTEGER PRIMARY KEY,
                int_value INTEGER,
                real_value REAL,
                null_value REAL
            )",
        )
        .execute(pool)
        .await
        .expect("Failed to create test table");
    }

    async fn setup_test_db() -> sqlx::sqlite::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        create_test_table(&pool).await;
        pool
    }

    #[tokio::test]
    async fn test_get_decimal_from_integer() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, int_value) VALUES (1, 12345)")
            .execute(&pool)
            .await
            .expect("Failed to insert");

        let row = sqlx::query("SELECT int_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch");

        let result = get_decimal(&row, "int_value").expect("Should read INTEGER");
        assert_eq!(result, dec!(12345));
    }

    #[tokio::test]
    async fn test_get_decimal_from_real() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, real_value) VALUES (1, 123.45)")
            .execute(&pool)
            .await
            .expect("Failed to insert");

        let row = sqlx::query("SELECT real_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch");

        let result = get_decimal(&row, "real_value").expect("Should read REAL");
        assert_eq!(result, dec!(123.45));
    }

    #[tokio::test]
    async fn test_get_decimal_null_is_zero() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id) VALUES (1)")
            .execute(&pool)
            .await
            .expect("Failed to insert");

        let row = sqlx::query("SELECT null_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch");

        let result = get_decimal(&row, "null_value").expect("Should tolerate NULL");
        assert_eq!(result, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_get_optional_decimal_null_is_none() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id) VALUES (1)")
            .execute(&pool)
            .await
            .expect("Failed to insert");

        let row = sqlx::query("SELECT null_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch");

        let result = get_optional_decimal(&row, "null_value").expect("Should tolerate NULL");
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_get_optional_decimal_present_value() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, real_value) VALUES (1, 9.5)")
            .execute(&pool)
            .await
            .expect("Failed to insert");

        let row = sqlx::query("SELECT real_value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch");

        let result = get_optional_decimal(&row, "real_value").expect("Should read REAL");
        assert_eq!(result, Some(dec!(9.5)));
    }

    #[test]
    fn test_decimal_to_f64_round_trip() {
        assert_eq!(decimal_to_f64(dec!(123.45)), 123.45);
        assert_eq!(decimal_to_f64(dec!(0)), 0.0);
    }
}
