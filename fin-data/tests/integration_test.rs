//! Integration tests for budget line loading using the actual database backend.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

use fin_core::TrackerRepository;
use fin_data::{BudgetLineLoader, BudgetLineLoaderError, BudgetLineRecord};
use fin_db_sqlite::SqliteRepository;

const TEST_CSV: &str = include_str!("../test-data/budget_lines.csv");

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

#[tokio::test]
async fn test_load_all_budget_lines() {
    let repo = setup_test_db().await;

    let records = BudgetLineLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let inserted = BudgetLineLoader::load(&repo, &records)
        .await
        .expect("Failed to load budget lines");

    assert_eq!(inserted, 5);
}

#[tokio::test]
async fn test_load_and_retrieve_income_lines() {
    let repo = setup_test_db().await;

    let records = BudgetLineLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    BudgetLineLoader::load(&repo, &records)
        .await
        .expect("Failed to load budget lines");

    let income = repo
        .list_income_lines()
        .await
        .expect("Failed to list income lines");

    assert_eq!(income.len(), 2);
    assert_eq!(income[0].label, "Salary");
    assert_eq!(income[0].amount, dec!(3200));
    assert_eq!(income[1].label, "Side income");
    assert_eq!(income[1].amount, dec!(250.50));
}

#[tokio::test]
async fn test_load_and_retrieve_fixed_expenses() {
    let repo = setup_test_db().await;

    let records = BudgetLineLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    BudgetLineLoader::load(&repo, &records)
        .await
        .expect("Failed to load budget lines");

    let fixed = repo
        .list_fixed_expenses()
        .await
        .expect("Failed to list fixed expenses");

    assert_eq!(fixed.len(), 3);
    assert_eq!(fixed[0].label, "Rent");
    assert_eq!(fixed[0].amount, dec!(1200));
}

#[tokio::test]
async fn test_load_registers_fixed_labels_as_categories() {
    let repo = setup_test_db().await;

    let records = BudgetLineLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    BudgetLineLoader::load(&repo, &records)
        .await
        .expect("Failed to load budget lines");

    let categories = repo
        .list_categories()
        .await
        .expect("Failed to list categories");

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Insurance", "Rent", "Utilities"]);
}

#[tokio::test]
async fn test_invalid_kind_loads_nothing() {
    let repo = setup_test_db().await;

    let records = vec![
        BudgetLineRecord {
            kind: "income".to_string(),
            label: "Salary".to_string(),
            amount: dec!(3200),
        },
        BudgetLineRecord {
            kind: "expense".to_string(),
            label: "Rent".to_string(),
            amount: dec!(1200),
        },
    ];

    let result = BudgetLineLoader::load(&repo, &records).await;

    assert!(matches!(result, Err(BudgetLineLoaderError::InvalidKind(_))));
    // Validation happens before any insert, so the valid record must not
    // have been written either.
    assert!(repo.list_income_lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_negative_amount_is_rejected() {
    let repo = setup_test_db().await;

    let records = vec![BudgetLineRecord {
        kind: "fixed".to_string(),
        label: "Rent".to_string(),
        amount: dec!(-1),
    }];

    let result = BudgetLineLoader::load(&repo, &records).await;

    assert!(matches!(
        result,
        Err(BudgetLineLoaderError::NegativeAmount { label }) if label == "Rent"
    ));
}

#[tokio::test]
async fn test_empty_label_is_rejected_with_record_number() {
    let repo = setup_test_db().await;

    let records = vec![BudgetLineRecord {
        kind: "income".to_string(),
        label: "   ".to_string(),
        amount: dec!(100),
    }];

    let result = BudgetLineLoader::load(&repo, &records).await;

    assert!(matches!(
        result,
        Err(BudgetLineLoaderError::EmptyLabel { record: 1 })
    ));
}
