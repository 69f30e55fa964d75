use async_trait::async_trait;

use fin_core::db::repository::{RepositoryError, TrackerRepository};
use fin_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`fin_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use fin_core::db::RepositoryRegistry;
/// use fin_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted connection-string values are anything sqlx understands:
    /// * `sqlite:budget.db?mode=rwc` — a file, created if missing.
    /// * `sqlite::memory:` / `:memory:` — an ephemeral in-memory database
    ///   (useful for tests).
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn TrackerRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}
