pub mod loader;

pub use loader::{BudgetLineLoader, BudgetLineLoaderError, BudgetLineRecord, LineKind};
