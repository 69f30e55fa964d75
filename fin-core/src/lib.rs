pub mod calculations;
pub mod cycle;
pub mod dates;
pub mod db;
pub mod models;

pub use cycle::BudgetCycle;
pub use db::repository::{RepositoryError, TrackerRepository};
pub use models::*;
