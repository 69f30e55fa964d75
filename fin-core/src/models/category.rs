use serde::{Deserialize, Serialize};

/// A user-defined spending category, keyed by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

/// Categories every tracker starts with. User categories and fixed-expense
/// labels are merged with these at presentation time.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Groceries",
    "Fuel",
    "Eating out",
    "Transport",
    "Shopping",
    "Pharmacy",
    "Other",
];
