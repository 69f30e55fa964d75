mod category;
mod day_entry;
mod debt_account;
mod fixed_expense;
mod income_line;

pub use category::{Category, DEFAULT_CATEGORIES};
pub use day_entry::{DayEntry, NewDayEntry};
pub use debt_account::DebtAccount;
pub use fixed_expense::{FixedExpense, NewFixedExpense};
pub use income_line::{IncomeLine, NewIncomeLine};
