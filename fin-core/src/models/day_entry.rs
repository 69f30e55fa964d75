use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single spend entry on one day of one budget cycle.
///
/// `cycle_key` is the ISO date of the owning cycle's first day; entries never
/// move between cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub id: i64,
    pub cycle_key: String,
    pub entry_date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// For creating new day entries (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDayEntry {
    pub cycle_key: String,
    pub entry_date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub note: Option<String>,
}
