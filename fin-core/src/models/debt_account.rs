use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One debt as entered by the user: a balance, its APR and the contractual
/// minimum monthly payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtAccount {
    pub name: String,
    pub balance: Decimal,
    pub apr_pct: Decimal,
    pub min_payment: Decimal,
}
