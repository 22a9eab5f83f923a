use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::TransactionId;

/// Represents a single row from the transactions CSV file.
///
/// Rules only read from a transaction, they never change it. The `payer_bank`
/// field is what `country` clauses are compared against.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction reference, e.g. `TX-000123`.
    #[serde(rename = "id")]
    pub transaction_id: TransactionId,
    pub amount: Decimal,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Origination channel such as `Web`, `Mobile` or `POS`.
    pub channel: String,
    /// Payment rail such as `UPI`, `Card` or `NEFT`.
    pub payment_mode: String,
    pub payer_bank: String,
    #[serde(default)]
    pub payee_bank: Option<String>
}
