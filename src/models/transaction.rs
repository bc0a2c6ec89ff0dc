use serde::{Deserialize, Serialize};

/// A payment made with a debit card. Cards with transactions on record
/// cannot be deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitCardTransaction {
    pub id: i64,
    pub debit_card_id: i64,
    pub amount_cents: i64,
    pub currency: String,
    pub created_at: i64,
}

/// Data required to record a new transaction
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDebitCardTransaction {
    pub debit_card_id: i64,
    pub amount_cents: i64,
    pub currency: String,
}
