use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A customer's debit card as stored.
///
/// `disabled_at` and `deleted_at` are independent soft flags:
/// a disabled card can be re-activated, a deleted card is gone for good
/// (the row is retained for audit queries only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitCard {
    pub id: i64,
    pub user_id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub card_type: String,
    /// Fixed at creation to creation time + 1 year, never recomputed.
    pub expiration_date: i64,
    pub disabled_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

/// Lifecycle state of a card. Deleted is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Active,
    Disabled,
    Deleted,
}

impl DebitCard {
    pub fn state(&self) -> CardState {
        if self.deleted_at.is_some() {
            CardState::Deleted
        } else if self.disabled_at.is_some() {
            CardState::Disabled
        } else {
            CardState::Active
        }
    }

    /// A card is active when it is not disabled, not deleted, and not past
    /// its expiration date. Expiration affects only this derived read;
    /// it never writes `disabled_at`.
    pub fn is_active(&self, now: i64) -> bool {
        self.state() == CardState::Active && self.expiration_date > now
    }
}

/// Request body for creating a card. Any other supplied fields
/// (expiration_date, user_id, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateDebitCard {
    #[serde(rename = "type")]
    pub card_type: Option<String>,
}

impl CreateDebitCard {
    pub fn validate(&self) -> Result<&str> {
        match self.card_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(AppError::validation("type", "The type field is required.")),
        }
    }
}

/// Request body for toggling a card's active state.
///
/// `is_active` is kept as a raw JSON value so a wrong-typed field produces
/// a field-level validation error instead of a body-level deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct UpdateDebitCard {
    #[serde(default)]
    pub is_active: Option<serde_json::Value>,
}

impl UpdateDebitCard {
    /// Strict boolean check: truthy strings and numbers are rejected.
    pub fn validate(&self) -> Result<bool> {
        match &self.is_active {
            Some(serde_json::Value::Bool(b)) => Ok(*b),
            Some(_) => Err(AppError::validation(
                "is_active",
                "The is active field must be true or false.",
            )),
            None => Err(AppError::validation(
                "is_active",
                "The is active field is required.",
            )),
        }
    }
}

/// Card representation returned by the API.
#[derive(Debug, Serialize)]
pub struct DebitCardResponse {
    pub id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub expiration_date: String,
    pub is_active: bool,
}

impl DebitCardResponse {
    pub fn from_card(card: &DebitCard, now: i64) -> Self {
        Self {
            id: card.id,
            number: card.number.clone(),
            card_type: card.card_type.clone(),
            expiration_date: format_timestamp(card.expiration_date),
            is_active: card.is_active(now),
        }
    }
}

/// Format a unix timestamp as "YYYY-MM-DD HH:MM:SS" (UTC).
pub fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
