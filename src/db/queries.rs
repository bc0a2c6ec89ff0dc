use chrono::{DateTime, Months, Utc};
use rusqlite::{params, Connection};

use super::from_row::{query_all, query_one, DEBIT_CARD_COLS, TRANSACTION_COLS, USER_COLS};
use crate::error::Result;
use crate::models::*;
use crate::util::{generate_api_token, generate_card_number, hash_token};

fn now() -> i64 {
    Utc::now().timestamp()
}

/// Expiration timestamp for a card created at `created_at`:
/// one calendar year out.
fn expiration_for(created_at: i64) -> i64 {
    DateTime::from_timestamp(created_at, 0)
        .and_then(|d| d.checked_add_months(Months::new(12)))
        .map(|d| d.timestamp())
        .unwrap_or(created_at + 365 * 86_400)
}

// ============ Users ============

/// Create a user and their API token. The raw token is returned once;
/// only its hash is stored.
pub fn create_user(conn: &Connection, input: &CreateUser) -> Result<(User, String)> {
    let now = now();
    let email = input.email.trim().to_lowercase();
    let token = generate_api_token();
    let token_hash = hash_token(&token);

    conn.execute(
        "INSERT INTO users (name, email, token_hash, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![&input.name, &email, &token_hash, now, now],
    )?;

    let user = User {
        id: conn.last_insert_rowid(),
        name: input.name.clone(),
        email,
        token_hash,
        created_at: now,
        updated_at: now,
    };
    Ok((user, token))
}

/// Resolve an API token to its user.
pub fn get_user_by_token(conn: &Connection, token: &str) -> Result<Option<User>> {
    let hash = hash_token(token);
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE token_hash = ?1", USER_COLS),
        &[&hash],
    )
}

// ============ Debit cards ============

/// Create a debit card owned by `user_id`. The number is system-generated
/// and the expiration date is fixed to one year from now; callers cannot
/// supply either.
pub fn create_debit_card(conn: &Connection, user_id: i64, card_type: &str) -> Result<DebitCard> {
    let now = now();
    let number = generate_card_number();
    let expiration_date = expiration_for(now);

    conn.execute(
        "INSERT INTO debit_cards (user_id, number, card_type, expiration_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![user_id, &number, card_type, expiration_date, now, now],
    )?;

    Ok(DebitCard {
        id: conn.last_insert_rowid(),
        user_id,
        number,
        card_type: card_type.to_string(),
        expiration_date,
        disabled_at: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

/// All live cards owned by `user_id`. Cards of other users never appear.
pub fn list_debit_cards(conn: &Connection, user_id: i64) -> Result<Vec<DebitCard>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM debit_cards
             WHERE user_id = ?1 AND deleted_at IS NULL
             ORDER BY created_at DESC",
            DEBIT_CARD_COLS
        ),
        &[&user_id],
    )
}

/// Fetch one live card, scoped to its owner. A card owned by someone else
/// is indistinguishable from a missing one.
pub fn get_debit_card(conn: &Connection, user_id: i64, card_id: i64) -> Result<Option<DebitCard>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM debit_cards
             WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL",
            DEBIT_CARD_COLS
        ),
        &[&card_id, &user_id],
    )
}

/// Fetch a soft-deleted card (audit/historical path).
pub fn get_deleted_debit_card(conn: &Connection, card_id: i64) -> Result<Option<DebitCard>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM debit_cards WHERE id = ?1 AND deleted_at IS NOT NULL",
            DEBIT_CARD_COLS
        ),
        &[&card_id],
    )
}

/// Set or clear `disabled_at`. Idempotent: re-activating an active card or
/// re-deactivating a disabled one lands in the same state. Returns the
/// updated card, or None when no owned live card matched.
pub fn set_debit_card_active(
    conn: &Connection,
    user_id: i64,
    card_id: i64,
    active: bool,
) -> Result<Option<DebitCard>> {
    let now = now();
    let disabled_at: Option<i64> = if active { None } else { Some(now) };
    query_one(
        conn,
        &format!(
            "UPDATE debit_cards SET disabled_at = ?1, updated_at = ?2
             WHERE id = ?3 AND user_id = ?4 AND deleted_at IS NULL
             RETURNING {}",
            DEBIT_CARD_COLS
        ),
        &[&disabled_at, &now, &card_id, &user_id],
    )
}

/// Outcome of a guarded soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    HasTransactions,
    NotFound,
}

/// Soft-delete a card unless any transaction references it.
///
/// The guard check and the delete write run inside one SQLite transaction
/// so a transaction inserted between check and delete cannot slip through.
pub fn soft_delete_debit_card(
    conn: &mut Connection,
    user_id: i64,
    card_id: i64,
) -> Result<DeleteOutcome> {
    let tx = conn.transaction()?;

    let exists: bool = tx.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM debit_cards
            WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL
         )",
        params![card_id, user_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(DeleteOutcome::NotFound);
    }

    let has_transactions: bool = tx.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM debit_card_transactions WHERE debit_card_id = ?1
         )",
        params![card_id],
        |row| row.get(0),
    )?;
    if has_transactions {
        return Ok(DeleteOutcome::HasTransactions);
    }

    let now = now();
    tx.execute(
        "UPDATE debit_cards SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2",
        params![now, card_id],
    )?;
    tx.commit()?;

    Ok(DeleteOutcome::Deleted)
}

// ============ Transactions ============

/// Record a card transaction.
pub fn create_debit_card_transaction(
    conn: &Connection,
    input: &CreateDebitCardTransaction,
) -> Result<DebitCardTransaction> {
    let now = now();
    conn.execute(
        "INSERT INTO debit_card_transactions (debit_card_id, amount_cents, currency, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![input.debit_card_id, input.amount_cents, &input.currency, now],
    )?;

    Ok(DebitCardTransaction {
        id: conn.last_insert_rowid(),
        debit_card_id: input.debit_card_id,
        amount_cents: input.amount_cents,
        currency: input.currency.clone(),
        created_at: now,
    })
}

/// True when any transaction references the card.
pub fn transactions_exist_for_card(conn: &Connection, card_id: i64) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM debit_card_transactions WHERE debit_card_id = ?1
         )",
        params![card_id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// List transactions for a card, newest first.
pub fn list_transactions_for_card(
    conn: &Connection,
    card_id: i64,
) -> Result<Vec<DebitCardTransaction>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM debit_card_transactions
             WHERE debit_card_id = ?1 ORDER BY created_at DESC",
            TRANSACTION_COLS
        ),
        &[&card_id],
    )
}
