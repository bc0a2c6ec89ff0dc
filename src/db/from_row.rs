//! Row mapping trait and helpers for reducing boilerplate in queries.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::models::*;

/// Trait for constructing a type from a database row.
///
/// Implementing this trait allows using the `query_one` and `query_all`
/// helper functions, reducing repetitive row mapping closures.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

/// Query for multiple results.
pub fn query_all<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ============ SQL SELECT Constants ============

pub const USER_COLS: &str = "id, name, email, token_hash, created_at, updated_at";

pub const DEBIT_CARD_COLS: &str =
    "id, user_id, number, card_type, expiration_date, disabled_at, created_at, updated_at, deleted_at";

pub const TRANSACTION_COLS: &str = "id, debit_card_id, amount_cents, currency, created_at";

// ============ FromRow Implementations ============

impl FromRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            token_hash: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

impl FromRow for DebitCard {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(DebitCard {
            id: row.get(0)?,
            user_id: row.get(1)?,
            number: row.get(2)?,
            card_type: row.get(3)?,
            expiration_date: row.get(4)?,
            disabled_at: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
            deleted_at: row.get(8)?,
        })
    }
}

impl FromRow for DebitCardTransaction {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(DebitCardTransaction {
            id: row.get(0)?,
            debit_card_id: row.get(1)?,
            amount_cents: row.get(2)?,
            currency: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}
