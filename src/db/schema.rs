use rusqlite::Connection;

/// Initialize the database schema
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Customers (the authenticated principals)
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            token_hash TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_users_token ON users(token_hash);

        -- Debit cards
        -- Soft delete: deleted_at = timestamp when deleted, NULL = live
        -- disabled_at: NULL = enabled, timestamp = deactivated at that instant
        -- expiration_date is fixed at creation (creation time + 1 year)
        CREATE TABLE IF NOT EXISTS debit_cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            number TEXT NOT NULL,
            card_type TEXT NOT NULL,
            expiration_date INTEGER NOT NULL,
            disabled_at INTEGER,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            deleted_at INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_debit_cards_user ON debit_cards(user_id);
        CREATE INDEX IF NOT EXISTS idx_debit_cards_live ON debit_cards(id) WHERE deleted_at IS NULL;

        -- Card transactions (referenced by the delete guard)
        CREATE TABLE IF NOT EXISTS debit_card_transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            debit_card_id INTEGER NOT NULL REFERENCES debit_cards(id),
            amount_cents INTEGER NOT NULL,
            currency TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_card_transactions_card ON debit_card_transactions(debit_card_id);
        "#,
    )
}
