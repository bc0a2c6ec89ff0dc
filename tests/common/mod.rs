//! Test utilities and fixtures for cardbox integration tests

#![allow(dead_code)]

use axum::Router;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

pub use cardbox::db::{init_db, queries, AppState, DbPool};
pub use cardbox::models::*;

/// Create an in-memory test database with schema initialized
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

/// App state over a single-connection in-memory pool. One connection keeps
/// fixtures and handlers on the same database.
pub fn setup_test_state() -> AppState {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("Failed to build pool");
    {
        let conn = pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize schema");
    }
    AppState { db: pool }
}

/// Router wired like the production app (auth middleware included)
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .merge(cardbox::handlers::router(state.clone()))
        .with_state(state)
}

/// Create a test user, returning the user and their raw API token
pub fn create_test_user(conn: &Connection, email: &str) -> (User, String) {
    let input = CreateUser {
        name: format!("Test User {}", email),
        email: email.to_string(),
    };
    queries::create_user(conn, &input).expect("Failed to create test user")
}

/// Create an active test card
pub fn create_test_card(conn: &Connection, user_id: i64, card_type: &str) -> DebitCard {
    queries::create_debit_card(conn, user_id, card_type).expect("Failed to create test card")
}

/// Create a card with `disabled_at` pre-set
pub fn create_disabled_card(conn: &Connection, user_id: i64) -> DebitCard {
    let card = create_test_card(conn, user_id, "visa");
    queries::set_debit_card_active(conn, user_id, card.id, false)
        .expect("Failed to disable test card")
        .expect("card should exist")
}

/// Create a card whose expiration date is already in the past,
/// with `disabled_at` untouched
pub fn create_expired_card(conn: &Connection, user_id: i64) -> DebitCard {
    let card = create_test_card(conn, user_id, "visa");
    conn.execute(
        "UPDATE debit_cards SET expiration_date = created_at - 1 WHERE id = ?1",
        [card.id],
    )
    .expect("Failed to backdate test card");
    queries::get_debit_card(conn, user_id, card.id)
        .expect("Query failed")
        .expect("card should exist")
}

/// Record a transaction against a card
pub fn create_test_transaction(conn: &Connection, card_id: i64) -> DebitCardTransaction {
    let input = CreateDebitCardTransaction {
        debit_card_id: card_id,
        amount_cents: 1299,
        currency: "usd".to_string(),
    };
    queries::create_debit_card_transaction(conn, &input)
        .expect("Failed to create test transaction")
}
