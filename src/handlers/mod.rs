mod debit_cards;

pub use debit_cards::*;

use axum::{middleware, routing::get, Router};

use crate::db::AppState;
use crate::middleware::require_auth;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/debit-cards", get(list_debit_cards).post(create_debit_card))
        .route(
            "/debit-cards/{id}",
            get(show_debit_card)
                .put(update_debit_card)
                .patch(update_debit_card)
                .delete(destroy_debit_card),
        )
        .layer(middleware::from_fn_with_state(state, require_auth))
}
