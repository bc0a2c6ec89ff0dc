use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::db::queries::{self, DeleteOutcome};
use crate::db::AppState;
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::middleware::AuthContext;
use crate::models::{CreateDebitCard, DebitCardResponse, UpdateDebitCard};

pub async fn list_debit_cards(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<DebitCardResponse>>> {
    let conn = state.db.get()?;
    let cards = queries::list_debit_cards(&conn, ctx.user_id())?;

    let now = Utc::now().timestamp();
    Ok(Json(
        cards
            .iter()
            .map(|card| DebitCardResponse::from_card(card, now))
            .collect(),
    ))
}

pub async fn create_debit_card(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(input): Json<CreateDebitCard>,
) -> Result<(StatusCode, Json<DebitCardResponse>)> {
    let card_type = input.validate()?;

    let conn = state.db.get()?;
    let card = queries::create_debit_card(&conn, ctx.user_id(), card_type)?;

    tracing::info!(user_id = ctx.user_id(), card_id = card.id, "debit card created");

    let now = Utc::now().timestamp();
    Ok((
        StatusCode::CREATED,
        Json(DebitCardResponse::from_card(&card, now)),
    ))
}

pub async fn show_debit_card(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> Result<Json<DebitCardResponse>> {
    let conn = state.db.get()?;
    // Non-owned and non-existent ids get the same NotFound
    let card = queries::get_debit_card(&conn, ctx.user_id(), card_id)?
        .ok_or_else(|| AppError::NotFound("Debit card not found".into()))?;

    let now = Utc::now().timestamp();
    Ok(Json(DebitCardResponse::from_card(&card, now)))
}

pub async fn update_debit_card(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(card_id): Path<i64>,
    Json(input): Json<UpdateDebitCard>,
) -> Result<Json<DebitCardResponse>> {
    // Validation fails before any mutation
    let active = input.validate()?;

    let conn = state.db.get()?;
    let card = queries::set_debit_card_active(&conn, ctx.user_id(), card_id, active)?
        .ok_or_else(|| AppError::NotFound("Debit card not found".into()))?;

    let now = Utc::now().timestamp();
    Ok(Json(DebitCardResponse::from_card(&card, now)))
}

pub async fn destroy_debit_card(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.db.get()?;

    match queries::soft_delete_debit_card(&mut conn, ctx.user_id(), card_id)? {
        DeleteOutcome::Deleted => {
            tracing::info!(user_id = ctx.user_id(), card_id, "debit card deleted");
            Ok(Json(serde_json::json!({ "success": true })))
        }
        DeleteOutcome::HasTransactions => Err(AppError::Conflict(
            "Debit card has transactions and cannot be deleted".into(),
        )),
        DeleteOutcome::NotFound => Err(AppError::NotFound("Debit card not found".into())),
    }
}
