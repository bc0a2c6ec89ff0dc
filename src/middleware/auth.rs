use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::db::{queries, AppState};
use crate::error::AppError;
use crate::models::User;

/// The authenticated principal for a request.
///
/// Inserted by [`require_auth`] and consumed explicitly by every handler;
/// ownership scoping always goes through `user_id()`, never through any
/// ambient state.
#[derive(Clone)]
pub struct AuthContext {
    pub user: User,
}

impl AuthContext {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Resolve the Bearer API token to a user and attach an `AuthContext`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or(AppError::Unauthorized)?;

    // Release the pooled connection before running the handler, which
    // acquires its own; holding it here deadlocks a single-connection pool.
    let user = {
        let conn = state.db.get()?;
        queries::get_user_by_token(&conn, &token)?.ok_or(AppError::Unauthorized)?
    };

    request.extensions_mut().insert(AuthContext { user });

    Ok(next.run(request).await)
}
