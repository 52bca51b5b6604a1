//! Routes for the authenticated caller

use axum::{Json, Router, extract::State, routing::get};
use tourgate_auth::{AuthError, AuthUser};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

use super::types::MeResponse;

/// GET /api/me
async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<MeResponse>, ApiError> {
    let record = state
        .bounded_storage("load user", state.users.get_user_by_id(&user.user_id))
        .await??;

    // A valid token for a user that no longer exists authenticates nobody.
    let record = record.ok_or_else(|| {
        warn!("Token subject {} has no user record", user.user_id);
        ApiError::Auth(AuthError::InvalidToken)
    })?;

    Ok(Json(MeResponse {
        user_id: record.id,
        name: record.name,
        username: record.username,
        email: record.email,
        created_at: record.created_at.to_rfc3339(),
    }))
}

/// Create routes that expect the access gate in front of them
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/me", get(me))
}
