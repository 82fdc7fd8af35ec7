use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use barberdesk_application::UserRecord;
use barberdesk_core::AppError;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub token: String,
}

/// Adds the caller to the seeded administrators group when the token matches.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    let token_matches = state
        .bootstrap_token
        .as_deref()
        .is_some_and(|expected| expected == payload.token);
    if !token_matches {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    state
        .security_admin_service
        .bootstrap_administrator(user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
