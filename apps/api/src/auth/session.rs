use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode};
use barberdesk_core::{AppError, ExternalIdentity};
use tower_sessions::Session;

use crate::dto::IdentityResponse;
use crate::error::{ApiError, ApiResult};
use crate::middleware::bearer_token;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_IDENTITY_KEY};

/// Exchanges a provider bearer token for a server session.
pub async fn session_exchange_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> ApiResult<Json<IdentityResponse>> {
    let token = bearer_token(&headers).ok_or_else(ApiError::unauthorized)?;
    let identity = state
        .identity_provider
        .verify_session_token(token)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_IDENTITY_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    tracing::info!(subject = identity.subject(), "established session");
    Ok(Json(IdentityResponse::from(&identity)))
}

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let subject = session
        .get::<ExternalIdentity>(SESSION_IDENTITY_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .map(|identity| identity.subject().to_owned());

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(subject) = subject {
        tracing::info!(%subject, "ended session");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    Extension(identity): Extension<ExternalIdentity>,
) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(&identity))
}
