use axum::Json;
use axum::extract::{Extension, State};

use crate::dto::PermissionsResponse;
use crate::error::{ApiError, ApiResult};
use crate::middleware::CallerIdentity;
use crate::state::AppState;

/// Returns the effective per-menu permissions of the caller.
///
/// The caller is mirrored into the local directory before resolution, so a
/// first request after sign-up already sees its (empty) permission map.
pub async fn permissions_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> ApiResult<Json<PermissionsResponse>> {
    let identity = caller.0.ok_or_else(ApiError::unauthorized)?;

    let user = state
        .directory_sync_service
        .sync_user(&identity)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(ApiError::user_not_found)?;

    let permissions = state
        .authorization_service
        .resolve_permissions(user.id)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(PermissionsResponse::new(&user, &permissions)))
}
