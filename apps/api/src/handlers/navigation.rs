use axum::Json;
use axum::extract::{Extension, State};
use barberdesk_application::UserRecord;

use crate::dto::NavigationNodeResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn navigation_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
) -> ApiResult<Json<Vec<NavigationNodeResponse>>> {
    let nodes = state
        .authorization_service
        .navigation_for_user(user.id)
        .await?
        .into_iter()
        .map(NavigationNodeResponse::from)
        .collect();

    Ok(Json(nodes))
}
