use super::*;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .security_admin_service
        .list_users(actor.id)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn set_user_active_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .security_admin_service
        .set_user_active(actor.id, UserId::from_uuid(user_id), payload.is_active)
        .await?;

    Ok(Json(UserResponse::from(user)))
}
