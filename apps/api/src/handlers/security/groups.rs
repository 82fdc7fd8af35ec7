use barberdesk_application::CreateGroupInput;

use super::*;

pub async fn list_groups_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
) -> ApiResult<Json<Vec<GroupResponse>>> {
    let groups = state
        .security_admin_service
        .list_groups(actor.id)
        .await?
        .into_iter()
        .map(GroupResponse::from)
        .collect();

    Ok(Json(groups))
}

pub async fn create_group_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Json(payload): Json<CreateGroupRequest>,
) -> ApiResult<(StatusCode, Json<GroupResponse>)> {
    let group = state
        .security_admin_service
        .create_group(
            actor.id,
            CreateGroupInput {
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

pub async fn set_group_active_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> ApiResult<Json<GroupResponse>> {
    let group = state
        .security_admin_service
        .set_group_active(actor.id, GroupId::from_uuid(group_id), payload.is_active)
        .await?;

    Ok(Json(GroupResponse::from(group)))
}

pub async fn list_group_members_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<Vec<GroupMemberResponse>>> {
    let members = state
        .security_admin_service
        .list_group_members(actor.id, GroupId::from_uuid(group_id))
        .await?
        .into_iter()
        .map(GroupMemberResponse::from)
        .collect();

    Ok(Json(members))
}

pub async fn add_group_member_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<AddGroupMemberRequest>,
) -> ApiResult<(StatusCode, Json<GroupMemberResponse>)> {
    let member = state
        .security_admin_service
        .add_group_member(
            actor.id,
            GroupId::from_uuid(group_id),
            UserId::from_uuid(payload.user_id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(GroupMemberResponse::from(member))))
}

pub async fn remove_group_member_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .remove_group_member(
            actor.id,
            GroupId::from_uuid(group_id),
            UserId::from_uuid(user_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
