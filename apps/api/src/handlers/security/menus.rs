use barberdesk_application::{CreateMenuInput, SaveMenuGrantInput};
use barberdesk_domain::CapabilitySet;

use super::*;

pub async fn list_menus_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
) -> ApiResult<Json<Vec<MenuResponse>>> {
    let menus = state
        .security_admin_service
        .list_menus(actor.id)
        .await?
        .into_iter()
        .map(MenuResponse::from)
        .collect();

    Ok(Json(menus))
}

pub async fn create_menu_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Json(payload): Json<CreateMenuRequest>,
) -> ApiResult<(StatusCode, Json<MenuResponse>)> {
    let menu = state
        .security_admin_service
        .create_menu(
            actor.id,
            CreateMenuInput {
                name: payload.name,
                path: payload.path,
                icon: payload.icon,
                parent_id: payload.parent_id.map(MenuId::from_uuid),
                sort_order: payload.sort_order,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MenuResponse::from(menu))))
}

pub async fn set_menu_active_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path(menu_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> ApiResult<Json<MenuResponse>> {
    let menu = state
        .security_admin_service
        .set_menu_active(actor.id, MenuId::from_uuid(menu_id), payload.is_active)
        .await?;

    Ok(Json(MenuResponse::from(menu)))
}

pub async fn list_menu_grants_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path(menu_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MenuGrantResponse>>> {
    let grants = state
        .security_admin_service
        .list_menu_grants(actor.id, MenuId::from_uuid(menu_id))
        .await?
        .into_iter()
        .map(MenuGrantResponse::from)
        .collect();

    Ok(Json(grants))
}

pub async fn save_menu_grant_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<UserRecord>,
    Path((menu_id, group_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SaveMenuGrantRequest>,
) -> ApiResult<Json<MenuGrantResponse>> {
    let grant = state
        .security_admin_service
        .save_menu_grant(
            actor.id,
            SaveMenuGrantInput {
                menu_id: MenuId::from_uuid(menu_id),
                group_id: GroupId::from_uuid(group_id),
                capabilities: CapabilitySet::new(
                    payload.read,
                    payload.write,
                    payload.update,
                    payload.delete,
                ),
            },
        )
        .await?;

    Ok(Json(MenuGrantResponse::from(grant)))
}
