use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use barberdesk_application::UserRecord;
use barberdesk_domain::{GroupId, MenuId, UserId};
use uuid::Uuid;

use crate::dto::{
    AddGroupMemberRequest, CreateGroupRequest, CreateMenuRequest, GroupMemberResponse,
    GroupResponse, MenuGrantResponse, MenuResponse, SaveMenuGrantRequest, SetActiveRequest,
    UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod groups;
mod menus;
mod users;

pub use groups::{
    add_group_member_handler, create_group_handler, list_group_members_handler,
    list_groups_handler, remove_group_member_handler, set_group_active_handler,
};
pub use menus::{
    create_menu_handler, list_menu_grants_handler, list_menus_handler, save_menu_grant_handler,
    set_menu_active_handler,
};
pub use users::{list_users_handler, set_user_active_handler};
