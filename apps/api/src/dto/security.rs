use barberdesk_application::{
    GroupMemberRecord, GroupRecord, MenuGrantRecord, MenuRecord, UserRecord,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::MenuPermissionsResponse;

/// Incoming payload for toggling an active flag.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-active-request.ts"
)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Incoming payload for group creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-group-request.ts"
)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Incoming payload for adding a group member.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/add-group-member-request.ts"
)]
pub struct AddGroupMemberRequest {
    #[ts(type = "string")]
    pub user_id: Uuid,
}

/// Incoming payload for menu creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-menu-request.ts"
)]
pub struct CreateMenuRequest {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Incoming payload for saving a menu grant.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-menu-grant-request.ts"
)]
pub struct SaveMenuGrantRequest {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub delete: bool,
}

/// API representation of a local user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// API representation of a group.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/group-response.ts"
)]
pub struct GroupResponse {
    pub group_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// API representation of a group membership.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/group-member-response.ts"
)]
pub struct GroupMemberResponse {
    pub group_id: String,
    pub user_id: String,
    pub email: String,
    pub assigned_by: Option<String>,
    pub assigned_at: String,
}

/// API representation of a menu.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/menu-response.ts"
)]
pub struct MenuResponse {
    pub menu_id: String,
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub parent_id: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

/// API representation of a menu grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/menu-grant-response.ts"
)]
pub struct MenuGrantResponse {
    pub menu_id: String,
    pub group_id: String,
    pub group_name: String,
    pub permissions: MenuPermissionsResponse,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            image_url: user.image_url,
            is_active: user.is_active,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

impl From<GroupRecord> for GroupResponse {
    fn from(group: GroupRecord) -> Self {
        Self {
            group_id: group.id.to_string(),
            name: group.name,
            description: group.description,
            is_active: group.is_active,
            created_at: group.created_at.to_rfc3339(),
        }
    }
}

impl From<GroupMemberRecord> for GroupMemberResponse {
    fn from(member: GroupMemberRecord) -> Self {
        Self {
            group_id: member.group_id.to_string(),
            user_id: member.user_id.to_string(),
            email: member.email,
            assigned_by: member.assigned_by.map(|user_id| user_id.to_string()),
            assigned_at: member.assigned_at.to_rfc3339(),
        }
    }
}

impl From<MenuRecord> for MenuResponse {
    fn from(menu: MenuRecord) -> Self {
        Self {
            menu_id: menu.id.to_string(),
            name: menu.name,
            path: menu.path,
            icon: menu.icon,
            parent_id: menu.parent_id.map(|parent_id| parent_id.to_string()),
            sort_order: menu.sort_order,
            is_active: menu.is_active,
        }
    }
}

impl From<MenuGrantRecord> for MenuGrantResponse {
    fn from(grant: MenuGrantRecord) -> Self {
        Self {
            menu_id: grant.menu_id.to_string(),
            group_id: grant.group_id.to_string(),
            group_name: grant.group_name,
            permissions: grant.capabilities.into(),
            created_at: grant.created_at.to_rfc3339(),
        }
    }
}
