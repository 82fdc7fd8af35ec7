use std::collections::BTreeMap;

use barberdesk_application::UserRecord;
use barberdesk_domain::{CapabilitySet, PermissionMap};
use serde::Serialize;
use ts_rs::TS;

/// Effective flags of the caller on one menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/menu-permissions-response.ts"
)]
pub struct MenuPermissionsResponse {
    pub read: bool,
    pub write: bool,
    pub update: bool,
    pub delete: bool,
}

impl From<CapabilitySet> for MenuPermissionsResponse {
    fn from(capabilities: CapabilitySet) -> Self {
        Self {
            read: capabilities.read,
            write: capabilities.write,
            update: capabilities.update,
            delete: capabilities.delete,
        }
    }
}

/// Projection of the local user returned with the permission map.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permissions-user-response.ts"
)]
pub struct PermissionsUserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&UserRecord> for PermissionsUserResponse {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Response of `GET /api/permissions`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permissions-response.ts"
)]
pub struct PermissionsResponse {
    pub success: bool,
    pub permissions: BTreeMap<String, MenuPermissionsResponse>,
    pub user: PermissionsUserResponse,
}

impl PermissionsResponse {
    pub fn new(user: &UserRecord, permissions: &PermissionMap) -> Self {
        Self {
            success: true,
            permissions: permissions
                .iter()
                .map(|(menu_path, capabilities)| (menu_path.to_owned(), capabilities.into()))
                .collect(),
            user: user.into(),
        }
    }
}
