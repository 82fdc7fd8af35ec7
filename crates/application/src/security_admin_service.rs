use std::sync::Arc;

use barberdesk_core::{AppError, AppResult};
use barberdesk_domain::{Capability, CapabilitySet, GroupId, MenuId, UserId};

use crate::security_admin_ports::{
    GroupMemberRecord, GroupRecord, MenuGrantRecord, MenuRecord, SecurityAdminRepository,
};
use crate::{AuthorizationService, UserRecord};

mod groups;
mod menus;
mod users;

/// Menu path governing user administration.
pub const USERS_MENU_PATH: &str = "/dashboard/users";
/// Menu path governing group and membership administration.
pub const GROUPS_MENU_PATH: &str = "/dashboard/groups";
/// Menu path governing menu and grant administration.
pub const MENUS_MENU_PATH: &str = "/dashboard/menus";
/// Name of the seeded group holding full administration grants.
pub const ADMINISTRATORS_GROUP_NAME: &str = "Administrators";

/// Input payload for creating groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupInput {
    /// Unique group name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Input payload for creating menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMenuInput {
    /// Display name.
    pub name: String,
    /// Unique navigation path.
    pub path: String,
    /// Icon reference.
    pub icon: Option<String>,
    /// Parent menu for nested entries.
    pub parent_id: Option<MenuId>,
    /// Ordering among siblings.
    pub sort_order: i32,
}

/// Input payload for saving a (menu, group) grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveMenuGrantInput {
    /// Granted menu.
    pub menu_id: MenuId,
    /// Group receiving the grant.
    pub group_id: GroupId,
    /// Flags to store.
    pub capabilities: CapabilitySet,
}

/// Application service for RBAC administration workflows.
///
/// Every operation is itself authorized through the permission resolver
/// against the menu that governs it.
#[derive(Clone)]
pub struct SecurityAdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn SecurityAdminRepository>,
}

impl SecurityAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn SecurityAdminRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
        }
    }

    /// Adds a user to the seeded administrators group.
    ///
    /// Callers are responsible for verifying the bootstrap secret.
    pub async fn bootstrap_administrator(&self, user_id: UserId) -> AppResult<GroupMemberRecord> {
        let group = self
            .repository
            .find_group_by_name(ADMINISTRATORS_GROUP_NAME)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "group '{ADMINISTRATORS_GROUP_NAME}' has not been seeded"
                ))
            })?;

        let membership = self
            .repository
            .add_group_member(group.id, user_id, None)
            .await?;
        tracing::info!(%user_id, group_id = %group.id, "bootstrapped administrator");

        Ok(membership)
    }

    async fn require(
        &self,
        actor: UserId,
        menu_path: &str,
        capability: Capability,
    ) -> AppResult<()> {
        self.authorization_service
            .require_capability(actor, menu_path, capability)
            .await
    }
}
