use std::sync::Arc;

use async_trait::async_trait;

use barberdesk_core::{AppError, AppResult};
use barberdesk_domain::{Capability, CapabilitySet, GroupId, MenuId, PermissionMap, UserId};

use crate::MenuRecord;

mod navigation;

pub use navigation::NavigationNode;

/// One grant row joined with its menu path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGrant {
    /// Granted menu.
    pub menu_id: MenuId,
    /// Navigation path of the granted menu.
    pub menu_path: String,
    /// Group holding the grant.
    pub group_id: GroupId,
    /// Granted flags.
    pub capabilities: CapabilitySet,
}

/// Repository port for permission lookups.
///
/// Every method only returns rows reachable through active users, active
/// groups and active menus.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Lists active groups an active user belongs to.
    async fn list_active_group_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<GroupId>>;

    /// Lists grant rows held by the groups on active menus.
    ///
    /// Duplicate rows for the same (menu, group) pair are returned as-is.
    async fn list_menu_grants_for_groups(&self, group_ids: &[GroupId])
    -> AppResult<Vec<MenuGrant>>;

    /// Lists active menus for navigation.
    async fn list_active_menus(&self) -> AppResult<Vec<MenuRecord>>;
}

/// Application service resolving effective per-menu capabilities.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn PermissionRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionRepository>) -> Self {
        Self { repository }
    }

    /// Resolves the effective permissions of a local user.
    ///
    /// Capabilities granted through several groups are unioned per flag.
    /// Menus where no flag is granted are absent from the result.
    pub async fn resolve_permissions(&self, user_id: UserId) -> AppResult<PermissionMap> {
        let group_ids = self
            .repository
            .list_active_group_ids_for_user(user_id)
            .await?;

        if group_ids.is_empty() {
            return Ok(PermissionMap::new());
        }

        let grants = self
            .repository
            .list_menu_grants_for_groups(&group_ids)
            .await?;

        let mut permissions = PermissionMap::new();
        for grant in grants {
            permissions.grant(grant.menu_path.as_str(), grant.capabilities);
        }

        Ok(permissions)
    }

    /// Returns whether the user holds `capability` on the menu at `menu_path`.
    pub async fn has_capability(
        &self,
        user_id: UserId,
        menu_path: &str,
        capability: Capability,
    ) -> AppResult<bool> {
        Ok(self
            .resolve_permissions(user_id)
            .await?
            .allows(menu_path, capability))
    }

    /// Ensures the user holds `capability` on the menu at `menu_path`.
    pub async fn require_capability(
        &self,
        user_id: UserId,
        menu_path: &str,
        capability: Capability,
    ) -> AppResult<()> {
        if self.has_capability(user_id, menu_path, capability).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{user_id}' is missing '{}' on '{menu_path}'",
            capability.as_str()
        )))
    }

    /// Returns the readable navigation tree for a user.
    pub async fn navigation_for_user(&self, user_id: UserId) -> AppResult<Vec<NavigationNode>> {
        let permissions = self.resolve_permissions(user_id).await?;
        if permissions.is_empty() {
            return Ok(Vec::new());
        }

        let menus = self.repository.list_active_menus().await?;
        Ok(navigation::build_tree(menus, &permissions))
    }
}

#[cfg(test)]
mod tests;
