use async_trait::async_trait;
use chrono::{DateTime, Utc};

use barberdesk_core::AppResult;
use barberdesk_domain::{
    CapabilitySet, GroupDefinition, GroupId, MenuDefinition, MenuId, UserId,
};

use crate::UserRecord;

/// Group record returned to administrative callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    /// Group identifier.
    pub id: GroupId,
    /// Unique group name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Inactive groups grant nothing.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Menu record returned to administrative and navigation callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRecord {
    /// Menu identifier.
    pub id: MenuId,
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
    /// Inactive menus are excluded from resolution.
    pub is_active: bool,
}

/// Membership of one user in one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMemberRecord {
    /// Group identifier.
    pub group_id: GroupId,
    /// Member user identifier.
    pub user_id: UserId,
    /// Member email for display.
    pub email: String,
    /// Administrator who created the membership, if known.
    pub assigned_by: Option<UserId>,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

/// Capability grant of one group on one menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGrantRecord {
    /// Menu identifier.
    pub menu_id: MenuId,
    /// Group identifier.
    pub group_id: GroupId,
    /// Group name for display.
    pub group_name: String,
    /// Granted flags.
    pub capabilities: CapabilitySet,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Repository port for RBAC administration.
#[async_trait]
pub trait SecurityAdminRepository: Send + Sync {
    /// Lists all local users ordered by email.
    async fn list_users(&self) -> AppResult<Vec<UserRecord>>;

    /// Changes the active flag of a user.
    async fn set_user_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserRecord>;

    /// Lists all groups ordered by name.
    async fn list_groups(&self) -> AppResult<Vec<GroupRecord>>;

    /// Finds a group by its unique name.
    async fn find_group_by_name(&self, name: &str) -> AppResult<Option<GroupRecord>>;

    /// Creates an active group. Duplicate names are a conflict.
    async fn create_group(&self, group: &GroupDefinition) -> AppResult<GroupRecord>;

    /// Changes the active flag of a group.
    async fn set_group_active(&self, group_id: GroupId, is_active: bool)
    -> AppResult<GroupRecord>;

    /// Lists members of a group ordered by email.
    async fn list_group_members(&self, group_id: GroupId) -> AppResult<Vec<GroupMemberRecord>>;

    /// Adds a user to a group. Existing memberships are returned unchanged.
    async fn add_group_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
        assigned_by: Option<UserId>,
    ) -> AppResult<GroupMemberRecord>;

    /// Removes a user from a group.
    async fn remove_group_member(&self, group_id: GroupId, user_id: UserId) -> AppResult<()>;

    /// Lists all menus ordered by sort order then name.
    async fn list_menus(&self) -> AppResult<Vec<MenuRecord>>;

    /// Finds a menu by identifier.
    async fn find_menu(&self, menu_id: MenuId) -> AppResult<Option<MenuRecord>>;

    /// Creates an active menu. Duplicate paths are a conflict.
    async fn create_menu(&self, menu: &MenuDefinition) -> AppResult<MenuRecord>;

    /// Changes the active flag of a menu.
    async fn set_menu_active(&self, menu_id: MenuId, is_active: bool) -> AppResult<MenuRecord>;

    /// Lists grants attached to a menu ordered by group name.
    async fn list_menu_grants(&self, menu_id: MenuId) -> AppResult<Vec<MenuGrantRecord>>;

    /// Creates or replaces the grant for a (menu, group) pair.
    async fn save_menu_grant(
        &self,
        menu_id: MenuId,
        group_id: GroupId,
        capabilities: CapabilitySet,
    ) -> AppResult<MenuGrantRecord>;
}
