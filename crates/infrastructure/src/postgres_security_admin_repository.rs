use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use barberdesk_application::{
    GroupMemberRecord, GroupRecord, MenuGrantRecord, MenuRecord, SecurityAdminRepository,
    UserRecord,
};
use barberdesk_core::{AppError, AppResult};
use barberdesk_domain::{
    CapabilitySet, GroupDefinition, GroupId, MenuDefinition, MenuId, UserId,
};

use crate::postgres_directory_repository::{USER_COLUMNS, UserRow};
use crate::postgres_permission_repository::MenuRow;

mod groups;
mod menus;
mod users;

/// PostgreSQL-backed repository for RBAC administration.
#[derive(Clone)]
pub struct PostgresSecurityAdminRepository {
    pool: PgPool,
}

impl PostgresSecurityAdminRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GroupRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<GroupRow> for GroupRecord {
    fn from(row: GroupRow) -> Self {
        Self {
            id: GroupId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct GroupMemberRow {
    group_id: Uuid,
    user_id: Uuid,
    email: String,
    assigned_by: Option<Uuid>,
    assigned_at: DateTime<Utc>,
}

impl From<GroupMemberRow> for GroupMemberRecord {
    fn from(row: GroupMemberRow) -> Self {
        Self {
            group_id: GroupId::from_uuid(row.group_id),
            user_id: UserId::from_uuid(row.user_id),
            email: row.email,
            assigned_by: row.assigned_by.map(UserId::from_uuid),
            assigned_at: row.assigned_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct MenuGrantRecordRow {
    menu_id: Uuid,
    group_id: Uuid,
    group_name: String,
    can_read: bool,
    can_write: bool,
    can_update: bool,
    can_delete: bool,
    created_at: DateTime<Utc>,
}

impl From<MenuGrantRecordRow> for MenuGrantRecord {
    fn from(row: MenuGrantRecordRow) -> Self {
        Self {
            menu_id: MenuId::from_uuid(row.menu_id),
            group_id: GroupId::from_uuid(row.group_id),
            group_name: row.group_name,
            capabilities: CapabilitySet::new(
                row.can_read,
                row.can_write,
                row.can_update,
                row.can_delete,
            ),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SecurityAdminRepository for PostgresSecurityAdminRepository {
    async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        self.list_users_impl().await
    }

    async fn set_user_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserRecord> {
        self.set_user_active_impl(user_id, is_active).await
    }

    async fn list_groups(&self) -> AppResult<Vec<GroupRecord>> {
        self.list_groups_impl().await
    }

    async fn find_group_by_name(&self, name: &str) -> AppResult<Option<GroupRecord>> {
        self.find_group_by_name_impl(name).await
    }

    async fn create_group(&self, group: &GroupDefinition) -> AppResult<GroupRecord> {
        self.create_group_impl(group).await
    }

    async fn set_group_active(
        &self,
        group_id: GroupId,
        is_active: bool,
    ) -> AppResult<GroupRecord> {
        self.set_group_active_impl(group_id, is_active).await
    }

    async fn list_group_members(&self, group_id: GroupId) -> AppResult<Vec<GroupMemberRecord>> {
        self.list_group_members_impl(group_id).await
    }

    async fn add_group_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
        assigned_by: Option<UserId>,
    ) -> AppResult<GroupMemberRecord> {
        self.add_group_member_impl(group_id, user_id, assigned_by)
            .await
    }

    async fn remove_group_member(&self, group_id: GroupId, user_id: UserId) -> AppResult<()> {
        self.remove_group_member_impl(group_id, user_id).await
    }

    async fn list_menus(&self) -> AppResult<Vec<MenuRecord>> {
        self.list_menus_impl().await
    }

    async fn find_menu(&self, menu_id: MenuId) -> AppResult<Option<MenuRecord>> {
        self.find_menu_impl(menu_id).await
    }

    async fn create_menu(&self, menu: &MenuDefinition) -> AppResult<MenuRecord> {
        self.create_menu_impl(menu).await
    }

    async fn set_menu_active(&self, menu_id: MenuId, is_active: bool) -> AppResult<MenuRecord> {
        self.set_menu_active_impl(menu_id, is_active).await
    }

    async fn list_menu_grants(&self, menu_id: MenuId) -> AppResult<Vec<MenuGrantRecord>> {
        self.list_menu_grants_impl(menu_id).await
    }

    async fn save_menu_grant(
        &self,
        menu_id: MenuId,
        group_id: GroupId,
        capabilities: CapabilitySet,
    ) -> AppResult<MenuGrantRecord> {
        self.save_menu_grant_impl(menu_id, group_id, capabilities)
            .await
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some("23505"))
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some("23503"))
}

fn persistence(context: &str, error: sqlx::Error) -> AppError {
    AppError::Persistence(format!("failed to {context}: {error}"))
}
