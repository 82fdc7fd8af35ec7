use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use barberdesk_application::{MenuGrant, MenuRecord, PermissionRepository};
use barberdesk_core::{AppError, AppResult};
use barberdesk_domain::{CapabilitySet, GroupId, MenuId, UserId};

/// PostgreSQL-backed repository for permission lookups.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuGrantRow {
    menu_id: Uuid,
    menu_path: String,
    group_id: Uuid,
    can_read: bool,
    can_write: bool,
    can_update: bool,
    can_delete: bool,
}

#[derive(Debug, FromRow)]
pub(crate) struct MenuRow {
    id: Uuid,
    name: String,
    path: String,
    icon: Option<String>,
    parent_id: Option<Uuid>,
    sort_order: i32,
    is_active: bool,
}

impl From<MenuRow> for MenuRecord {
    fn from(row: MenuRow) -> Self {
        Self {
            id: MenuId::from_uuid(row.id),
            name: row.name,
            path: row.path,
            icon: row.icon,
            parent_id: row.parent_id.map(MenuId::from_uuid),
            sort_order: row.sort_order,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn list_active_group_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<GroupId>> {
        let group_ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT memberships.group_id
            FROM group_roles AS memberships
            INNER JOIN users
                ON users.id = memberships.user_id
            INNER JOIN groups
                ON groups.id = memberships.group_id
            WHERE memberships.user_id = $1
                AND users.is_active
                AND groups.is_active
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to load groups for user '{user_id}': {error}"
            ))
        })?;

        Ok(group_ids.into_iter().map(GroupId::from_uuid).collect())
    }

    async fn list_menu_grants_for_groups(
        &self,
        group_ids: &[GroupId],
    ) -> AppResult<Vec<MenuGrant>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let group_ids: Vec<Uuid> = group_ids.iter().map(GroupId::as_uuid).collect();
        let rows = sqlx::query_as::<_, MenuGrantRow>(
            r#"
            SELECT
                grants.menu_id,
                menus.path AS menu_path,
                grants.group_id,
                grants.can_read,
                grants.can_write,
                grants.can_update,
                grants.can_delete
            FROM menu_roles AS grants
            INNER JOIN menus
                ON menus.id = grants.menu_id
            WHERE grants.group_id = ANY($1)
                AND menus.is_active
            "#,
        )
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to load menu grants: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| MenuGrant {
                menu_id: MenuId::from_uuid(row.menu_id),
                menu_path: row.menu_path,
                group_id: GroupId::from_uuid(row.group_id),
                capabilities: CapabilitySet::new(
                    row.can_read,
                    row.can_write,
                    row.can_update,
                    row.can_delete,
                ),
            })
            .collect())
    }

    async fn list_active_menus(&self) -> AppResult<Vec<MenuRecord>> {
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, name, path, icon, parent_id, sort_order, is_active
            FROM menus
            WHERE is_active
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Persistence(format!("failed to list menus: {error}")))?;

        Ok(rows.into_iter().map(MenuRecord::from).collect())
    }
}
