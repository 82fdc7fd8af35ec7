use super::*;

const MENU_COLUMNS: &str = "id, name, path, icon, parent_id, sort_order, is_active";

impl PostgresSecurityAdminRepository {
    pub(super) async fn list_menus_impl(&self) -> AppResult<Vec<MenuRecord>> {
        let rows = sqlx::query_as::<_, MenuRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menus ORDER BY sort_order, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence("list menus", error))?;

        Ok(rows.into_iter().map(MenuRecord::from).collect())
    }

    pub(super) async fn find_menu_impl(&self, menu_id: MenuId) -> AppResult<Option<MenuRecord>> {
        let row = sqlx::query_as::<_, MenuRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menus WHERE id = $1"
        ))
        .bind(menu_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence("find menu", error))?;

        Ok(row.map(MenuRecord::from))
    }

    pub(super) async fn create_menu_impl(&self, menu: &MenuDefinition) -> AppResult<MenuRecord> {
        let path = menu.path().as_str();
        let row = sqlx::query_as::<_, MenuRow>(&format!(
            r#"
            INSERT INTO menus (id, name, path, icon, parent_id, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MENU_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(menu.name().as_str())
        .bind(path)
        .bind(menu.icon())
        .bind(menu.parent_id().map(|parent_id| parent_id.as_uuid()))
        .bind(menu.sort_order())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Conflict(format!("menu path '{path}' already exists"));
            }
            persistence("create menu", error)
        })?;

        Ok(row.into())
    }

    pub(super) async fn set_menu_active_impl(
        &self,
        menu_id: MenuId,
        is_active: bool,
    ) -> AppResult<MenuRecord> {
        let row = sqlx::query_as::<_, MenuRow>(&format!(
            r#"
            UPDATE menus
            SET is_active = $2
            WHERE id = $1
            RETURNING {MENU_COLUMNS}
            "#
        ))
        .bind(menu_id.as_uuid())
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence("update menu active flag", error))?;

        row.map(MenuRecord::from)
            .ok_or_else(|| AppError::NotFound(format!("menu '{menu_id}' does not exist")))
    }

    pub(super) async fn list_menu_grants_impl(
        &self,
        menu_id: MenuId,
    ) -> AppResult<Vec<MenuGrantRecord>> {
        let rows = sqlx::query_as::<_, MenuGrantRecordRow>(
            r#"
            SELECT
                grants.menu_id,
                grants.group_id,
                groups.name AS group_name,
                grants.can_read,
                grants.can_write,
                grants.can_update,
                grants.can_delete,
                grants.created_at
            FROM menu_roles AS grants
            INNER JOIN groups
                ON groups.id = grants.group_id
            WHERE grants.menu_id = $1
            ORDER BY groups.name
            "#,
        )
        .bind(menu_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence("list menu grants", error))?;

        Ok(rows.into_iter().map(MenuGrantRecord::from).collect())
    }

    pub(super) async fn save_menu_grant_impl(
        &self,
        menu_id: MenuId,
        group_id: GroupId,
        capabilities: CapabilitySet,
    ) -> AppResult<MenuGrantRecord> {
        let row = sqlx::query_as::<_, MenuGrantRecordRow>(
            r#"
            WITH saved AS (
                INSERT INTO menu_roles (id, menu_id, group_id, can_read, can_write, can_update, can_delete)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (menu_id, group_id) DO UPDATE
                SET can_read = EXCLUDED.can_read,
                    can_write = EXCLUDED.can_write,
                    can_update = EXCLUDED.can_update,
                    can_delete = EXCLUDED.can_delete
                RETURNING menu_id, group_id, can_read, can_write, can_update, can_delete, created_at
            )
            SELECT
                saved.menu_id,
                saved.group_id,
                groups.name AS group_name,
                saved.can_read,
                saved.can_write,
                saved.can_update,
                saved.can_delete,
                saved.created_at
            FROM saved
            INNER JOIN groups
                ON groups.id = saved.group_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(menu_id.as_uuid())
        .bind(group_id.as_uuid())
        .bind(capabilities.read)
        .bind(capabilities.write)
        .bind(capabilities.update)
        .bind(capabilities.delete)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                return AppError::NotFound(format!(
                    "menu '{menu_id}' or group '{group_id}' does not exist"
                ));
            }
            persistence("save menu grant", error)
        })?;

        Ok(row.into())
    }
}
