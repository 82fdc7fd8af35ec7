use super::*;

const GROUP_COLUMNS: &str = "id, name, description, is_active, created_at";

impl PostgresSecurityAdminRepository {
    pub(super) async fn list_groups_impl(&self) -> AppResult<Vec<GroupRecord>> {
        let rows = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence("list groups", error))?;

        Ok(rows.into_iter().map(GroupRecord::from).collect())
    }

    pub(super) async fn find_group_by_name_impl(
        &self,
        name: &str,
    ) -> AppResult<Option<GroupRecord>> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence("find group by name", error))?;

        Ok(row.map(GroupRecord::from))
    }

    pub(super) async fn create_group_impl(
        &self,
        group: &GroupDefinition,
    ) -> AppResult<GroupRecord> {
        let name = group.name().as_str();
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            r#"
            INSERT INTO groups (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(group.description())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Conflict(format!("group '{name}' already exists"));
            }
            persistence("create group", error)
        })?;

        Ok(row.into())
    }

    pub(super) async fn set_group_active_impl(
        &self,
        group_id: GroupId,
        is_active: bool,
    ) -> AppResult<GroupRecord> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            r#"
            UPDATE groups
            SET is_active = $2
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(group_id.as_uuid())
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence("update group active flag", error))?;

        row.map(GroupRecord::from)
            .ok_or_else(|| AppError::NotFound(format!("group '{group_id}' does not exist")))
    }

    pub(super) async fn list_group_members_impl(
        &self,
        group_id: GroupId,
    ) -> AppResult<Vec<GroupMemberRecord>> {
        let rows = sqlx::query_as::<_, GroupMemberRow>(
            r#"
            SELECT
                memberships.group_id,
                memberships.user_id,
                users.email,
                memberships.assigned_by,
                memberships.assigned_at
            FROM group_roles AS memberships
            INNER JOIN users
                ON users.id = memberships.user_id
            WHERE memberships.group_id = $1
            ORDER BY users.email
            "#,
        )
        .bind(group_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence("list group members", error))?;

        Ok(rows.into_iter().map(GroupMemberRecord::from).collect())
    }

    pub(super) async fn add_group_member_impl(
        &self,
        group_id: GroupId,
        user_id: UserId,
        assigned_by: Option<UserId>,
    ) -> AppResult<GroupMemberRecord> {
        sqlx::query(
            r#"
            INSERT INTO group_roles (id, user_id, group_id, assigned_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, group_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id.as_uuid())
        .bind(group_id.as_uuid())
        .bind(assigned_by.map(|actor| actor.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                return AppError::NotFound(format!(
                    "group '{group_id}' or user '{user_id}' does not exist"
                ));
            }
            persistence("add group member", error)
        })?;

        let row = sqlx::query_as::<_, GroupMemberRow>(
            r#"
            SELECT
                memberships.group_id,
                memberships.user_id,
                users.email,
                memberships.assigned_by,
                memberships.assigned_at
            FROM group_roles AS memberships
            INNER JOIN users
                ON users.id = memberships.user_id
            WHERE memberships.group_id = $1
                AND memberships.user_id = $2
            "#,
        )
        .bind(group_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| persistence("load group member", error))?;

        Ok(row.into())
    }

    pub(super) async fn remove_group_member_impl(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM group_roles
            WHERE group_id = $1
                AND user_id = $2
            "#,
        )
        .bind(group_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| persistence("remove group member", error))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' is not a member of group '{group_id}'"
            )));
        }

        Ok(())
    }
}
