use super::*;

impl PostgresSecurityAdminRepository {
    pub(super) async fn list_users_impl(&self) -> AppResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| persistence("list users", error))?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    pub(super) async fn set_user_active_impl(
        &self,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| persistence("update user active flag", error))?;

        row.map(UserRecord::from)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }
}
