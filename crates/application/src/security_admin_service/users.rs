use super::*;

impl SecurityAdminService {
    /// Lists local users.
    pub async fn list_users(&self, actor: UserId) -> AppResult<Vec<UserRecord>> {
        self.require(actor, USERS_MENU_PATH, Capability::Read).await?;
        self.repository.list_users().await
    }

    /// Activates or deactivates a user.
    pub async fn set_user_active(
        &self,
        actor: UserId,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserRecord> {
        self.require(actor, USERS_MENU_PATH, Capability::Update)
            .await?;

        let user = self.repository.set_user_active(user_id, is_active).await?;
        tracing::info!(%actor, %user_id, is_active, "changed user active flag");
        Ok(user)
    }
}
