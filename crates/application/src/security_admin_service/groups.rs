use barberdesk_domain::GroupDefinition;

use super::*;

impl SecurityAdminService {
    /// Lists all groups.
    pub async fn list_groups(&self, actor: UserId) -> AppResult<Vec<GroupRecord>> {
        self.require(actor, GROUPS_MENU_PATH, Capability::Read)
            .await?;
        self.repository.list_groups().await
    }

    /// Creates a new active group.
    pub async fn create_group(
        &self,
        actor: UserId,
        input: CreateGroupInput,
    ) -> AppResult<GroupRecord> {
        self.require(actor, GROUPS_MENU_PATH, Capability::Write)
            .await?;

        let definition = GroupDefinition::new(input.name, input.description)?;
        let group = self.repository.create_group(&definition).await?;
        tracing::info!(%actor, group_id = %group.id, name = %group.name, "created group");
        Ok(group)
    }

    /// Activates or deactivates a group.
    pub async fn set_group_active(
        &self,
        actor: UserId,
        group_id: GroupId,
        is_active: bool,
    ) -> AppResult<GroupRecord> {
        self.require(actor, GROUPS_MENU_PATH, Capability::Update)
            .await?;

        let group = self.repository.set_group_active(group_id, is_active).await?;
        tracing::info!(%actor, %group_id, is_active, "changed group active flag");
        Ok(group)
    }

    /// Lists members of a group.
    pub async fn list_group_members(
        &self,
        actor: UserId,
        group_id: GroupId,
    ) -> AppResult<Vec<GroupMemberRecord>> {
        self.require(actor, GROUPS_MENU_PATH, Capability::Read)
            .await?;
        self.repository.list_group_members(group_id).await
    }

    /// Adds a user to a group, recording the acting administrator.
    pub async fn add_group_member(
        &self,
        actor: UserId,
        group_id: GroupId,
        user_id: UserId,
    ) -> AppResult<GroupMemberRecord> {
        self.require(actor, GROUPS_MENU_PATH, Capability::Write)
            .await?;

        let membership = self
            .repository
            .add_group_member(group_id, user_id, Some(actor))
            .await?;
        tracing::info!(%actor, %group_id, %user_id, "added group member");
        Ok(membership)
    }

    /// Removes a user from a group.
    pub async fn remove_group_member(
        &self,
        actor: UserId,
        group_id: GroupId,
        user_id: UserId,
    ) -> AppResult<()> {
        self.require(actor, GROUPS_MENU_PATH, Capability::Delete)
            .await?;

        self.repository
            .remove_group_member(group_id, user_id)
            .await?;
        tracing::info!(%actor, %group_id, %user_id, "removed group member");
        Ok(())
    }
}
