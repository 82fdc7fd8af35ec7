use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use barberdesk_application::{
    DirectoryRepository, GroupMemberRecord, GroupRecord, MenuGrant, MenuGrantRecord, MenuRecord,
    NewUserInput, PermissionRepository, SecurityAdminRepository, UserRecord,
};
use barberdesk_core::{AppError, AppResult};
use barberdesk_domain::{
    CapabilitySet, GroupDefinition, GroupId, MenuDefinition, MenuId, UserId, UserProfile,
};

mod admin;

#[derive(Debug, Clone)]
struct StoredMembership {
    assigned_by: Option<UserId>,
    assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredGrant {
    capabilities: CapabilitySet,
    created_at: DateTime<Utc>,
}

/// In-memory implementation of the directory, permission and administration ports.
#[derive(Debug, Default)]
pub struct InMemoryRbacRepository {
    users: RwLock<HashMap<UserId, UserRecord>>,
    groups: RwLock<HashMap<GroupId, GroupRecord>>,
    memberships: RwLock<HashMap<(GroupId, UserId), StoredMembership>>,
    menus: RwLock<HashMap<MenuId, MenuRecord>>,
    grants: RwLock<HashMap<(MenuId, GroupId), StoredGrant>>,
}

impl InMemoryRbacRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryRbacRepository {
    async fn find_user_by_external_id(&self, external_id: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.external_id == external_id)
            .cloned())
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn create_user(&self, input: NewUserInput) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;

        if let Some(existing) = users
            .values()
            .find(|user| user.external_id == input.external_id)
        {
            return Ok(existing.clone());
        }

        if users
            .values()
            .any(|user| user.email == input.email.as_str())
        {
            return Err(AppError::Conflict(format!(
                "email '{}' is already bound to another identity",
                input.email.as_str()
            )));
        }

        let now = Utc::now();
        let user = UserRecord {
            id: UserId::new(),
            external_id: input.external_id,
            email: input.email.into(),
            first_name: input.first_name,
            last_name: input.last_name,
            image_url: input.image_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user_profile(
        &self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;

        if let Some(email) = profile.email()
            && users
                .values()
                .any(|user| user.id != user_id && user.email == email.as_str())
        {
            return Err(AppError::Conflict(format!(
                "email '{}' is already bound to another identity",
                email.as_str()
            )));
        }

        let Some(user) = users.get_mut(&user_id) else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };

        if let Some(email) = profile.email() {
            user.email = email.as_str().to_owned();
        }
        user.first_name = profile.first_name().map(ToOwned::to_owned);
        user.last_name = profile.last_name().map(ToOwned::to_owned);
        user.image_url = profile.image_url().map(ToOwned::to_owned);
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

#[async_trait]
impl PermissionRepository for InMemoryRbacRepository {
    async fn list_active_group_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<GroupId>> {
        let user_active = self
            .users
            .read()
            .await
            .get(&user_id)
            .is_some_and(|user| user.is_active);
        if !user_active {
            return Ok(Vec::new());
        }

        let groups = self.groups.read().await;
        Ok(self
            .memberships
            .read()
            .await
            .keys()
            .filter(|(group_id, member_id)| {
                *member_id == user_id
                    && groups.get(group_id).is_some_and(|group| group.is_active)
            })
            .map(|(group_id, _)| *group_id)
            .collect())
    }

    async fn list_menu_grants_for_groups(
        &self,
        group_ids: &[GroupId],
    ) -> AppResult<Vec<MenuGrant>> {
        let menus = self.menus.read().await;
        Ok(self
            .grants
            .read()
            .await
            .iter()
            .filter(|((_, group_id), _)| group_ids.contains(group_id))
            .filter_map(|((menu_id, group_id), grant)| {
                let menu = menus.get(menu_id).filter(|menu| menu.is_active)?;
                Some(MenuGrant {
                    menu_id: *menu_id,
                    menu_path: menu.path.clone(),
                    group_id: *group_id,
                    capabilities: grant.capabilities,
                })
            })
            .collect())
    }

    async fn list_active_menus(&self) -> AppResult<Vec<MenuRecord>> {
        let mut menus: Vec<MenuRecord> = self
            .menus
            .read()
            .await
            .values()
            .filter(|menu| menu.is_active)
            .cloned()
            .collect();
        sort_menus(&mut menus);
        Ok(menus)
    }
}

#[async_trait]
impl SecurityAdminRepository for InMemoryRbacRepository {
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
        let mut menus: Vec<MenuRecord> = self.menus.read().await.values().cloned().collect();
        sort_menus(&mut menus);
        Ok(menus)
    }

    async fn find_menu(&self, menu_id: MenuId) -> AppResult<Option<MenuRecord>> {
        Ok(self.menus.read().await.get(&menu_id).cloned())
    }

    async fn create_menu(&self, menu: &MenuDefinition) -> AppResult<MenuRecord> {
        self.create_menu_impl(menu).await
    }

    async fn set_menu_active(&self, menu_id: MenuId, is_active: bool) -> AppResult<MenuRecord> {
        let mut menus = self.menus.write().await;
        let Some(menu) = menus.get_mut(&menu_id) else {
            return Err(AppError::NotFound(format!("menu '{menu_id}' does not exist")));
        };
        menu.is_active = is_active;
        Ok(menu.clone())
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

fn sort_menus(menus: &mut [MenuRecord]) {
    menus.sort_by(|left, right| {
        left.sort_order
            .cmp(&right.sort_order)
            .then_with(|| left.name.cmp(&right.name))
    });
}

#[cfg(test)]
mod tests;
