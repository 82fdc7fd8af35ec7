use super::*;

impl InMemoryRbacRepository {
    pub(super) async fn list_users_impl(&self) -> AppResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.read().await.values().cloned().collect();
        users.sort_by(|left, right| left.email.cmp(&right.email));
        Ok(users)
    }

    pub(super) async fn set_user_active_impl(
        &self,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserRecord> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };
        user.is_active = is_active;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    pub(super) async fn list_groups_impl(&self) -> AppResult<Vec<GroupRecord>> {
        let mut groups: Vec<GroupRecord> = self.groups.read().await.values().cloned().collect();
        groups.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(groups)
    }

    pub(super) async fn find_group_by_name_impl(
        &self,
        name: &str,
    ) -> AppResult<Option<GroupRecord>> {
        Ok(self
            .groups
            .read()
            .await
            .values()
            .find(|group| group.name == name)
            .cloned())
    }

    pub(super) async fn create_group_impl(
        &self,
        group: &GroupDefinition,
    ) -> AppResult<GroupRecord> {
        let mut groups = self.groups.write().await;
        let name = group.name().as_str();

        if groups.values().any(|existing| existing.name == name) {
            return Err(AppError::Conflict(format!("group '{name}' already exists")));
        }

        let record = GroupRecord {
            id: GroupId::new(),
            name: name.to_owned(),
            description: group.description().map(ToOwned::to_owned),
            is_active: true,
            created_at: Utc::now(),
        };
        groups.insert(record.id, record.clone());
        Ok(record)
    }

    pub(super) async fn set_group_active_impl(
        &self,
        group_id: GroupId,
        is_active: bool,
    ) -> AppResult<GroupRecord> {
        let mut groups = self.groups.write().await;
        let Some(group) = groups.get_mut(&group_id) else {
            return Err(AppError::NotFound(format!("group '{group_id}' does not exist")));
        };
        group.is_active = is_active;
        Ok(group.clone())
    }

    pub(super) async fn list_group_members_impl(
        &self,
        group_id: GroupId,
    ) -> AppResult<Vec<GroupMemberRecord>> {
        let users = self.users.read().await;
        let mut members: Vec<GroupMemberRecord> = self
            .memberships
            .read()
            .await
            .iter()
            .filter(|((member_group_id, _), _)| *member_group_id == group_id)
            .filter_map(|((_, user_id), membership)| {
                let user = users.get(user_id)?;
                Some(GroupMemberRecord {
                    group_id,
                    user_id: *user_id,
                    email: user.email.clone(),
                    assigned_by: membership.assigned_by,
                    assigned_at: membership.assigned_at,
                })
            })
            .collect();
        members.sort_by(|left, right| left.email.cmp(&right.email));
        Ok(members)
    }

    pub(super) async fn add_group_member_impl(
        &self,
        group_id: GroupId,
        user_id: UserId,
        assigned_by: Option<UserId>,
    ) -> AppResult<GroupMemberRecord> {
        if !self.groups.read().await.contains_key(&group_id) {
            return Err(AppError::NotFound(format!("group '{group_id}' does not exist")));
        }
        let Some(email) = self
            .users
            .read()
            .await
            .get(&user_id)
            .map(|user| user.email.clone())
        else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };

        let mut memberships = self.memberships.write().await;
        let membership = memberships
            .entry((group_id, user_id))
            .or_insert_with(|| StoredMembership {
                assigned_by,
                assigned_at: Utc::now(),
            });

        Ok(GroupMemberRecord {
            group_id,
            user_id,
            email,
            assigned_by: membership.assigned_by,
            assigned_at: membership.assigned_at,
        })
    }

    pub(super) async fn remove_group_member_impl(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> AppResult<()> {
        self.memberships
            .write()
            .await
            .remove(&(group_id, user_id))
            .map(|_| ())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "user '{user_id}' is not a member of group '{group_id}'"
                ))
            })
    }

    pub(super) async fn create_menu_impl(&self, menu: &MenuDefinition) -> AppResult<MenuRecord> {
        let mut menus = self.menus.write().await;
        let path = menu.path().as_str();

        if menus.values().any(|existing| existing.path == path) {
            return Err(AppError::Conflict(format!("menu path '{path}' already exists")));
        }

        let record = MenuRecord {
            id: MenuId::new(),
            name: menu.name().as_str().to_owned(),
            path: path.to_owned(),
            icon: menu.icon().map(ToOwned::to_owned),
            parent_id: menu.parent_id(),
            sort_order: menu.sort_order(),
            is_active: true,
        };
        menus.insert(record.id, record.clone());
        Ok(record)
    }

    pub(super) async fn list_menu_grants_impl(
        &self,
        menu_id: MenuId,
    ) -> AppResult<Vec<MenuGrantRecord>> {
        let groups = self.groups.read().await;
        let mut grants: Vec<MenuGrantRecord> = self
            .grants
            .read()
            .await
            .iter()
            .filter(|((grant_menu_id, _), _)| *grant_menu_id == menu_id)
            .filter_map(|((_, group_id), grant)| {
                let group = groups.get(group_id)?;
                Some(MenuGrantRecord {
                    menu_id,
                    group_id: *group_id,
                    group_name: group.name.clone(),
                    capabilities: grant.capabilities,
                    created_at: grant.created_at,
                })
            })
            .collect();
        grants.sort_by(|left, right| left.group_name.cmp(&right.group_name));
        Ok(grants)
    }

    pub(super) async fn save_menu_grant_impl(
        &self,
        menu_id: MenuId,
        group_id: GroupId,
        capabilities: CapabilitySet,
    ) -> AppResult<MenuGrantRecord> {
        if !self.menus.read().await.contains_key(&menu_id) {
            return Err(AppError::NotFound(format!("menu '{menu_id}' does not exist")));
        }
        let Some(group_name) = self
            .groups
            .read()
            .await
            .get(&group_id)
            .map(|group| group.name.clone())
        else {
            return Err(AppError::NotFound(format!("group '{group_id}' does not exist")));
        };

        let mut grants = self.grants.write().await;
        let grant = grants
            .entry((menu_id, group_id))
            .and_modify(|grant| grant.capabilities = capabilities)
            .or_insert_with(|| StoredGrant {
                capabilities,
                created_at: Utc::now(),
            });

        Ok(MenuGrantRecord {
            menu_id,
            group_id,
            group_name,
            capabilities: grant.capabilities,
            created_at: grant.created_at,
        })
    }
}
