use barberdesk_domain::MenuDefinition;

use super::*;

impl SecurityAdminService {
    /// Lists all menus, active or not.
    pub async fn list_menus(&self, actor: UserId) -> AppResult<Vec<MenuRecord>> {
        self.require(actor, MENUS_MENU_PATH, Capability::Read)
            .await?;
        self.repository.list_menus().await
    }

    /// Creates a new active menu.
    pub async fn create_menu(&self, actor: UserId, input: CreateMenuInput) -> AppResult<MenuRecord> {
        self.require(actor, MENUS_MENU_PATH, Capability::Write)
            .await?;

        let definition = MenuDefinition::new(
            input.name,
            input.path,
            input.icon,
            input.parent_id,
            input.sort_order,
        )?;

        if let Some(parent_id) = definition.parent_id() {
            self.repository
                .find_menu(parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("parent menu '{parent_id}' does not exist"))
                })?;
        }

        let menu = self.repository.create_menu(&definition).await?;
        tracing::info!(%actor, menu_id = %menu.id, path = %menu.path, "created menu");
        Ok(menu)
    }

    /// Activates or deactivates a menu.
    pub async fn set_menu_active(
        &self,
        actor: UserId,
        menu_id: MenuId,
        is_active: bool,
    ) -> AppResult<MenuRecord> {
        self.require(actor, MENUS_MENU_PATH, Capability::Update)
            .await?;

        let menu = self.repository.set_menu_active(menu_id, is_active).await?;
        tracing::info!(%actor, %menu_id, is_active, "changed menu active flag");
        Ok(menu)
    }

    /// Lists grants attached to a menu.
    pub async fn list_menu_grants(
        &self,
        actor: UserId,
        menu_id: MenuId,
    ) -> AppResult<Vec<MenuGrantRecord>> {
        self.require(actor, MENUS_MENU_PATH, Capability::Read)
            .await?;
        self.repository.list_menu_grants(menu_id).await
    }

    /// Creates or replaces the grant of a group on a menu.
    ///
    /// Creating a grant needs `write`; changing an existing one needs `update`.
    /// Actors holding neither are rejected before any grant is looked up.
    pub async fn save_menu_grant(
        &self,
        actor: UserId,
        input: SaveMenuGrantInput,
    ) -> AppResult<MenuGrantRecord> {
        let permissions = self
            .authorization_service
            .resolve_permissions(actor)
            .await?;
        if !permissions.allows(MENUS_MENU_PATH, Capability::Write)
            && !permissions.allows(MENUS_MENU_PATH, Capability::Update)
        {
            return Err(AppError::Forbidden(format!(
                "user '{actor}' is missing 'write' or 'update' on '{MENUS_MENU_PATH}'"
            )));
        }

        let grant_exists = self
            .repository
            .list_menu_grants(input.menu_id)
            .await?
            .iter()
            .any(|grant| grant.group_id == input.group_id);
        let capability = if grant_exists {
            Capability::Update
        } else {
            Capability::Write
        };
        self.require(actor, MENUS_MENU_PATH, capability).await?;

        let grant = self
            .repository
            .save_menu_grant(input.menu_id, input.group_id, input.capabilities)
            .await?;
        tracing::info!(
            %actor,
            menu_id = %input.menu_id,
            group_id = %input.group_id,
            read = grant.capabilities.read,
            write = grant.capabilities.write,
            update = grant.capabilities.update,
            delete = grant.capabilities.delete,
            "saved menu grant"
        );
        Ok(grant)
    }
}
