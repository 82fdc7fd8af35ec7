use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use barberdesk_core::{AppError, AppResult};
use barberdesk_domain::{Capability, CapabilitySet, GroupId, MenuId, UserId};

use crate::MenuRecord;

use super::{AuthorizationService, MenuGrant, PermissionRepository};

#[derive(Default)]
struct FakePermissionRepository {
    memberships: HashMap<UserId, Vec<GroupId>>,
    grants: Vec<MenuGrant>,
    menus: Vec<MenuRecord>,
    unavailable: bool,
}

#[async_trait]
impl PermissionRepository for FakePermissionRepository {
    async fn list_active_group_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<GroupId>> {
        if self.unavailable {
            return Err(AppError::Persistence("connection refused".to_owned()));
        }

        Ok(self.memberships.get(&user_id).cloned().unwrap_or_default())
    }

    async fn list_menu_grants_for_groups(
        &self,
        group_ids: &[GroupId],
    ) -> AppResult<Vec<MenuGrant>> {
        Ok(self
            .grants
            .iter()
            .filter(|grant| group_ids.contains(&grant.group_id))
            .cloned()
            .collect())
    }

    async fn list_active_menus(&self) -> AppResult<Vec<MenuRecord>> {
        Ok(self.menus.clone())
    }
}

fn grant(menu_path: &str, group_id: GroupId, capabilities: CapabilitySet) -> MenuGrant {
    MenuGrant {
        menu_id: MenuId::new(),
        menu_path: menu_path.to_owned(),
        group_id,
        capabilities,
    }
}

#[tokio::test]
async fn user_without_groups_resolves_to_empty_map() {
    let service = AuthorizationService::new(Arc::new(FakePermissionRepository::default()));

    let permissions = service.resolve_permissions(UserId::new()).await;

    assert!(permissions.is_ok_and(|permissions| permissions.is_empty()));
}

#[tokio::test]
async fn grants_from_multiple_groups_are_unioned_per_flag() {
    let user_id = UserId::new();
    let barbers = GroupId::new();
    let cashiers = GroupId::new();
    let repository = FakePermissionRepository {
        memberships: HashMap::from([(user_id, vec![barbers, cashiers])]),
        grants: vec![
            grant(
                "/dashboard/transactions",
                barbers,
                CapabilitySet::new(true, false, false, false),
            ),
            grant(
                "/dashboard/transactions",
                cashiers,
                CapabilitySet::new(false, true, false, false),
            ),
        ],
        ..FakePermissionRepository::default()
    };
    let service = AuthorizationService::new(Arc::new(repository));

    let permissions = service.resolve_permissions(user_id).await;

    assert_eq!(
        permissions
            .ok()
            .and_then(|permissions| permissions.get("/dashboard/transactions")),
        Some(CapabilitySet::new(true, true, false, false))
    );
}

#[tokio::test]
async fn duplicate_rows_for_same_group_are_or_combined() {
    let user_id = UserId::new();
    let barbers = GroupId::new();
    let repository = FakePermissionRepository {
        memberships: HashMap::from([(user_id, vec![barbers])]),
        grants: vec![
            grant(
                "/dashboard/services",
                barbers,
                CapabilitySet::new(false, false, true, false),
            ),
            grant(
                "/dashboard/services",
                barbers,
                CapabilitySet::new(false, false, false, true),
            ),
        ],
        ..FakePermissionRepository::default()
    };
    let service = AuthorizationService::new(Arc::new(repository));

    let permissions = service.resolve_permissions(user_id).await;

    assert_eq!(
        permissions
            .ok()
            .and_then(|permissions| permissions.get("/dashboard/services")),
        Some(CapabilitySet::new(false, false, true, true))
    );
}

#[tokio::test]
async fn all_false_grant_is_omitted() {
    let user_id = UserId::new();
    let barbers = GroupId::new();
    let repository = FakePermissionRepository {
        memberships: HashMap::from([(user_id, vec![barbers])]),
        grants: vec![grant(
            "/dashboard/products",
            barbers,
            CapabilitySet::default(),
        )],
        ..FakePermissionRepository::default()
    };
    let service = AuthorizationService::new(Arc::new(repository));

    let permissions = service.resolve_permissions(user_id).await;

    assert!(permissions.is_ok_and(|permissions| permissions.is_empty()));
}

#[tokio::test]
async fn require_capability_denies_missing_flag() {
    let user_id = UserId::new();
    let barbers = GroupId::new();
    let repository = FakePermissionRepository {
        memberships: HashMap::from([(user_id, vec![barbers])]),
        grants: vec![grant(
            "/dashboard/users",
            barbers,
            CapabilitySet::new(true, false, false, false),
        )],
        ..FakePermissionRepository::default()
    };
    let service = AuthorizationService::new(Arc::new(repository));

    assert!(
        service
            .require_capability(user_id, "/dashboard/users", Capability::Read)
            .await
            .is_ok()
    );
    assert!(matches!(
        service
            .require_capability(user_id, "/dashboard/users", Capability::Delete)
            .await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn store_failure_is_not_reported_as_empty_permissions() {
    let repository = FakePermissionRepository {
        unavailable: true,
        ..FakePermissionRepository::default()
    };
    let service = AuthorizationService::new(Arc::new(repository));

    let permissions = service.resolve_permissions(UserId::new()).await;

    assert!(matches!(permissions, Err(AppError::Persistence(_))));
}
