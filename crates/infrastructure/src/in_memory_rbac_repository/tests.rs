use std::sync::Arc;

use barberdesk_application::{
    AuthorizationService, DirectoryRepository, NewUserInput, SecurityAdminRepository,
};
use barberdesk_core::AppError;
use barberdesk_domain::{
    CapabilitySet, EmailAddress, GroupDefinition, GroupId, MenuDefinition, UserId, UserProfile,
};

use super::InMemoryRbacRepository;

async fn seeded_user(repository: &InMemoryRbacRepository, subject: &str) -> UserId {
    let Ok(email) = EmailAddress::new(format!("{subject}@barberdesk.test")) else {
        panic!("email should be valid");
    };
    repository
        .create_user(NewUserInput {
            external_id: subject.to_owned(),
            email,
            first_name: None,
            last_name: None,
            image_url: None,
        })
        .await
        .map(|user| user.id)
        .unwrap_or_else(|error| panic!("create user failed: {error}"))
}

#[tokio::test]
async fn inactive_menu_is_excluded_from_resolution() {
    let repository = Arc::new(InMemoryRbacRepository::new());
    let user_id = seeded_user(&repository, "ana").await;
    let (Ok(menu), Ok(group)) = (
        MenuDefinition::new("Services", "/dashboard/services", None, None, 0),
        GroupDefinition::new("Barbers", None),
    ) else {
        panic!("definitions should be valid");
    };
    let (Ok(menu), Ok(group)) = (
        repository.create_menu(&menu).await,
        repository.create_group(&group).await,
    ) else {
        panic!("menu and group should be created");
    };
    assert!(repository.add_group_member(group.id, user_id, None).await.is_ok());
    assert!(repository
        .save_menu_grant(menu.id, group.id, CapabilitySet::full())
        .await
        .is_ok());
    let service = AuthorizationService::new(repository.clone());

    let before = service.resolve_permissions(user_id).await;
    assert!(before.is_ok_and(|permissions| permissions.len() == 1));

    assert!(repository.set_menu_active(menu.id, false).await.is_ok());
    let after = service.resolve_permissions(user_id).await;
    assert!(after.is_ok_and(|permissions| permissions.is_empty()));
}

/// Creates one menu, one group holding full access on it and `user_id` as its only member.
async fn single_membership_grant(
    repository: &InMemoryRbacRepository,
    user_id: UserId,
) -> GroupId {
    let (Ok(menu), Ok(group)) = (
        MenuDefinition::new("Transactions", "/dashboard/transactions", None, None, 0),
        GroupDefinition::new("Front desk", None),
    ) else {
        panic!("definitions should be valid");
    };
    let (Ok(menu), Ok(group)) = (
        repository.create_menu(&menu).await,
        repository.create_group(&group).await,
    ) else {
        panic!("menu and group should be created");
    };
    assert!(repository.add_group_member(group.id, user_id, None).await.is_ok());
    assert!(repository
        .save_menu_grant(menu.id, group.id, CapabilitySet::full())
        .await
        .is_ok());
    group.id
}

#[tokio::test]
async fn deactivating_only_group_clears_permissions() {
    let repository = Arc::new(InMemoryRbacRepository::new());
    let user_id = seeded_user(&repository, "carla").await;
    let group_id = single_membership_grant(&repository, user_id).await;
    let service = AuthorizationService::new(repository.clone());

    let before = service.resolve_permissions(user_id).await;
    assert!(before.is_ok_and(|permissions| permissions.len() == 1));

    assert!(repository.set_group_active(group_id, false).await.is_ok());
    let after = service.resolve_permissions(user_id).await;
    assert!(after.is_ok_and(|permissions| permissions.is_empty()));
}

#[tokio::test]
async fn inactive_user_resolves_to_no_permissions() {
    let repository = Arc::new(InMemoryRbacRepository::new());
    let user_id = seeded_user(&repository, "dario").await;
    single_membership_grant(&repository, user_id).await;
    let service = AuthorizationService::new(repository.clone());

    assert!(repository.set_user_active(user_id, false).await.is_ok());
    let permissions = service.resolve_permissions(user_id).await;

    assert!(permissions.is_ok_and(|permissions| permissions.is_empty()));
}

#[tokio::test]
async fn add_group_member_keeps_first_assignment() {
    let repository = InMemoryRbacRepository::new();
    let admin = seeded_user(&repository, "admin").await;
    let member = seeded_user(&repository, "member").await;
    let Ok(group) = GroupDefinition::new("Cashiers", None) else {
        panic!("group should be valid");
    };
    let Ok(group) = repository.create_group(&group).await else {
        panic!("group should be created");
    };

    assert!(repository.add_group_member(group.id, member, Some(admin)).await.is_ok());
    let repeated = repository.add_group_member(group.id, member, None).await;

    assert!(repeated.is_ok_and(|membership| membership.assigned_by == Some(admin)));
    assert!(
        repository
            .list_group_members(group.id)
            .await
            .is_ok_and(|members| members.len() == 1)
    );
}

#[tokio::test]
async fn duplicate_email_for_new_subject_is_conflict() {
    let repository = InMemoryRbacRepository::new();
    seeded_user(&repository, "ana").await;
    let Ok(email) = EmailAddress::new("ana@barberdesk.test") else {
        panic!("email should be valid");
    };

    let result = repository
        .create_user(NewUserInput {
            external_id: "other-subject".to_owned(),
            email,
            first_name: None,
            last_name: None,
            image_url: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn profile_update_to_taken_email_is_conflict() {
    let repository = InMemoryRbacRepository::new();
    seeded_user(&repository, "ana").await;
    let bea = seeded_user(&repository, "bea").await;
    let Ok(taken) = EmailAddress::new("ana@barberdesk.test") else {
        panic!("email should be valid");
    };

    let result = repository
        .update_user_profile(bea, &UserProfile::new(Some(taken), None, None, None))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let Ok(Some(stored)) = repository.find_user_by_id(bea).await else {
        panic!("user should still exist");
    };
    assert_eq!(stored.email, "bea@barberdesk.test");
}

#[tokio::test]
async fn profile_update_keeping_own_email_succeeds() {
    let repository = InMemoryRbacRepository::new();
    let ana = seeded_user(&repository, "ana").await;
    let Ok(own) = EmailAddress::new("ana@barberdesk.test") else {
        panic!("email should be valid");
    };

    let result = repository
        .update_user_profile(
            ana,
            &UserProfile::new(Some(own), Some("Ana".to_owned()), None, None),
        )
        .await;

    assert!(result.is_ok_and(|user| user.first_name.as_deref() == Some("Ana")));
}
