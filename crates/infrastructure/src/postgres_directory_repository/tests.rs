use barberdesk_application::{DirectoryRepository, NewUserInput};
use barberdesk_domain::{EmailAddress, UserProfile};

use crate::test_support::{test_pool, unique_subject};

use super::PostgresDirectoryRepository;

fn new_user(subject: &str) -> NewUserInput {
    let email = EmailAddress::new(format!("{}@barberdesk.test", subject.replace('|', ".")));
    let Ok(email) = email else {
        panic!("generated email should be valid");
    };

    NewUserInput {
        external_id: subject.to_owned(),
        email,
        first_name: Some("Rosa".to_owned()),
        last_name: None,
        image_url: None,
    }
}

#[tokio::test]
async fn create_user_is_idempotent_per_external_id() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresDirectoryRepository::new(pool);
    let subject = unique_subject("user");

    let first = repository.create_user(new_user(&subject)).await;
    let second = repository.create_user(new_user(&subject)).await;

    let (Ok(first), Ok(second)) = (first, second) else {
        panic!("both creates should succeed");
    };
    assert_eq!(first.id, second.id);
    assert!(first.is_active);
}

#[tokio::test]
async fn update_user_profile_keeps_email_when_absent() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresDirectoryRepository::new(pool);
    let subject = unique_subject("user");
    let Ok(created) = repository.create_user(new_user(&subject)).await else {
        panic!("create should succeed");
    };

    let profile = UserProfile::new(None, Some("Rosa".to_owned()), Some("Parks".to_owned()), None);
    let updated = repository.update_user_profile(created.id, &profile).await;

    assert!(updated.is_ok_and(|user| {
        user.email == created.email && user.last_name.as_deref() == Some("Parks")
    }));
}
