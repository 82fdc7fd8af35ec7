use std::sync::Arc;

use async_trait::async_trait;
use barberdesk_core::{AppError, AppResult, ExternalIdentity};
use barberdesk_domain::{UserId, UserProfile};
use chrono::Utc;
use tokio::sync::Mutex;

use super::{DirectoryRepository, DirectorySyncService, NewUserInput, UserRecord};

#[derive(Default)]
struct FakeDirectoryRepository {
    users: Mutex<Vec<UserRecord>>,
    inserts: Mutex<usize>,
    updates: Mutex<usize>,
    fail_writes: bool,
}

#[async_trait]
impl DirectoryRepository for FakeDirectoryRepository {
    async fn find_user_by_external_id(
        &self,
        external_id: &str,
    ) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.external_id == external_id)
            .cloned())
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.id == user_id)
            .cloned())
    }

    async fn create_user(&self, input: NewUserInput) -> AppResult<UserRecord> {
        if self.fail_writes {
            return Err(AppError::Persistence("users table is read-only".to_owned()));
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
        self.users.lock().await.push(user.clone());
        *self.inserts.lock().await += 1;
        Ok(user)
    }

    async fn update_user_profile(
        &self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> AppResult<UserRecord> {
        let mut users = self.users.lock().await;
        let Some(user) = users.iter_mut().find(|user| user.id == user_id) else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };

        if let Some(email) = profile.email() {
            user.email = email.as_str().to_owned();
        }
        user.first_name = profile.first_name().map(ToOwned::to_owned);
        user.last_name = profile.last_name().map(ToOwned::to_owned);
        user.image_url = profile.image_url().map(ToOwned::to_owned);
        user.updated_at = Utc::now();
        *self.updates.lock().await += 1;
        Ok(user.clone())
    }
}

fn identity(last_name: &str) -> ExternalIdentity {
    ExternalIdentity::new("user_2abc")
        .with_email(Some("Ana@Shop.com".to_owned()))
        .with_names(Some("Ana".to_owned()), Some(last_name.to_owned()))
}

#[tokio::test]
async fn first_sync_creates_active_user() {
    let repository = Arc::new(FakeDirectoryRepository::default());
    let service = DirectorySyncService::new(repository.clone());

    let synced = service.sync_user(&identity("Silva")).await;
    let Ok(Some(user)) = synced else {
        panic!("expected a synced user");
    };

    assert!(user.is_active);
    assert_eq!(user.email, "ana@shop.com");
    assert_eq!(user.external_id, "user_2abc");
    assert_eq!(*repository.inserts.lock().await, 1);
}

#[tokio::test]
async fn repeated_sync_with_same_profile_is_a_no_op() {
    let repository = Arc::new(FakeDirectoryRepository::default());
    let service = DirectorySyncService::new(repository.clone());

    let first = service.sync_user(&identity("Silva")).await;
    let second = service.sync_user(&identity("Silva")).await;

    assert!(matches!(first, Ok(Some(_))));
    assert_eq!(
        first.ok().flatten().map(|user| user.id),
        second.ok().flatten().map(|user| user.id)
    );
    assert_eq!(repository.users.lock().await.len(), 1);
    assert_eq!(*repository.inserts.lock().await, 1);
    assert_eq!(*repository.updates.lock().await, 0);
}

#[tokio::test]
async fn changed_profile_updates_existing_row() {
    let repository = Arc::new(FakeDirectoryRepository::default());
    let service = DirectorySyncService::new(repository.clone());

    assert!(service.sync_user(&identity("Silva")).await.is_ok());
    let updated = service.sync_user(&identity("Costa")).await;

    assert_eq!(
        updated.ok().flatten().and_then(|user| user.last_name),
        Some("Costa".to_owned())
    );
    assert_eq!(repository.users.lock().await.len(), 1);
    assert_eq!(*repository.updates.lock().await, 1);
}

#[tokio::test]
async fn identity_without_email_yields_no_user() {
    let repository = Arc::new(FakeDirectoryRepository::default());
    let service = DirectorySyncService::new(repository.clone());

    let synced = service
        .sync_user(&ExternalIdentity::new("user_no_email"))
        .await;

    assert!(matches!(synced, Ok(None)));
    assert!(repository.users.lock().await.is_empty());
}

#[tokio::test]
async fn empty_subject_is_identity_missing() {
    let service = DirectorySyncService::new(Arc::new(FakeDirectoryRepository::default()));

    let synced = service.sync_user(&ExternalIdentity::new("  ")).await;

    assert!(matches!(synced, Err(AppError::IdentityMissing(_))));
}

#[tokio::test]
async fn store_failure_propagates_as_persistence_error() {
    let repository = Arc::new(FakeDirectoryRepository {
        fail_writes: true,
        ..FakeDirectoryRepository::default()
    });
    let service = DirectorySyncService::new(repository);

    let synced = service.sync_user(&identity("Silva")).await;

    assert!(matches!(synced, Err(AppError::Persistence(_))));
}
