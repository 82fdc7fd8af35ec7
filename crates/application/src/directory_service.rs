//! Local user directory ports and the sync use-case.
//!
//! Every authenticated caller is mirrored into a local `users` row keyed by
//! the provider subject. Sync is an idempotent upsert: one insert on first
//! sight, one update when the provider profile changed, nothing otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use barberdesk_core::{AppError, AppResult, ExternalIdentity};
use barberdesk_domain::{EmailAddress, UserId, UserProfile};

/// User record returned by directory queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Local user identifier.
    pub id: UserId,
    /// Subject issued by the identity provider.
    pub external_id: String,
    /// Canonical email address.
    pub email: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Avatar url.
    pub image_url: Option<String>,
    /// Inactive users resolve to no permissions.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last profile update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Returns the stored profile in domain form.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile::new(
            EmailAddress::new(self.email.as_str()).ok(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.image_url.clone(),
        )
    }
}

/// Input for inserting a user seen for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserInput {
    /// Subject issued by the identity provider.
    pub external_id: String,
    /// Validated email address.
    pub email: EmailAddress,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Avatar url.
    pub image_url: Option<String>,
}

/// Repository port for local user persistence.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Finds a user by provider subject.
    async fn find_user_by_external_id(&self, external_id: &str)
    -> AppResult<Option<UserRecord>>;

    /// Finds a user by local identifier.
    async fn find_user_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Inserts a new active user.
    ///
    /// When a concurrent sync already inserted the same subject, the existing
    /// row is returned instead.
    async fn create_user(&self, input: NewUserInput) -> AppResult<UserRecord>;

    /// Replaces the stored profile fields of a user.
    async fn update_user_profile(
        &self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> AppResult<UserRecord>;
}

/// Application service mirroring provider identities into local users.
#[derive(Clone)]
pub struct DirectorySyncService {
    repository: Arc<dyn DirectoryRepository>,
}

impl DirectorySyncService {
    /// Creates a new sync service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self { repository }
    }

    /// Ensures a local user exists for the identity and matches its profile.
    ///
    /// Returns `Ok(None)` when no row exists yet and the identity carries no
    /// email, since a user cannot be created without one.
    pub async fn sync_user(&self, identity: &ExternalIdentity) -> AppResult<Option<UserRecord>> {
        let subject = identity.subject().trim();
        if subject.is_empty() {
            return Err(AppError::IdentityMissing(
                "directory sync requires a resolved provider subject".to_owned(),
            ));
        }

        let incoming = UserProfile::from_identity(identity)?;

        if let Some(existing) = self.repository.find_user_by_external_id(subject).await? {
            let Some(changed) = incoming.changes_from(&existing.profile()) else {
                return Ok(Some(existing));
            };

            let updated = self
                .repository
                .update_user_profile(existing.id, &changed)
                .await?;
            info!(user_id = %updated.id, external_id = subject, "updated user profile from identity provider");
            return Ok(Some(updated));
        }

        let Some(email) = incoming.email().cloned() else {
            warn!(
                external_id = subject,
                "identity has no email address; local user was not created"
            );
            return Ok(None);
        };

        let created = self
            .repository
            .create_user(NewUserInput {
                external_id: subject.to_owned(),
                email,
                first_name: incoming.first_name().map(ToOwned::to_owned),
                last_name: incoming.last_name().map(ToOwned::to_owned),
                image_url: incoming.image_url().map(ToOwned::to_owned),
            })
            .await?;
        info!(user_id = %created.id, external_id = subject, "created local user");

        Ok(Some(created))
    }

    /// Returns a user record by local identifier, if it exists.
    pub async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.repository.find_user_by_id(user_id).await
    }
}

#[cfg(test)]
mod tests;
