use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use barberdesk_application::{DirectoryRepository, NewUserInput, UserRecord};
use barberdesk_core::{AppError, AppResult};
use barberdesk_domain::{UserId, UserProfile};

/// PostgreSQL-backed repository for the local user directory.
#[derive(Clone)]
pub struct PostgresDirectoryRepository {
    pool: PgPool,
}

impl PostgresDirectoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    id: Uuid,
    external_id: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            external_id: row.external_id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            image_url: row.image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub(crate) const USER_COLUMNS: &str = "id, external_id, email, first_name, last_name, image_url, is_active, created_at, updated_at";

#[async_trait]
impl DirectoryRepository for PostgresDirectoryRepository {
    async fn find_user_by_external_id(&self, external_id: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!(
                "failed to find user by external id '{external_id}': {error}"
            ))
        })?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to find user '{user_id}': {error}"))
        })?;

        Ok(row.map(UserRecord::from))
    }

    async fn create_user(&self, input: NewUserInput) -> AppResult<UserRecord> {
        let inserted = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, external_id, email, first_name, last_name, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (external_id) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.external_id.as_str())
        .bind(input.email.as_str())
        .bind(input.first_name.as_deref())
        .bind(input.last_name.as_deref())
        .bind(input.image_url.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_email_conflict(error, input.email.as_str()))?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        // A concurrent first sync for the same subject won the insert.
        self.find_user_by_external_id(input.external_id.as_str())
            .await?
            .ok_or_else(|| {
                AppError::Persistence(format!(
                    "user with external id '{}' vanished after conflicting insert",
                    input.external_id
                ))
            })
    }

    async fn update_user_profile(
        &self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> AppResult<UserRecord> {
        let email = profile.email().map(|email| email.as_str());
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                first_name = $3,
                last_name = $4,
                image_url = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(email)
        .bind(profile.first_name())
        .bind(profile.last_name())
        .bind(profile.image_url())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_email_conflict(error, email.unwrap_or_default()))?;

        row.map(UserRecord::from)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }
}

fn map_email_conflict(error: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!(
            "email '{email}' is already bound to another identity"
        ));
    }

    AppError::Persistence(format!("failed to persist user: {error}"))
}

#[cfg(test)]
mod tests;
