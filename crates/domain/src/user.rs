//! Local user directory types.

use barberdesk_core::{AppError, AppResult, ExternalIdentity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a local user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Profile attributes mirrored from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    email: Option<EmailAddress>,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
}

impl UserProfile {
    /// Creates a profile from already validated parts.
    #[must_use]
    pub fn new(
        email: Option<EmailAddress>,
        first_name: Option<String>,
        last_name: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            image_url,
        }
    }

    /// Extracts and validates the profile carried by a provider identity.
    pub fn from_identity(identity: &ExternalIdentity) -> AppResult<Self> {
        let email = identity.email().map(EmailAddress::new).transpose()?;

        Ok(Self {
            email,
            first_name: identity.first_name().map(ToOwned::to_owned),
            last_name: identity.last_name().map(ToOwned::to_owned),
            image_url: identity.image_url().map(ToOwned::to_owned),
        })
    }

    /// Returns the profile that should be stored when this incoming profile
    /// is applied over `stored`, or `None` when nothing changes.
    ///
    /// A missing incoming email keeps the stored one.
    #[must_use]
    pub fn changes_from(&self, stored: &UserProfile) -> Option<UserProfile> {
        let merged = UserProfile {
            email: self.email.clone().or_else(|| stored.email.clone()),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            image_url: self.image_url.clone(),
        };

        (&merged != stored).then_some(merged)
    }

    /// Returns the email address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Returns the given name, if known.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Returns the family name, if known.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Returns the avatar url, if known.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use barberdesk_core::ExternalIdentity;

    use super::*;

    fn email(value: &str) -> EmailAddress {
        EmailAddress::new(value).unwrap_or_else(|error| panic!("invalid test email: {error}"))
    }

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("USER@Example.COM");
        assert!(email.is_ok());
        assert_eq!(
            email.unwrap_or_else(|_| panic!("test")).as_str(),
            "user@example.com"
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_with_two_at_signs_is_rejected() {
        assert!(EmailAddress::new("a@b@shop.com").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
    }

    #[test]
    fn profile_from_identity_validates_email() {
        let identity = ExternalIdentity::new("user_1").with_email(Some("broken".to_owned()));
        assert!(UserProfile::from_identity(&identity).is_err());
    }

    #[test]
    fn identical_profile_produces_no_changes() {
        let stored = UserProfile::new(
            Some(email("ana@shop.com")),
            Some("Ana".to_owned()),
            Some("Silva".to_owned()),
            None,
        );

        assert_eq!(stored.changes_from(&stored), None);
    }

    #[test]
    fn changed_last_name_produces_merged_profile() {
        let stored = UserProfile::new(
            Some(email("ana@shop.com")),
            Some("Ana".to_owned()),
            Some("Silva".to_owned()),
            None,
        );
        let incoming = UserProfile::new(
            Some(email("ana@shop.com")),
            Some("Ana".to_owned()),
            Some("Costa".to_owned()),
            None,
        );

        let changes = incoming.changes_from(&stored);
        assert_eq!(
            changes.as_ref().and_then(UserProfile::last_name),
            Some("Costa")
        );
    }

    #[test]
    fn missing_incoming_email_keeps_stored_email() {
        let stored = UserProfile::new(Some(email("ana@shop.com")), None, None, None);
        let incoming = UserProfile::new(None, None, None, None);

        assert_eq!(incoming.changes_from(&stored), None);
    }
}
