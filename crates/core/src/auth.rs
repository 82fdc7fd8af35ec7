use serde::{Deserialize, Serialize};

/// Caller identity issued and validated by the external identity provider.
///
/// The same value is persisted in the server session after a token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    subject: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
}

impl ExternalIdentity {
    /// Creates an identity carrying only the provider subject.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            first_name: None,
            last_name: None,
            image_url: None,
        }
    }

    /// Sets the primary email address reported by the provider.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = normalize(email);
        self
    }

    /// Sets the given and family names reported by the provider.
    #[must_use]
    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = normalize(first_name);
        self.last_name = normalize(last_name);
        self
    }

    /// Sets the avatar url reported by the provider.
    #[must_use]
    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = normalize(image_url);
        self
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the given name, if any.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Returns the family name, if any.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Returns the avatar url, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
