use async_trait::async_trait;

use barberdesk_core::{AppResult, ExternalIdentity};

/// Port for the external identity provider.
///
/// Authentication happens entirely at the provider; this port only answers
/// "which caller does this session token belong to, if any".
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies a provider-issued session token.
    ///
    /// Returns `Ok(None)` for malformed, expired or foreign tokens.
    async fn verify_session_token(&self, token: &str) -> AppResult<Option<ExternalIdentity>>;
}
