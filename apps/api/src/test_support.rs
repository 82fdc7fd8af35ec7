use std::sync::Arc;

use barberdesk_application::{
    AuthorizationService, DirectorySyncService, PermissionRepository, SecurityAdminService,
};
use barberdesk_domain::MenuPath;
use barberdesk_infrastructure::{InMemoryRbacRepository, JwtIdentityProvider, JwtVerificationKey};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

use crate::state::AppState;

pub const IDENTITY_SECRET: &str = "barberdesk-api-test-secret";
pub const FRONTEND_URL: &str = "http://localhost:3000";
pub const BOOTSTRAP_TOKEN: &str = "let-me-in";

/// Builds state over one in-memory store used by every port.
pub fn in_memory_state(repository: Arc<InMemoryRbacRepository>) -> AppState {
    state_with_permissions(repository.clone(), repository)
}

/// Builds state whose permission lookups go through a separate repository.
pub fn state_with_permissions(
    repository: Arc<InMemoryRbacRepository>,
    permissions: Arc<dyn PermissionRepository>,
) -> AppState {
    let identity_provider = JwtIdentityProvider::new(
        JwtVerificationKey::Hs256Secret(IDENTITY_SECRET.to_owned()),
        None,
        None,
    )
    .unwrap_or_else(|error| panic!("identity provider should build: {error}"));
    let authorization_service = AuthorizationService::new(permissions);

    AppState {
        directory_sync_service: DirectorySyncService::new(repository.clone()),
        security_admin_service: SecurityAdminService::new(
            authorization_service.clone(),
            repository,
        ),
        authorization_service,
        identity_provider: Arc::new(identity_provider),
        frontend_url: FRONTEND_URL.to_owned(),
        sign_in_path: MenuPath::new("/sign-in")
            .unwrap_or_else(|error| panic!("sign-in path should be valid: {error}")),
        bootstrap_token: Some(BOOTSTRAP_TOKEN.to_owned()),
    }
}

/// Signs a provider session token for `subject` with optional email.
pub fn session_token(subject: &str, email: Option<&str>) -> String {
    let claims = json!({
        "sub": subject,
        "email": email,
        "given_name": "Rosa",
        "family_name": "Diaz",
        "exp": (Utc::now() + Duration::minutes(5)).timestamp(),
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
    )
    .unwrap_or_else(|error| panic!("token should encode: {error}"))
}
