use barberdesk_core::ExternalIdentity;
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Identity of the current caller as reported by the identity provider.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/identity-response.ts"
)]
pub struct IdentityResponse {
    pub subject: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

impl From<&ExternalIdentity> for IdentityResponse {
    fn from(identity: &ExternalIdentity) -> Self {
        Self {
            subject: identity.subject().to_owned(),
            email: identity.email().map(ToOwned::to_owned),
            first_name: identity.first_name().map(ToOwned::to_owned),
            last_name: identity.last_name().map(ToOwned::to_owned),
            image_url: identity.image_url().map(ToOwned::to_owned),
        }
    }
}
