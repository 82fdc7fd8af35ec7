use std::sync::Arc;

use barberdesk_application::{AuthorizationService, DirectorySyncService, SecurityAdminService};
use barberdesk_core::AppError;
use barberdesk_infrastructure::{
    JwtIdentityProvider, PostgresDirectoryRepository, PostgresPermissionRepository,
    PostgresSecurityAdminRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let identity_provider = JwtIdentityProvider::new(
        config.identity.key.clone(),
        config.identity.issuer.as_deref(),
        config.identity.audience.as_deref(),
    )?;

    let authorization_service =
        AuthorizationService::new(Arc::new(PostgresPermissionRepository::new(pool.clone())));
    let security_admin_service = SecurityAdminService::new(
        authorization_service.clone(),
        Arc::new(PostgresSecurityAdminRepository::new(pool.clone())),
    );

    Ok(AppState {
        directory_sync_service: DirectorySyncService::new(Arc::new(
            PostgresDirectoryRepository::new(pool),
        )),
        authorization_service,
        security_admin_service,
        identity_provider: Arc::new(identity_provider),
        frontend_url: config.frontend_url.clone(),
        sign_in_path: config.sign_in_path.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    })
}
