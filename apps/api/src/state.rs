use std::sync::Arc;

use barberdesk_application::{
    AuthorizationService, DirectorySyncService, IdentityProvider, SecurityAdminService,
};
use barberdesk_domain::MenuPath;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub directory_sync_service: DirectorySyncService,
    pub authorization_service: AuthorizationService,
    pub security_admin_service: SecurityAdminService,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub frontend_url: String,
    pub sign_in_path: MenuPath,
    pub bootstrap_token: Option<String>,
}
