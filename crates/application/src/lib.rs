//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod directory_service;
mod identity_ports;
mod security_admin_ports;
mod security_admin_service;

pub use authorization_service::{
    AuthorizationService, MenuGrant, NavigationNode, PermissionRepository,
};
pub use directory_service::{DirectoryRepository, DirectorySyncService, NewUserInput, UserRecord};
pub use identity_ports::IdentityProvider;
pub use security_admin_ports::{
    GroupMemberRecord, GroupRecord, MenuGrantRecord, MenuRecord, SecurityAdminRepository,
};
pub use security_admin_service::{
    ADMINISTRATORS_GROUP_NAME, CreateGroupInput, CreateMenuInput, GROUPS_MENU_PATH,
    MENUS_MENU_PATH, SaveMenuGrantInput, SecurityAdminService, USERS_MENU_PATH,
};
