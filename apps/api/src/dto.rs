mod common;
mod navigation;
mod permissions;
mod security;

pub use common::{HealthResponse, IdentityResponse};
pub use navigation::NavigationNodeResponse;
pub use permissions::{MenuPermissionsResponse, PermissionsResponse, PermissionsUserResponse};
pub use security::{
    AddGroupMemberRequest, CreateGroupRequest, CreateMenuRequest, GroupMemberResponse,
    GroupResponse, MenuGrantResponse, MenuResponse, SaveMenuGrantRequest, SetActiveRequest,
    UserResponse,
};
