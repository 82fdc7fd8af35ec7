//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod group;
mod guard;
mod menu;
mod security;
mod user;

pub use group::{GroupDefinition, GroupId};
pub use guard::{GuardState, GuardView, IdentityResolution, RouteGuard};
pub use menu::{MenuDefinition, MenuId, MenuPath};
pub use security::{Capability, CapabilitySet, PermissionMap};
pub use user::{EmailAddress, UserId, UserProfile};
