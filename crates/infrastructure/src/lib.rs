//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_rbac_repository;
mod jwt_identity_provider;
mod postgres_directory_repository;
mod postgres_permission_repository;
mod postgres_security_admin_repository;

#[cfg(test)]
mod test_support;

pub use in_memory_rbac_repository::InMemoryRbacRepository;
pub use jwt_identity_provider::{JwtIdentityProvider, JwtVerificationKey};
pub use postgres_directory_repository::PostgresDirectoryRepository;
pub use postgres_permission_repository::PostgresPermissionRepository;
pub use postgres_security_admin_repository::PostgresSecurityAdminRepository;
