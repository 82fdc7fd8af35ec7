pub mod health;
pub mod navigation;
pub mod not_found;
pub mod permissions;
pub mod security;
