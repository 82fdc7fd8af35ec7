mod bootstrap;
mod session;

pub use bootstrap::bootstrap_handler;
pub use session::{logout_handler, me_handler, session_exchange_handler};

/// Session key holding the verified provider identity.
pub const SESSION_IDENTITY_KEY: &str = "external_identity";
/// Absolute session creation timestamp.
pub const SESSION_CREATED_AT_KEY: &str = "session_created_at";
/// Sessions older than this are discarded regardless of activity.
pub const SESSION_ABSOLUTE_LIFETIME_SECONDS: i64 = 12 * 60 * 60;
