//! Authentication and authorization for the clinic API.
//!
//! Stateless per-request verification: a bearer token is checked against
//! the signing secret, the referenced user is looked up through the
//! [`UserDirectory`] seam, and a sanitized [`AuthUser`] rides on the
//! request extensions for handlers and the role guard.

pub mod guard;
pub mod jwt;
pub mod password;
pub mod principal;

pub use guard::{authenticate, authorize, AuthState, CurrentUser};
pub use jwt::{Claims, JwtCodec};
pub use principal::AuthUser;

use async_trait::async_trait;

/// Role names the authorization guard compares against. Seeded at bootstrap.
pub const ROLE_SUPER_ADMIN: &str = "Super Admin";
pub const ROLE_PMS_ADMIN: &str = "PMS Admin";
pub const ROLE_CASHIER: &str = "Cashier";
pub const ROLE_RECEPTION: &str = "Reception";

/// Routes restricted to administrative staff.
pub const ADMIN_ROLES: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_PMS_ADMIN];

/// Lookup seam between the guard and the user store. The directory module
/// implements this; the guard only sees active, sanitized users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve an active user by the id+email pair baked into the token.
    /// `None` when the user is missing, deactivated, or the email changed.
    async fn find_active_user(&self, id: i32, email: &str) -> anyhow::Result<Option<AuthUser>>;
}
