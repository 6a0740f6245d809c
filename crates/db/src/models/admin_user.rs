//! Admin user entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use wayfarer_core::types::{DbId, Timestamp};

/// Full row from the `admin_users` table.
///
/// Carries the password hash, so it is never serialized. Use
/// [`AdminUserResponse`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Admin user as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
}

impl From<&AdminUser> for AdminUserResponse {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            is_active: user.is_active,
            last_login_at: user.last_login_at,
        }
    }
}

/// Insert payload. The password is already hashed.
#[derive(Debug)]
pub struct CreateAdminUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
