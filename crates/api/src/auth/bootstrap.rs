//! First-run admin account.

use wayfarer_core::roles::ROLE_ADMIN;
use wayfarer_db::models::admin_user::CreateAdminUser;
use wayfarer_db::repositories::AdminUserRepo;
use wayfarer_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create `account` as an admin if no admin users exist yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(pool: &DbPool, account: &BootstrapAdmin) -> AppResult<bool> {
    if AdminUserRepo::count(pool).await? > 0 {
        return Ok(false);
    }
    validate_password_strength(&account.password)?;

    let password_hash = hash_password(&account.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let user = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
