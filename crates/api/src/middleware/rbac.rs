//! Role gates layered on top of [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wayfarer_core::error::CoreError;
use wayfarer_core::roles::{ROLE_ADMIN, ROLE_EDITOR};

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Admin-only access. 401 without a valid token, 403 for other roles.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

/// Admins and editors. Used for read-only content endpoints.
#[derive(Debug, Clone)]
pub struct RequireStaff(pub AuthUser);

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[&str],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed.contains(&user.role.as_str()) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Requires one of: {}",
            allowed.join(", ")
        ))));
    }
    Ok(user)
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[ROLE_ADMIN]).await.map(Self)
    }
}

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[ROLE_ADMIN, ROLE_EDITOR])
            .await
            .map(Self)
    }
}
