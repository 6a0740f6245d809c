//! Handlers for `/auth`: login, token refresh, logout and the current
//! user.

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use wayfarer_core::error::CoreError;
use wayfarer_db::models::admin_user::{AdminUser, AdminUserResponse};
use wayfarer_db::models::session::CreateSession;
use wayfarer_db::repositories::{AdminUserRepo, SessionRepo};
use wayfarer_events::{event_types, AdminEvent};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: AdminUserResponse,
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = AdminUserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::warn!(username = %input.username, "Failed admin login");
        return Err(bad_credentials());
    }

    // Only reported once the password matched.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    AdminUserRepo::record_login(&state.pool, user.id).await?;
    let response = issue_session(&state, &user, user_agent(&headers)).await?;

    state.event_bus.publish(
        AdminEvent::new(event_types::ADMIN_LOGGED_IN)
            .about("AdminUser", user.id)
            .by(user.id),
    );
    tracing::info!(user_id = user.id, "Admin logged in");

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented session is revoked and a new
/// one issued.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let digest = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_active_by_token_hash(&state.pool, &digest)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = AdminUserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account unavailable".into())))?;

    let response = issue_session(&state, &user, user_agent(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revokes every session of the caller. 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "Admin logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<AdminUserResponse>>> {
    let user = AdminUserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::not_found("AdminUser", auth.user_id))?;
    Ok(Json(DataResponse {
        data: AdminUserResponse::from(&user),
    }))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Sign an access token, persist a refresh session and build the response.
async fn issue_session(
    state: &AppState,
    user: &AdminUser,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_token, refresh_token_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
            user_agent,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: AdminUserResponse::from(user),
    })
}
