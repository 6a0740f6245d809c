//! Handlers for cards, nested under categories for list/create.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use wayfarer_core::content::{ENTITY_CARD, ENTITY_CATEGORY};
use wayfarer_core::types::DbId;
use wayfarer_db::models::card::{Card, CreateCard, UpdateCard};
use wayfarer_db::repositories::{CardRepo, CategoryRepo};

use super::content_changed;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_category(state: &AppState, category_id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::not_found(ENTITY_CATEGORY, category_id))?;
    Ok(())
}

/// GET /api/v1/categories/{category_id}/cards
pub async fn list_by_category(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(category_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Card>>>> {
    ensure_category(&state, category_id).await?;
    let cards = CardRepo::list_by_category(&state.pool, category_id).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// POST /api/v1/categories/{category_id}/cards
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(category_id): Path<DbId>,
    Json(input): Json<CreateCard>,
) -> AppResult<(StatusCode, Json<DataResponse<Card>>)> {
    input.validate()?;
    ensure_category(&state, category_id).await?;

    let card = CardRepo::create(&state.pool, category_id, &input).await?;
    state
        .event_bus
        .publish(content_changed(ENTITY_CARD, card.id, "created", admin.user_id));
    tracing::info!(card_id = card.id, category_id, "Card created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: card })))
}

/// GET /api/v1/cards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Card>>> {
    let card = CardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY_CARD, id))?;
    Ok(Json(DataResponse { data: card }))
}

/// PUT /api/v1/cards/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCard>,
) -> AppResult<Json<DataResponse<Card>>> {
    input.validate()?;
    let card = CardRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY_CARD, id))?;
    state
        .event_bus
        .publish(content_changed(ENTITY_CARD, id, "updated", admin.user_id));
    Ok(Json(DataResponse { data: card }))
}

/// DELETE /api/v1/cards/{id}
///
/// Removes the card's detail page and tables with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CardRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ENTITY_CARD, id));
    }
    state
        .event_bus
        .publish(content_changed(ENTITY_CARD, id, "deleted", admin.user_id));
    Ok(StatusCode::NO_CONTENT)
}
