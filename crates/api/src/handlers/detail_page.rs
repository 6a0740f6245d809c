//! Handlers for detail pages. A card's detail page is created on first
//! request and never directly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use wayfarer_core::content::{ENTITY_CARD, ENTITY_DETAIL_PAGE};
use wayfarer_core::types::DbId;
use wayfarer_db::models::detail_page::{DetailPage, UpdateDetailPage};
use wayfarer_db::repositories::DetailPageRepo;
use wayfarer_events::{event_types, AdminEvent};

use super::content_changed;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/cards/{card_id}/detail-page
///
/// 404 until the page has been provisioned.
pub async fn get_for_card(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<DataResponse<DetailPage>>> {
    let page = DetailPageRepo::find_by_card_id(&state.pool, card_id)
        .await?
        .ok_or(AppError::not_found("DetailPage for Card", card_id))?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/cards/{card_id}/detail-page
///
/// Get or create the card's detail page: 201 when created, 200 when it
/// already existed.
pub async fn provision_for_card(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(card_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<DetailPage>>)> {
    let (page, created) = DetailPageRepo::get_or_create_for_card(&state.pool, card_id)
        .await?
        .ok_or(AppError::not_found(ENTITY_CARD, card_id))?;

    if !created {
        return Ok((StatusCode::OK, Json(DataResponse { data: page })));
    }

    state.event_bus.publish(
        AdminEvent::new(event_types::DETAIL_PAGE_PROVISIONED)
            .about(ENTITY_DETAIL_PAGE, page.id)
            .by(admin.user_id)
            .with_payload(serde_json::json!({ "card_id": card_id })),
    );
    tracing::info!(detail_page_id = page.id, card_id, "Detail page provisioned");
    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// GET /api/v1/detail-pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DetailPage>>> {
    let page = DetailPageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY_DETAIL_PAGE, id))?;
    Ok(Json(DataResponse { data: page }))
}

/// PUT /api/v1/detail-pages/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDetailPage>,
) -> AppResult<Json<DataResponse<DetailPage>>> {
    input.validate()?;
    let page = DetailPageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY_DETAIL_PAGE, id))?;
    state
        .event_bus
        .publish(content_changed(ENTITY_DETAIL_PAGE, id, "updated", admin.user_id));
    Ok(Json(DataResponse { data: page }))
}
