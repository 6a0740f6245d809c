//! Handlers for categories, nested under study pages for list/create.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use wayfarer_core::content::{ENTITY_CATEGORY, ENTITY_STUDY_PAGE};
use wayfarer_core::types::DbId;
use wayfarer_db::models::category::{Category, CreateCategory, UpdateCategory};
use wayfarer_db::repositories::{CategoryRepo, StudyPageRepo};

use super::content_changed;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_study_page(state: &AppState, study_page_id: DbId) -> AppResult<()> {
    StudyPageRepo::find_by_id(&state.pool, study_page_id)
        .await?
        .ok_or(AppError::not_found(ENTITY_STUDY_PAGE, study_page_id))?;
    Ok(())
}

/// GET /api/v1/study-pages/{study_page_id}/categories
pub async fn list_by_study_page(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(study_page_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    ensure_study_page(&state, study_page_id).await?;
    let categories = CategoryRepo::list_by_study_page(&state.pool, study_page_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/study-pages/{study_page_id}/categories
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(study_page_id): Path<DbId>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.validate()?;
    ensure_study_page(&state, study_page_id).await?;

    let category = CategoryRepo::create(&state.pool, study_page_id, &input).await?;
    state.event_bus.publish(content_changed(
        ENTITY_CATEGORY,
        category.id,
        "created",
        admin.user_id,
    ));
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY_CATEGORY, id))?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    input.validate()?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY_CATEGORY, id))?;
    state
        .event_bus
        .publish(content_changed(ENTITY_CATEGORY, id, "updated", admin.user_id));
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ENTITY_CATEGORY, id));
    }
    state
        .event_bus
        .publish(content_changed(ENTITY_CATEGORY, id, "deleted", admin.user_id));
    Ok(StatusCode::NO_CONTENT)
}
