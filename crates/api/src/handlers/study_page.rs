//! Handlers for `/study-pages`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use wayfarer_core::content::{generate_slug, validate_slug, ENTITY_STUDY_PAGE};
use wayfarer_core::types::DbId;
use wayfarer_db::models::study_page::{CreateStudyPage, StudyPage, UpdateStudyPage};
use wayfarer_db::repositories::StudyPageRepo;

use super::content_changed;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/study-pages
pub async fn list(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> AppResult<Json<DataResponse<Vec<StudyPage>>>> {
    let pages = StudyPageRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /api/v1/study-pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudyPage>>> {
    let page = StudyPageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY_STUDY_PAGE, id))?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/study-pages
///
/// The slug defaults to one derived from the title. A duplicate slug is a
/// 409 via `uq_study_pages_slug`.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateStudyPage>,
) -> AppResult<(StatusCode, Json<DataResponse<StudyPage>>)> {
    input.validate()?;
    let slug = input
        .slug
        .clone()
        .unwrap_or_else(|| generate_slug(&input.title));
    validate_slug(&slug)?;

    let page =
        StudyPageRepo::create(&state.pool, &input.title, &slug, input.description.as_deref())
            .await?;

    state
        .event_bus
        .publish(content_changed(ENTITY_STUDY_PAGE, page.id, "created", admin.user_id));
    tracing::info!(study_page_id = page.id, slug = %page.slug, "Study page created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// PUT /api/v1/study-pages/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudyPage>,
) -> AppResult<Json<DataResponse<StudyPage>>> {
    input.validate()?;
    if let Some(slug) = &input.slug {
        validate_slug(slug)?;
    }

    let page = StudyPageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY_STUDY_PAGE, id))?;

    state
        .event_bus
        .publish(content_changed(ENTITY_STUDY_PAGE, id, "updated", admin.user_id));
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/study-pages/{id}
///
/// Cascades to categories, cards, detail pages and their tables.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StudyPageRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ENTITY_STUDY_PAGE, id));
    }
    state
        .event_bus
        .publish(content_changed(ENTITY_STUDY_PAGE, id, "deleted", admin.user_id));
    tracing::info!(study_page_id = id, "Study page deleted");
    Ok(StatusCode::NO_CONTENT)
}
