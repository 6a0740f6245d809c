//! Handlers for `/dynamic-tables`.
//!
//! Submissions are validated in full before any database access, so a
//! rejected request never writes a row. Updates may move a table to
//! another card; the card's detail page is provisioned on demand.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use wayfarer_core::content::{ENTITY_CARD, ENTITY_DETAIL_PAGE, ENTITY_DYNAMIC_TABLE};
use wayfarer_core::dynamic_table::{render_table, TableView};
use wayfarer_core::pagination::{PageInfo, PageRequest};
use wayfarer_core::types::DbId;
use wayfarer_db::models::dynamic_table::{
    CreateDynamicTable, DynamicTable, DynamicTableFilter, DynamicTableWithContext, ParentTarget,
    UpdateDynamicTable,
};
use wayfarer_db::repositories::{DetailPageRepo, DynamicTableRepo};
use wayfarer_events::{event_types, AdminEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{non_blank, ListTablesParams, ViewParams};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// A table rendered for display: metadata plus one page of display rows.
#[derive(Debug, Serialize)]
pub struct RenderedTable {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    #[serde(flatten)]
    pub view: TableView,
}

fn table_event(event_type: &str, id: DbId, actor: DbId) -> AdminEvent {
    AdminEvent::new(event_type)
        .about(ENTITY_DYNAMIC_TABLE, id)
        .by(actor)
}

/// GET /api/v1/dynamic-tables
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListTablesParams>,
) -> AppResult<Json<PaginatedResponse<DynamicTable>>> {
    let page = PageRequest::new(params.page, params.limit);
    let filter = DynamicTableFilter {
        search: non_blank(params.search),
        detail_page_id: params.detail_page_id,
    };

    let total = DynamicTableRepo::count(&state.pool, &filter).await?;
    let data = DynamicTableRepo::list(&state.pool, &filter, page).await?;

    Ok(Json(PaginatedResponse {
        data,
        pagination: PageInfo::new(page, total),
    }))
}

/// GET /api/v1/dynamic-tables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DynamicTableWithContext>>> {
    let table = DynamicTableRepo::find_with_context(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY_DYNAMIC_TABLE, id))?;
    Ok(Json(DataResponse { data: table }))
}

/// GET /api/v1/dynamic-tables/{id}/view
///
/// Search and paginate the stored rows, returning display strings.
pub async fn view(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Query(params): Query<ViewParams>,
) -> AppResult<Json<DataResponse<RenderedTable>>> {
    let table = DynamicTableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY_DYNAMIC_TABLE, id))?;

    let query = non_blank(params.search).unwrap_or_default();
    let view = render_table(&table.columns, &table.rows, &query, params.page.unwrap_or(1));

    Ok(Json(DataResponse {
        data: RenderedTable {
            id: table.id,
            title: table.title,
            description: table.description,
            icon_url: table.icon_url,
            view,
        },
    }))
}

/// POST /api/v1/dynamic-tables
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateDynamicTable>,
) -> AppResult<(StatusCode, Json<DataResponse<DynamicTableWithContext>>)> {
    let (detail_page_id, content) = input.validate()?;

    DetailPageRepo::find_by_id(&state.pool, detail_page_id)
        .await?
        .ok_or(AppError::not_found(ENTITY_DETAIL_PAGE, detail_page_id))?;

    let table = DynamicTableRepo::create(&state.pool, detail_page_id, &content).await?;
    let table_id = table.id;
    let data = DynamicTableRepo::attach_context(&state.pool, table).await?;

    state.event_bus.publish(
        table_event(event_types::DYNAMIC_TABLE_CREATED, table_id, admin.user_id)
            .with_payload(serde_json::json!({ "title": data.table.title })),
    );
    tracing::info!(
        table_id,
        detail_page_id,
        columns = data.table.columns.len(),
        rows = data.table.rows.len(),
        user_id = admin.user_id,
        "Dynamic table created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// PUT /api/v1/dynamic-tables/{id}
///
/// Full replacement of title, description, icon, columns and rows.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDynamicTable>,
) -> AppResult<Json<DataResponse<DynamicTableWithContext>>> {
    let (target, content) = input.validate()?;

    let current = DynamicTableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY_DYNAMIC_TABLE, id))?;

    let detail_page_id = resolve_parent(&state, &current, target, admin.user_id).await?;

    let table = DynamicTableRepo::update(&state.pool, id, detail_page_id, &content)
        .await?
        .ok_or(AppError::not_found(ENTITY_DYNAMIC_TABLE, id))?;
    let data = DynamicTableRepo::attach_context(&state.pool, table).await?;

    let moved = detail_page_id != current.detail_page_id;
    state.event_bus.publish(
        table_event(event_types::DYNAMIC_TABLE_UPDATED, id, admin.user_id).with_payload(
            serde_json::json!({ "title": data.table.title, "moved": moved }),
        ),
    );
    tracing::info!(
        table_id = id,
        detail_page_id,
        moved,
        user_id = admin.user_id,
        "Dynamic table updated",
    );

    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/dynamic-tables/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DynamicTableRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ENTITY_DYNAMIC_TABLE, id));
    }

    state
        .event_bus
        .publish(table_event(event_types::DYNAMIC_TABLE_DELETED, id, admin.user_id));
    tracing::info!(table_id = id, user_id = admin.user_id, "Dynamic table deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Decide which detail page an updated table belongs to.
///
/// A card target, or a legacy `detail_page_id` that differs from the
/// current parent, names a card whose detail page is fetched or created.
async fn resolve_parent(
    state: &AppState,
    current: &DynamicTable,
    target: ParentTarget,
    actor: DbId,
) -> AppResult<DbId> {
    let card_id = match target {
        ParentTarget::Unchanged => return Ok(current.detail_page_id),
        ParentTarget::LegacyDetailPage(id) if id == current.detail_page_id => return Ok(id),
        ParentTarget::LegacyDetailPage(id) | ParentTarget::Card(id) => id,
    };

    let (page, created) = DetailPageRepo::get_or_create_for_card(&state.pool, card_id)
        .await?
        .ok_or(AppError::not_found(ENTITY_CARD, card_id))?;

    if created {
        state.event_bus.publish(
            AdminEvent::new(event_types::DETAIL_PAGE_PROVISIONED)
                .about(ENTITY_DETAIL_PAGE, page.id)
                .by(actor)
                .with_payload(serde_json::json!({ "card_id": card_id })),
        );
        tracing::info!(detail_page_id = page.id, card_id, "Detail page provisioned");
    }
    Ok(page.id)
}
