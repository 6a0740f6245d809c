//! Routes for the content hierarchy that owns dynamic tables.
//!
//! Reads are open to admins and editors; writes are admin-only.

use axum::routing::get;
use axum::Router;

use crate::handlers::{card, category, detail_page, study_page};
use crate::state::AppState;

/// Mounted at `/study-pages`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{id}                            -> get_by_id
/// PUT    /{id}                            -> update
/// DELETE /{id}                            -> delete
/// GET    /{study_page_id}/categories      -> category::list_by_study_page
/// POST   /{study_page_id}/categories      -> category::create
/// ```
pub fn study_page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(study_page::list).post(study_page::create))
        .route(
            "/{id}",
            get(study_page::get_by_id)
                .put(study_page::update)
                .delete(study_page::delete),
        )
        .route(
            "/{study_page_id}/categories",
            get(category::list_by_study_page).post(category::create),
        )
}

/// Mounted at `/categories`.
///
/// ```text
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /{category_id}/cards     -> card::list_by_category
/// POST   /{category_id}/cards     -> card::create
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
        .route(
            "/{category_id}/cards",
            get(card::list_by_category).post(card::create),
        )
}

/// Mounted at `/cards`.
///
/// ```text
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// GET    /{card_id}/detail-page    -> detail_page::get_for_card
/// POST   /{card_id}/detail-page    -> detail_page::provision_for_card
/// ```
pub fn card_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(card::get_by_id).put(card::update).delete(card::delete),
        )
        .route(
            "/{card_id}/detail-page",
            get(detail_page::get_for_card).post(detail_page::provision_for_card),
        )
}

/// Mounted at `/detail-pages`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// ```
pub fn detail_page_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(detail_page::get_by_id).put(detail_page::update),
    )
}
