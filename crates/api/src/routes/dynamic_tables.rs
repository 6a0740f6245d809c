use axum::routing::get;
use axum::Router;

use crate::handlers::dynamic_table;
use crate::state::AppState;

/// Routes mounted at `/dynamic-tables`. All require the admin role.
///
/// ```text
/// GET    /            -> list (?page, limit, search, detail_page_id)
/// POST   /            -> create
/// GET    /{id}        -> get_by_id (with detail page, card, category, study page)
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// GET    /{id}/view   -> view (?search, page)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dynamic_table::list).post(dynamic_table::create))
        .route(
            "/{id}",
            get(dynamic_table::get_by_id)
                .put(dynamic_table::update)
                .delete(dynamic_table::delete),
        )
        .route("/{id}/view", get(dynamic_table::view))
}
