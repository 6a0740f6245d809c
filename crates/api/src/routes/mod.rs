pub mod auth;
pub mod content;
pub mod dynamic_tables;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/refresh                                 refresh (public)
/// /auth/logout                                  logout (auth)
/// /auth/me                                      current user (auth)
///
/// /study-pages                                  list, create
/// /study-pages/{id}                             get, update, delete
/// /study-pages/{study_page_id}/categories       list, create
/// /categories/{id}                              get, update, delete
/// /categories/{category_id}/cards               list, create
/// /cards/{id}                                   get, update, delete
/// /cards/{card_id}/detail-page                  get, provision (POST)
/// /detail-pages/{id}                            get, update
///
/// /dynamic-tables                               list, create (admin)
/// /dynamic-tables/{id}                          get, update, delete (admin)
/// /dynamic-tables/{id}/view                     rendered rows (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/study-pages", content::study_page_router())
        .nest("/categories", content::category_router())
        .nest("/cards", content::card_router())
        .nest("/detail-pages", content::detail_page_router())
        .nest("/dynamic-tables", dynamic_tables::router())
}
