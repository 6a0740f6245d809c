#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use wayfarer_api::auth::jwt::JwtConfig;
use wayfarer_api::auth::password::hash_password;
use wayfarer_api::config::ServerConfig;
use wayfarer_api::router::build_app_router;
use wayfarer_api::state::AppState;
use wayfarer_db::models::admin_user::CreateAdminUser;
use wayfarer_db::repositories::AdminUserRepo;
use wayfarer_events::EventBus;

pub const TEST_PASSWORD: &str = "consulting-desk-2025";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "wayfarer-integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        bootstrap_admin: None,
    }
}

/// Same router and middleware as production, over the test pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an active account with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> i64 {
    let user = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            username: username.to_string(),
            email: format!("{username}@wayfarer.test"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
    user.id
}

/// Log in through the API and return the access token.
pub async fn login(app: Router, username: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": username, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create an account with `role` and return a token for it.
pub async fn token_for(pool: &PgPool, app: Router, username: &str, role: &str) -> String {
    create_user(pool, username, role).await;
    login(app, username).await
}

/// Ids of a freshly created study page -> category -> card chain.
pub struct CardChain {
    pub study_page_id: i64,
    pub category_id: i64,
    pub card_id: i64,
}

pub async fn create_card_chain(app: Router, token: &str, slug: &str, card_title: &str) -> CardChain {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/study-pages",
        json!({ "title": format!("Study {slug}"), "slug": slug }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let study_page_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/study-pages/{study_page_id}/categories"),
        json!({ "name": "Universities" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/categories/{category_id}/cards"),
        json!({ "title": card_title }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let card_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    CardChain {
        study_page_id,
        category_id,
        card_id,
    }
}

/// Provision the card's detail page and return its id.
pub async fn provision_detail_page(app: Router, token: &str, card_id: i64) -> i64 {
    let response = post_json_auth(
        app,
        &format!("/api/v1/cards/{card_id}/detail-page"),
        json!({}),
        token,
    )
    .await;
    assert!(response.status().is_success());
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
