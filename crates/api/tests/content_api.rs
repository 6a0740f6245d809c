//! HTTP-level tests for the study page / category / card / detail page
//! hierarchy.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_card_chain, delete_auth, get_auth, post_json_auth, put_json_auth, token_for,
};
use serde_json::json;
use sqlx::PgPool;
use wayfarer_core::roles::{ROLE_ADMIN, ROLE_EDITOR};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_study_page_slug_is_generated(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;

    let response = post_json_auth(
        app,
        "/api/v1/study-pages",
        json!({ "title": "Study in Germany" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["slug"], "study-in-germany");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;
    let body = json!({ "title": "Study in Canada", "slug": "canada" });

    let response = post_json_auth(app.clone(), "/api/v1/study-pages", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/study-pages", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_slug_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;

    let response = post_json_auth(
        app,
        "/api/v1/study-pages",
        json!({ "title": "Study in Japan", "slug": "Not A Slug" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_card_image_url_must_be_a_url(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;
    let chain = create_card_chain(app.clone(), &token, "usa", "MIT").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/categories/{}/cards", chain.category_id),
        json!({ "title": "Stanford", "image_url": "not a url" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_under_missing_study_page(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;

    let response = post_json_auth(
        app,
        "/api/v1/study-pages/999999/categories",
        json!({ "name": "Universities" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_page_provisioned_once(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;
    let chain = create_card_chain(app.clone(), &token, "usa", "MIT").await;
    let uri = format!("/api/v1/cards/{}/detail-page", chain.card_id);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(app.clone(), &uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;
    assert_eq!(first["data"]["title"], "MIT");

    let response = post_json_auth(app.clone(), &uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], first["data"]["id"]);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_provision_for_missing_card(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;

    let response = post_json_auth(app, "/api/v1/cards/999999/detail-page", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Card with id 999999 not found"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_detail_page_content(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;
    let chain = create_card_chain(app.clone(), &token, "usa", "MIT").await;
    let page_id = common::provision_detail_page(app.clone(), &token, chain.card_id).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/detail-pages/{page_id}"),
        json!({ "content": "Cambridge, Massachusetts" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "Cambridge, Massachusetts");
    assert_eq!(json["data"]["title"], "MIT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_reads_but_cannot_write(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;
    let editor = token_for(&pool, app.clone(), "editor", ROLE_EDITOR).await;
    let chain = create_card_chain(app.clone(), &admin, "usa", "MIT").await;

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/study-pages/{}/categories", chain.study_page_id),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(
        app,
        &format!("/api/v1/cards/{}", chain.card_id),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_study_page_cascades(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "admin", ROLE_ADMIN).await;
    let chain = create_card_chain(app.clone(), &token, "usa", "MIT").await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/study-pages/{}", chain.study_page_id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/cards/{}", chain.card_id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
