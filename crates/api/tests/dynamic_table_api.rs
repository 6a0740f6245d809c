//! HTTP-level tests for `/api/v1/dynamic-tables`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_card_chain, delete_auth, get, get_auth, post_json, post_json_auth,
    provision_detail_page, put_json_auth, token_for,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use wayfarer_core::roles::{ROLE_ADMIN, ROLE_EDITOR};

fn deadline_columns() -> Value {
    json!([
        { "id": "c1", "name": "University", "type": "text" },
        { "id": "c2", "name": "Deadline", "type": "date" },
        { "id": "c3", "name": "Status", "type": "status" }
    ])
}

fn deadline_rows() -> Value {
    json!([
        { "id": "r1", "data": { "c1": "MIT", "c2": "2025-01-15", "c3": "Open" } }
    ])
}

async fn table_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dynamic_tables")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

/// Admin token plus a provisioned detail page to attach tables to.
async fn setup(pool: &PgPool) -> (axum::Router, String, i64) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(pool, app.clone(), "admin", ROLE_ADMIN).await;
    let chain = create_card_chain(app.clone(), &token, "usa", "MIT").await;
    let detail_page_id = provision_detail_page(app.clone(), &token, chain.card_id).await;
    (app, token, detail_page_id)
}

async fn create_table(app: axum::Router, token: &str, detail_page_id: i64, title: &str) -> Value {
    let response = post_json_auth(
        app,
        "/api/v1/dynamic-tables",
        json!({
            "title": title,
            "detail_page_id": detail_page_id,
            "columns": deadline_columns(),
            "rows": deadline_rows(),
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/dynamic-tables").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(app, "/api/v1/dynamic-tables", json!({ "title": "x" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(&pool, app.clone(), "editor", ROLE_EDITOR).await;

    let response = get_auth(app, "/api/v1/dynamic-tables", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_renders_and_searches(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;

    let created = create_table(app.clone(), &token, detail_page_id, "Application deadlines").await;
    let table = &created["data"]["table"];
    assert_eq!(table["detail_page_id"], detail_page_id);
    assert_eq!(table["rows"][0]["data"]["c1"], "MIT");
    assert_eq!(created["data"]["card"]["title"], "MIT");
    assert_eq!(created["data"]["study_page"]["slug"], "usa");
    let id = table["id"].as_i64().unwrap();

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/dynamic-tables/{id}/view?search=mit"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    let cells = &view["data"]["rows"][0]["cells"];
    assert_eq!(cells[0], json!({ "kind": "text", "text": "MIT" }));
    assert_eq!(cells[1], json!({ "kind": "date", "text": "1/15/2025" }));
    assert_eq!(
        cells[2],
        json!({ "kind": "badge", "label": "Open", "color": "green", "icon": "check" })
    );
    assert_eq!(view["data"]["total_rows"], 1);

    let response = get_auth(
        app,
        &format!("/api/v1/dynamic-tables/{id}/view?search=closed"),
        &token,
    )
    .await;
    let view = body_json(response).await;
    assert_eq!(view["data"]["total_rows"], 0);
    assert_eq!(view["data"]["rows"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_backfills_missing_cells(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/dynamic-tables",
        json!({
            "title": "Fees",
            "detail_page_id": detail_page_id,
            "columns": deadline_columns(),
            "rows": [{ "id": "r1", "data": { "c1": "MIT" } }],
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"]["table"]["rows"][0]["data"];
    assert_eq!(data["c2"], "");
    assert_eq!(data["c3"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_missing_fields_writes_nothing(pool: PgPool) {
    let (app, token, _) = setup(&pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/dynamic-tables",
        json!({ "title": "Deadlines" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Missing required fields: detail_page_id, columns, rows"
    );
    assert_eq!(table_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_row_without_id(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/dynamic-tables",
        json!({
            "title": "Deadlines",
            "detail_page_id": detail_page_id,
            "columns": deadline_columns(),
            "rows": [{ "id": "", "data": {} }],
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(table_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_unknown_detail_page(pool: PgPool) {
    let (app, token, _) = setup(&pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/dynamic-tables",
        json!({
            "title": "Deadlines",
            "detail_page_id": 999_999,
            "columns": deadline_columns(),
            "rows": deadline_rows(),
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "DetailPage with id 999999 not found"
    );
    assert_eq!(table_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_to_new_card_provisions_one_detail_page(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;
    let created = create_table(app.clone(), &token, detail_page_id, "Deadlines").await;
    let id = created["data"]["table"]["id"].as_i64().unwrap();

    let other = create_card_chain(app.clone(), &token, "uk", "Oxford").await;
    let before: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM detail_pages")
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/dynamic-tables/{id}"),
        json!({
            "title": "Deadlines",
            "detail_page_id": other.card_id,
            "columns": deadline_columns(),
            "rows": deadline_rows(),
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let after: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM detail_pages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(after.0, before.0 + 1);

    let new_page_id = json["data"]["detail_page"]["id"].as_i64().unwrap();
    assert_ne!(new_page_id, detail_page_id);
    assert_eq!(json["data"]["table"]["detail_page_id"], new_page_id);
    assert_eq!(json["data"]["card"]["id"], other.card_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_same_detail_page_keeps_parent(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;
    let created = create_table(app.clone(), &token, detail_page_id, "Deadlines").await;
    let id = created["data"]["table"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/dynamic-tables/{id}"),
        json!({
            "title": "Deadlines 2026",
            "detail_page_id": detail_page_id,
            "columns": deadline_columns(),
            "rows": [],
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["table"]["detail_page_id"], detail_page_id);
    assert_eq!(json["data"]["table"]["title"], "Deadlines 2026");
    assert_eq!(json["data"]["table"]["rows"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_to_missing_card(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;
    let created = create_table(app.clone(), &token, detail_page_id, "Deadlines").await;
    let id = created["data"]["table"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/dynamic-tables/{id}"),
        json!({
            "title": "Deadlines",
            "card_id": 999_999,
            "columns": deadline_columns(),
            "rows": deadline_rows(),
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Card with id 999999 not found"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_table(pool: PgPool) {
    let (app, token, _) = setup(&pool).await;

    let response = put_json_auth(
        app,
        "/api/v1/dynamic-tables/424242",
        json!({
            "title": "Deadlines",
            "columns": deadline_columns(),
            "rows": deadline_rows(),
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates_and_searches(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;
    for i in 0..12 {
        create_table(app.clone(), &token, detail_page_id, &format!("Intake {i}")).await;
    }
    create_table(app.clone(), &token, detail_page_id, "Tuition fees").await;

    let response = get_auth(app.clone(), "/api/v1/dynamic-tables?page=2&limit=10", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
    assert_eq!(
        json["pagination"],
        json!({ "page": 2, "limit": 10, "total": 13, "total_pages": 2 })
    );

    let response = get_auth(app, "/api/v1/dynamic-tables?search=tuition", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["title"], "Tuition fees");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_then_not_found(pool: PgPool) {
    let (app, token, detail_page_id) = setup(&pool).await;
    let created = create_table(app.clone(), &token, detail_page_id, "Deadlines").await;
    let id = created["data"]["table"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/dynamic-tables/{id}");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
