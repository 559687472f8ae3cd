mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use link_shortener::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    register_click_handler,
};
use serde_json::json;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/links/{code}/clicks", post(register_click_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

// ─── POST /links ─────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_link_generated_code(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/links")
        .json(&json!({ "target_url": "https://example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 5);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["target_url"], "https://example.com");
    assert_eq!(body["clicks"], 0);
    assert!(body["last_clicked_at"].is_null());
    assert_eq!(
        body["short_url"],
        format!("{}/{}", common::BASE_URL, code)
    );

    let detail = server.get(&format!("/links/{}", code)).await;
    detail.assert_status_ok();
    assert_eq!(
        detail.json::<serde_json::Value>()["target_url"],
        "https://example.com"
    );
}

#[sqlx::test]
async fn test_create_link_custom_code(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/links")
        .json(&json!({ "target_url": "https://example.com", "custom_code": "Promo24" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(response.json::<serde_json::Value>()["code"], "Promo24");
}

#[sqlx::test]
async fn test_create_link_custom_code_conflict(pool: PgPool) {
    common::create_test_link(&pool, "taken", "https://original.com").await;
    let server = make_server(pool.clone());

    let response = server
        .post("/links")
        .json(&json!({ "target_url": "https://other.com", "custom_code": "taken" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "conflict");

    let original = server.get("/links/taken").await;
    assert_eq!(
        original.json::<serde_json::Value>()["target_url"],
        "https://original.com"
    );
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_link_invalid_custom_code(pool: PgPool) {
    let server = make_server(pool.clone());

    for code in ["waytoolong", "bad-code", "sp ce"] {
        let response = server
            .post("/links")
            .json(&json!({ "target_url": "https://example.com", "custom_code": code }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["error"]["code"],
            "validation_error"
        );
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_link_invalid_url(pool: PgPool) {
    let server = make_server(pool.clone());

    for url in ["", "example.com", "ftp://example.com"] {
        let response = server
            .post("/links")
            .json(&json!({ "target_url": url }))
            .await;

        response.assert_status_bad_request();
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_link_malformed_body(pool: PgPool) {
    let server = make_server(pool.clone());

    let bodies = [
        json!({}),
        json!({ "target_url": 42 }),
        json!({ "target_url": "https://example.com", "custom_code": 7 }),
    ];

    for body in bodies {
        let response = server.post("/links").json(&body).await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["message"], "Invalid request body");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_link_reserved_code(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/links")
        .json(&json!({ "target_url": "https://example.com", "custom_code": "health" }))
        .await;

    response.assert_status_bad_request();
}

// ─── GET /links ──────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_links_with_search(pool: PgPool) {
    common::create_test_link(&pool, "rust1", "https://rust-lang.org").await;
    common::create_test_link(&pool, "go1", "https://go.dev").await;
    let server = make_server(pool);

    let all = server.get("/links").await;
    all.assert_status_ok();
    assert_eq!(all.json::<Vec<serde_json::Value>>().len(), 2);

    let filtered = server.get("/links").add_query_param("search", "RUST").await;
    filtered.assert_status_ok();
    let items = filtered.json::<Vec<serde_json::Value>>();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["code"], "rust1");
    assert_eq!(items[0]["short_url"], format!("{}/rust1", common::BASE_URL));
}

#[sqlx::test]
async fn test_list_links_search_with_nul_matches_nothing(pool: PgPool) {
    common::create_test_link(&pool, "ab", "https://example.com/ab").await;
    let server = make_server(pool);

    let response = server.get("/links").add_query_param("search", "a\0b").await;

    response.assert_status_ok();
    assert!(response.json::<Vec<serde_json::Value>>().is_empty());
}

#[sqlx::test]
async fn test_list_links_empty(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/links").await;

    response.assert_status_ok();
    assert!(response.json::<Vec<serde_json::Value>>().is_empty());
}

// ─── GET /links/{code} ───────────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_link_not_found(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/links/nothere").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

// ─── DELETE /links/{code} ────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_link_success_and_reuse(pool: PgPool) {
    common::create_test_link(&pool, "del001", "https://example.com").await;
    let server = make_server(pool);

    let response = server.delete("/links/del001").await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["deleted"], true);
    assert_eq!(body["code"], "del001");

    server.get("/links/del001").await.assert_status_not_found();

    server
        .post("/links")
        .json(&json!({ "target_url": "https://new.com", "custom_code": "del001" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

#[sqlx::test]
async fn test_delete_link_not_found(pool: PgPool) {
    let server = make_server(pool);

    server.delete("/links/nonexist").await.assert_status_not_found();
}

// ─── POST /links/{code}/clicks ───────────────────────────────────────────────

#[sqlx::test]
async fn test_register_click(pool: PgPool) {
    common::create_test_link(&pool, "pb1", "https://example.com").await;
    let server = make_server(pool);

    let response = server.post("/links/pb1/clicks").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["clicks"], 1);
    assert!(body["last_clicked_at"].is_null());
}

#[sqlx::test]
async fn test_register_click_not_found(pool: PgPool) {
    let server = make_server(pool);

    server
        .post("/links/nope/clicks")
        .await
        .assert_status_not_found();
}
