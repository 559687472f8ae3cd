#![allow(dead_code)]

use link_shortener::application::services::LinkService;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use link_shortener::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const BASE_URL: &str = "https://s.example.com";

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (code, target_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn set_clicks(pool: &PgPool, code: &str, clicks: i64) {
    sqlx::query("UPDATE links SET clicks = $2 WHERE code = $1")
        .bind(code)
        .bind(clicks)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn get_clicks(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_service(pool: PgPool) -> Arc<LinkService<PgLinkRepository>> {
    let link_repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    Arc::new(LinkService::new(link_repo, BASE_URL))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(create_test_service(pool))
}
