#![allow(dead_code)]

use axum_test::TestServer;
use people_api::application::services::AuthService;
use people_api::config::{AuthScheme, RateLimitConfig};
use people_api::infrastructure::db;
use people_api::routes::app_router;
use people_api::state::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// `Basic base64("admin:secret")`
pub const BASIC_ADMIN: &str = "Basic YWRtaW46c2VjcmV0";
/// `Basic base64("admin:wrong")`
pub const BASIC_WRONG_PASSWORD: &str = "Basic YWRtaW46d3Jvbmc=";

/// Fresh, migrated in-memory database.
pub async fn setup_pool() -> SqlitePool {
    let pool = db::connect_in_memory().await.unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

pub fn auth_service() -> Arc<AuthService> {
    Arc::new(AuthService::new(ADMIN_USER, ADMIN_PASSWORD, SIGNING_SECRET))
}

pub fn create_test_state(pool: SqlitePool, scheme: AuthScheme) -> AppState {
    AppState::new(Arc::new(pool), auth_service(), scheme)
}

/// Full application router with login throttling off.
pub fn make_server(pool: SqlitePool, scheme: AuthScheme) -> TestServer {
    let state = create_test_state(pool, scheme);
    TestServer::new(app_router(state, &RateLimitConfig::disabled())).unwrap()
}

/// `Authorization` value carrying a freshly issued admin token.
pub fn bearer_header() -> String {
    let (token, _) = auth_service().issue_token(ADMIN_USER).unwrap();
    format!("Bearer {token}")
}

pub async fn insert_person(pool: &SqlitePool, first: &str, last: &str, email: &str) -> i64 {
    sqlx::query("INSERT INTO people (first_name, last_name, email) VALUES (?1, ?2, ?3)")
        .bind(first)
        .bind(last)
        .bind(email)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

/// Inserts `count` persons named `Person <n>` with unique emails.
pub async fn seed_people(pool: &SqlitePool, count: usize) {
    for n in 1..=count {
        insert_person(
            pool,
            "Person",
            &n.to_string(),
            &format!("person{n}@example.com"),
        )
        .await;
    }
}

pub async fn count_people(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM people")
        .fetch_one(pool)
        .await
        .unwrap()
}
