//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /ping`                 - Liveness check (public)
//! - `GET    /api/v1/person[/{id}]` - Reads (public)
//! - `POST|PUT|DELETE /api/v1/person[/{id}]` - Writes (authenticated)
//! - `POST   /auth/login`           - Token issuance, bearer deployments only
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Basic or Bearer, per `AUTH_SCHEME`
//! - **Rate limiting** - Per-IP token bucket on the login route
//!
//! - **Path normalization** - Trailing slash handling ([`normalized`])

use crate::api;
use crate::api::handlers::ping_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::config::{AuthScheme, RateLimitConfig};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - login throttling; a disabled config mounts no limiter
pub fn app_router(state: AppState, rate_limit: &RateLimitConfig) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api_router = Router::new()
        .merge(api::routes::public_routes())
        .merge(protected);

    let mut router = Router::new()
        .route("/ping", get(ping_handler))
        .nest("/api/v1", api_router);

    if state.auth_scheme() == AuthScheme::Bearer {
        let mut auth_router = api::routes::auth_routes();
        if rate_limit.enabled {
            auth_router = auth_router.layer(rate_limit::login_layer(rate_limit));
        }
        router = router.nest("/auth", auth_router);
    }

    router.with_state(state).layer(tracing::layer())
}

/// Wraps `router` so that `/api/v1/person/` routes like `/api/v1/person`.
///
/// Normalization has to run before routing, so it wraps the finished router
/// instead of being added with `Router::layer`.
pub fn normalized(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::AuthService;
    use crate::infrastructure::db;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn state(scheme: AuthScheme) -> AppState {
        let pool = db::connect_in_memory().await.unwrap();
        db::migrate(&pool).await.unwrap();
        let auth = Arc::new(AuthService::new("admin", "secret", "test-signing-secret"));
        AppState::new(Arc::new(pool), auth, scheme)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let router = app_router(state(AuthScheme::Bearer).await, &RateLimitConfig::disabled());
        let app = normalized(router);

        let response = app.oneshot(get("/api/v1/person/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let router = app_router(state(AuthScheme::Bearer).await, &RateLimitConfig::disabled());

        let response = router.oneshot(get("/api/v2/person")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_route_only_for_bearer() {
        let login = || {
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"username":"admin","password":"secret"}"#))
                .unwrap()
        };

        let bearer = app_router(state(AuthScheme::Bearer).await, &RateLimitConfig::disabled());
        assert_eq!(bearer.oneshot(login()).await.unwrap().status(), StatusCode::OK);

        let basic = app_router(state(AuthScheme::Basic).await, &RateLimitConfig::disabled());
        assert_eq!(
            basic.oneshot(login()).await.unwrap().status(),
            StatusCode::NOT_FOUND
        );
    }
}
