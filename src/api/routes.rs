//! API route configuration.
//!
//! Reads are public. Every mutating route sits behind
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_person_handler, delete_person_handler, get_person_handler, list_persons_handler,
    login_handler, update_person_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Read-only person routes, no authentication.
///
/// # Endpoints
///
/// - `GET /person`        - List persons (paginated)
/// - `GET /person/{id}`   - Fetch one person
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/person", get(list_persons_handler))
        .route("/person/{id}", get(get_person_handler))
}

/// Mutating person routes; the caller attaches the auth layer.
///
/// # Endpoints
///
/// - `POST   /person`        - Create a person
/// - `PUT    /person/{id}`   - Replace a person
/// - `DELETE /person/{id}`   - Delete a person
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/person", post(create_person_handler))
        .route(
            "/person/{id}",
            put(update_person_handler).delete(delete_person_handler),
        )
}

/// Token issuance.
///
/// - `POST /login` - Exchange admin credentials for a bearer token
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_handler))
}
