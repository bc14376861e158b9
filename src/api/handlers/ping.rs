//! Handler for the liveness endpoint.

use axum::Json;
use chrono::Utc;

use crate::api::dto::ping::PingResponse;

/// Answers with `pong` and the current unix timestamp.
///
/// # Endpoint
///
/// `GET /ping`
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: format!("pong {}", Utc::now().timestamp()),
    })
}
