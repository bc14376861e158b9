//! DTO for the liveness endpoint.

use serde::Serialize;

/// `{"message": "pong <unix_ts>"}`
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}
