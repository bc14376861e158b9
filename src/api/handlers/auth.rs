//! Handler for bearer token issuance.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse};
use crate::api::middleware::auth::BEARER_CHALLENGE;
use crate::error::AppError;
use crate::state::AppState;

pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const TOKEN_GENERATION_FAILED: &str = "Failed to generate token";

/// Exchanges admin credentials for a signed token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Request Body
///
/// ```json
/// { "username": "admin", "password": "secret" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "eyJhbGciOi...", "expires_at": 1767312000 }
/// ```
///
/// # Errors
///
/// - **400**: body is not JSON or a field is missing or empty
/// - **401**: credentials do not match
/// - **500**: the token could not be signed
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Login body rejected");
        AppError::bad_request(INVALID_REQUEST_FORMAT)
    })?;
    payload
        .validate()
        .map_err(|_| AppError::bad_request(INVALID_REQUEST_FORMAT))?;

    if !state
        .auth_service
        .validate_credentials(&payload.username, &payload.password)
    {
        tracing::warn!(username = %payload.username, "Login failed");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS, BEARER_CHALLENGE));
    }

    let (token, expires_at) = state
        .auth_service
        .issue_token(&payload.username)
        .map_err(|e| {
            tracing::error!(error = %e, "Token signing failed");
            AppError::internal(TOKEN_GENERATION_FAILED)
        })?;

    tracing::info!(username = %payload.username, expires_at, "Token issued");

    Ok(Json(LoginResponse { token, expires_at }))
}
