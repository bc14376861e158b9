//! Application error type shared by every layer.
//!
//! Each variant maps to exactly one HTTP status, and every error renders as
//! `{"error": "<message>"}`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input, body or path parameter (400).
    #[error("{message}")]
    Validation { message: String },

    /// Missing or bad credentials/token (401). `challenge` becomes the
    /// `WWW-Authenticate` header value.
    #[error("{message}")]
    Unauthorized {
        message: String,
        challenge: &'static str,
    },

    /// The addressed record does not exist (404).
    #[error("{message}")]
    NotFound { message: String },

    /// The store rejected a write because of a uniqueness rule (400).
    #[error("{message}")]
    ConstraintViolation { message: String },

    /// Unexpected datastore failure (500).
    #[error("{message}")]
    Storage { message: String },

    /// Any other server-side failure (500).
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, challenge: &'static str) -> Self {
        Self::Unauthorized {
            message: message.into(),
            challenge,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::ConstraintViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let challenge = match &self {
            AppError::Unauthorized { challenge, .. } => Some(*challenge),
            AppError::Storage { message } | AppError::Internal { message } => {
                tracing::error!(error = %message, "Request failed with server error");
                None
            }
            _ => None,
        };

        let body = ErrorBody {
            error: self.to_string(),
        };
        let mut response = (status, Json(body)).into_response();

        if let Some(challenge) = challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::constraint_violation(format!(
                    "Unique constraint violation: {}",
                    db.message()
                ));
            }
            if db.is_check_violation() {
                return AppError::constraint_violation(format!(
                    "Check constraint violation: {}",
                    db.message()
                ));
            }
        }

        AppError::storage(format!("Database error: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(e.to_string())
    }
}
