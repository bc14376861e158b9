//! Authentication middleware for mutating routes.
//!
//! One middleware ([`layer`]) delegates to the [`Authenticator`] strategy held
//! in [`AppState`]. Two strategies exist and the deployment picks one through
//! `AUTH_SCHEME`:
//!
//! - [`BasicAuthenticator`] - `Authorization: Basic <base64(user:pass)>`
//! - [`BearerAuthenticator`] - `Authorization: Bearer <jwt>`

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::{AuthBasic, AuthBearer};

use crate::application::services::AuthService;
use crate::config::AuthScheme;
use crate::{error::AppError, state::AppState};

/// `WWW-Authenticate` value for Basic rejections.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"people-api\"";
/// `WWW-Authenticate` value for Bearer rejections (RFC 6750).
pub const BEARER_CHALLENGE: &str = "Bearer";

pub const AUTHENTICATION_FAILED: &str = "Authentication failed";
pub const HEADER_REQUIRED: &str = "Authorization header required";
pub const HEADER_NOT_BEARER: &str = "Authorization header must be Bearer token";
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// The principal attached to a request that passed authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// A strategy deciding whether a request is authorized.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The scheme this strategy implements.
    fn scheme(&self) -> AuthScheme;

    /// Inspects the request head and returns the authenticated principal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] carrying the scheme's challenge.
    async fn authenticate(&self, parts: &mut Parts) -> Result<AuthenticatedUser, AppError>;
}

/// Returns the strategy for `scheme`.
pub fn authenticator_for(
    scheme: AuthScheme,
    auth_service: Arc<AuthService>,
) -> Arc<dyn Authenticator> {
    match scheme {
        AuthScheme::Basic => Arc::new(BasicAuthenticator::new(auth_service)),
        AuthScheme::Bearer => Arc::new(BearerAuthenticator::new(auth_service)),
    }
}

/// Checks HTTP Basic credentials against the configured admin.
pub struct BasicAuthenticator {
    auth_service: Arc<AuthService>,
}

impl BasicAuthenticator {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn scheme(&self) -> AuthScheme {
        AuthScheme::Basic
    }

    async fn authenticate(&self, parts: &mut Parts) -> Result<AuthenticatedUser, AppError> {
        let rejected = || AppError::unauthorized(AUTHENTICATION_FAILED, BASIC_CHALLENGE);

        let AuthBasic((username, password)) = AuthBasic::from_request_parts(parts, &())
            .await
            .map_err(|(_, reason)| {
                tracing::debug!(reason, "Basic credentials missing or malformed");
                rejected()
            })?;

        let password = password.unwrap_or_default();

        if !self.auth_service.validate_credentials(&username, &password) {
            tracing::warn!(username = %username, "Basic authentication failed");
            return Err(rejected());
        }

        Ok(AuthenticatedUser { username })
    }
}

/// Checks a JWT presented as `Authorization: Bearer <token>`.
pub struct BearerAuthenticator {
    auth_service: Arc<AuthService>,
}

impl BearerAuthenticator {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

#[async_trait]
impl Authenticator for BearerAuthenticator {
    fn scheme(&self) -> AuthScheme {
        AuthScheme::Bearer
    }

    async fn authenticate(&self, parts: &mut Parts) -> Result<AuthenticatedUser, AppError> {
        let token = bearer_token(parts).await?;

        let claims = self.auth_service.verify_token(&token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AppError::unauthorized(INVALID_TOKEN, BEARER_CHALLENGE)
        })?;

        Ok(AuthenticatedUser {
            username: claims.username,
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// A missing or empty header and a header with another scheme are reported
/// with different messages.
async fn bearer_token(parts: &mut Parts) -> Result<String, AppError> {
    let present = parts
        .headers
        .get(AUTHORIZATION)
        .is_some_and(|value| !value.is_empty());
    if !present {
        return Err(AppError::unauthorized(HEADER_REQUIRED, BEARER_CHALLENGE));
    }

    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|(_, reason)| {
            tracing::debug!(reason, "Bearer header malformed");
            AppError::unauthorized(HEADER_NOT_BEARER, BEARER_CHALLENGE)
        })?;

    Ok(token)
}

/// Authenticates the request with the configured strategy.
///
/// # Authentication Flow
///
/// 1. Run the [`Authenticator`] from [`AppState`] against the request head
/// 2. On success, attach [`AuthenticatedUser`] to the request extensions
/// 3. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate` challenge when the
/// strategy rejects the request. The handler is not invoked.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/person", post(create_person_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let user = st.authenticator.authenticate(&mut parts).await?;

    tracing::info!(
        username = %user.username,
        method = %parts.method,
        uri = %parts.uri,
        "User authenticated"
    );
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Extractor for the principal attached by [`layer`], if any.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<AuthenticatedUser>);

impl CurrentUser {
    /// Username for log fields; `-` when the route is unauthenticated.
    pub fn name(&self) -> &str {
        self.0.as_ref().map_or("-", |user| user.username.as_str())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}
