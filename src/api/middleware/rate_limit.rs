//! Rate limiting middleware using token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimitConfig;

/// Keys requests by client IP.
///
/// Uses the socket peer address, or forwarding headers (`X-Forwarded-For`,
/// `X-Real-IP`, `Forwarded`) when running behind a trusted proxy.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates the rate limiter guarding the login endpoint.
///
/// # Limits
///
/// - **Rate**: `config.per_second` requests per second
/// - **Burst**: `config.burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The server
/// must be served with connect info for peer-address keys.
///
/// # Panics
///
/// Panics if `per_second` or `burst` is zero; [`crate::config::Config::validate`]
/// rejects both.
///
/// # Example
///
/// ```rust,ignore
/// let login = Router::new()
///     .route("/login", post(login_handler))
///     .layer(rate_limit::login_layer(&config.rate_limit));
/// ```
pub fn login_layer(
    config: &RateLimitConfig,
) -> GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor {
                behind_proxy: config.behind_proxy,
            })
            .per_second(config.per_second)
            .burst_size(config.burst)
            .finish()
            .expect("rate limit values are validated to be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
