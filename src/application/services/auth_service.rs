//! Admin credential checks and JWT issuance/verification.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::Config;

type HmacSha256 = Hmac<Sha256>;

/// `iss` claim of every token this service issues and accepts.
pub const TOKEN_ISSUER: &str = "people-api";

/// Token lifetime from issuance.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
    pub iss: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Service validating the admin principal and managing bearer tokens.
///
/// Credentials are never compared directly: both the configured and the
/// presented values are run through HMAC-SHA256 and the MACs are compared in
/// constant time, so response timing reveals neither length nor prefix.
///
/// Tokens are HS256 JWTs. Verification accepts the HMAC family only, which
/// rejects `none` and asymmetric algorithms outright.
pub struct AuthService {
    admin_username: String,
    username_mac: Vec<u8>,
    password_mac: Vec<u8>,
    mac_key: Vec<u8>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `admin_username` / `admin_password` - the single accepted principal
    /// - `signing_secret` - HMAC key for tokens and credential digests
    pub fn new(admin_username: &str, admin_password: &str, signing_secret: &str) -> Self {
        let mac_key = signing_secret.as_bytes().to_vec();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            admin_username: admin_username.to_string(),
            username_mac: mac_of(&mac_key, admin_username),
            password_mac: mac_of(&mac_key, admin_password),
            encoding_key: EncodingKey::from_secret(signing_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_secret.as_bytes()),
            mac_key,
            validation,
        }
    }

    /// Builds the service from `ADMIN_USER`, `ADMIN_PASSWORD` and `JWT_SECRET`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.admin_username,
            &config.admin_password,
            &config.jwt_secret,
        )
    }

    /// The configured admin username.
    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    /// Checks a username/password pair against the configured admin.
    ///
    /// Both fields are always checked so that a wrong username costs as much
    /// as a wrong password.
    pub fn validate_credentials(&self, username: &str, password: &str) -> bool {
        let username_ok = self.verify_mac(&self.username_mac, username);
        let password_ok = self.verify_mac(&self.password_mac, password);
        username_ok & password_ok
    }

    fn verify_mac(&self, expected: &[u8], presented: &str) -> bool {
        let mut mac =
            HmacSha256::new_from_slice(&self.mac_key).expect("HMAC accepts any key length");
        mac.update(presented.as_bytes());
        mac.verify_slice(expected).is_ok()
    }

    /// Issues a token for `username`, valid for [`TOKEN_LIFETIME_HOURS`].
    ///
    /// Returns the encoded token and its expiry in unix seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if encoding fails.
    pub fn issue_token(&self, username: &str) -> Result<(String, i64), TokenError> {
        self.issue_token_at(username, Utc::now())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub fn issue_token_at(
        &self,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<(String, i64), TokenError> {
        let expires_at = issued_at + Duration::hours(TOKEN_LIFETIME_HOURS);

        let claims = Claims {
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)?;

        tracing::debug!(username, expires_at = claims.exp, "Issued token");

        Ok((token, claims.exp))
    }

    /// Verifies signature, algorithm, issuer and expiry of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for tokens past `exp`, and
    /// [`TokenError::Invalid`] for every other failure.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })
    }
}

fn mac_of(key: &[u8], value: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(value.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("admin", "secret", "test-signing-secret")
    }

    #[test]
    fn test_validate_credentials_success() {
        assert!(service().validate_credentials("admin", "secret"));
    }

    #[test]
    fn test_validate_credentials_wrong_password() {
        assert!(!service().validate_credentials("admin", "wrong"));
    }

    #[test]
    fn test_validate_credentials_wrong_username() {
        assert!(!service().validate_credentials("root", "secret"));
    }

    #[test]
    fn test_validate_credentials_is_exact() {
        let svc = service();
        assert!(!svc.validate_credentials("admin", "secret "));
        assert!(!svc.validate_credentials("Admin", "secret"));
        assert!(!svc.validate_credentials("", ""));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let svc = service();

        let (token, expires_at) = svc.issue_token("admin").unwrap();
        assert!(!token.is_empty());

        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp, expires_at);
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_HOURS * 3600);
    }

    #[test]
    fn test_expiry_is_24_hours_from_now() {
        let before = Utc::now().timestamp();
        let (_, expires_at) = service().issue_token("admin").unwrap();
        let after = Utc::now().timestamp();

        assert!(expires_at >= before + 24 * 3600);
        assert!(expires_at <= after + 24 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service();
        let (token, expires_at) = svc
            .issue_token_at("admin", Utc::now() - Duration::hours(25))
            .unwrap();

        assert!(expires_at < Utc::now().timestamp());
        assert!(matches!(svc.verify_token(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_different_secret_rejected() {
        let issuer = AuthService::new("admin", "secret", "secret-a");
        let verifier = AuthService::new("admin", "secret", "secret-b");

        let (token, _) = issuer.issue_token("admin").unwrap();

        assert!(matches!(
            verifier.verify_token(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let svc = service();
        let (token, _) = svc.issue_token("admin").unwrap();
        let other = svc.issue_token("mallory").unwrap().0;

        // Header and signature of the first token, payload of the second.
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(svc.verify_token(&forged).is_err());
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        let svc = service();
        let (token, _) = svc.issue_token("admin").unwrap();

        // {"alg":"RS256","typ":"JWT"}
        let rs256_header = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";
        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", rs256_header, parts[1], parts[2]);

        assert!(matches!(
            svc.verify_token(&forged),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            username: "admin".to_string(),
            iat: now,
            exp: now + 3600,
            iss: "someone-else".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-signing-secret"),
        )
        .unwrap();

        assert!(svc.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(service().verify_token("invalid.token.here").is_err());
        assert!(service().verify_token("").is_err());
    }
}
