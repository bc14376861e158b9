//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Every variable is optional.
//!
//! ## Database
//!
//! ```bash
//! export DATABASE_URL="sqlite://people.db?mode=rwc"
//! # or, when DATABASE_URL is not set:
//! export DATABASE_FILE="./people.db"
//! ```
//!
//! ## Authentication
//!
//! ```bash
//! export AUTH_SCHEME="bearer"      # or "basic"
//! export ADMIN_USER="admin"
//! export ADMIN_PASSWORD="secret"
//! export JWT_SECRET="change-me"
//! ```
//!
//! ## Other Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)
//! - `RATE_LIMIT_ENABLED` - Throttle `/auth/login` per client IP (default: true)
//! - `BEHIND_PROXY` - Read client IP from forwarding headers (default: false)
//! - `LOGIN_RATE_PER_SECOND` / `LOGIN_RATE_BURST` - Login throttle (default: 1 / 10)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Development fallback for `ADMIN_USER`.
pub const DEFAULT_ADMIN_USER: &str = "admin";
/// Development fallback for `ADMIN_PASSWORD`.
pub const DEFAULT_ADMIN_PASSWORD: &str = "secret";
/// Insecure fallback for `JWT_SECRET`. Anyone who knows it can mint tokens.
pub const DEFAULT_JWT_SECRET: &str = "insecure-development-secret";

const DEFAULT_DATABASE_FILE: &str = "people.db";

/// Authentication scheme guarding mutating routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Basic …` checked against the admin credentials.
    Basic,
    /// `Authorization: Bearer <jwt>` issued by `POST /auth/login`.
    #[default]
    Bearer,
}

impl FromStr for AuthScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "bearer" | "jwt" => Ok(Self::Bearer),
            other => anyhow::bail!("AUTH_SCHEME must be 'basic' or 'bearer', got '{other}'"),
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => f.write_str("basic"),
            Self::Bearer => f.write_str("bearer"),
        }
    }
}

/// Per-IP throttling of the login endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// When true, the client IP is read from `X-Forwarded-For` / `X-Real-IP`.
    /// Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub per_second: u64,
    pub burst: u32,
}

impl RateLimitConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            behind_proxy: false,
            per_second: 1,
            burst: 10,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub auth_scheme: AuthScheme,
    pub admin_username: String,
    pub admin_password: String,
    pub jwt_secret: String,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    pub rate_limit: RateLimitConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("listen_addr", &self.listen_addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("auth_scheme", &self.auth_scheme)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"***")
            .field("jwt_secret", &"***")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_connect_timeout", &self.db_connect_timeout)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: sqlite_url_for_file(DEFAULT_DATABASE_FILE),
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            auth_scheme: AuthScheme::default(),
            admin_username: DEFAULT_ADMIN_USER.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            db_max_connections: 5,
            db_connect_timeout: 30,
            rate_limit: RateLimitConfig {
                enabled: true,
                behind_proxy: false,
                per_second: 1,
                burst: 10,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let database_url = Self::load_database_url();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let auth_scheme = match env::var("AUTH_SCHEME") {
            Ok(v) => v.parse().context("Invalid AUTH_SCHEME")?,
            Err(_) => defaults.auth_scheme,
        };

        let admin_username = non_empty_var("ADMIN_USER").unwrap_or(defaults.admin_username);
        let admin_password = non_empty_var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password);
        let jwt_secret = non_empty_var("JWT_SECRET").unwrap_or(defaults.jwt_secret);

        let db_max_connections = parsed_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?;
        let db_connect_timeout = parsed_var("DB_CONNECT_TIMEOUT", defaults.db_connect_timeout)?;

        let rate_limit = RateLimitConfig {
            enabled: env::var("RATE_LIMIT_ENABLED")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.rate_limit.enabled),
            behind_proxy: env::var("BEHIND_PROXY")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.rate_limit.behind_proxy),
            per_second: parsed_var("LOGIN_RATE_PER_SECOND", defaults.rate_limit.per_second)?,
            burst: parsed_var("LOGIN_RATE_BURST", defaults.rate_limit.burst)?,
        };

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            auth_scheme,
            admin_username,
            admin_password,
            jwt_secret,
            db_max_connections,
            db_connect_timeout,
            rate_limit,
        })
    }

    /// Loads the database URL.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Built from `DATABASE_FILE`
    /// 3. `people.db` in the working directory
    fn load_database_url() -> String {
        if let Some(url) = non_empty_var("DATABASE_URL") {
            return url;
        }

        let file = non_empty_var("DATABASE_FILE").unwrap_or_else(|| DEFAULT_DATABASE_FILE.into());
        sqlite_url_for_file(&file)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` has no port
    /// - `database_url` is not a SQLite URL
    /// - credentials or the signing secret are empty
    /// - pool or rate-limit settings are zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.admin_username.is_empty() || self.admin_password.is_empty() {
            anyhow::bail!("ADMIN_USER and ADMIN_PASSWORD must not be empty");
        }

        if self.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        if self.rate_limit.enabled && (self.rate_limit.per_second == 0 || self.rate_limit.burst == 0)
        {
            anyhow::bail!("LOGIN_RATE_PER_SECOND and LOGIN_RATE_BURST must be greater than 0");
        }

        Ok(())
    }

    /// Returns true when the built-in development credentials are in use.
    pub fn uses_default_credentials(&self) -> bool {
        self.admin_username == DEFAULT_ADMIN_USER && self.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    /// Returns true when tokens are signed with the built-in secret.
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Logs a configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Auth scheme: {}", self.auth_scheme);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if self.rate_limit.enabled {
            tracing::info!(
                "  Login rate limit: {}/s, burst {}",
                self.rate_limit.per_second,
                self.rate_limit.burst
            );
        } else {
            tracing::info!("  Login rate limit: disabled");
        }

        if self.uses_default_credentials() {
            tracing::warn!("ADMIN_USER/ADMIN_PASSWORD not set, using development credentials");
        }
        if self.uses_default_jwt_secret() {
            tracing::warn!("JWT_SECRET not set, tokens are signed with an insecure default");
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parsed_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match non_empty_var(key) {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} must be a non-negative integer, got '{v}'")),
        None => Ok(default),
    }
}

fn parse_bool(v: &str) -> bool {
    v.eq_ignore_ascii_case("true") || v == "1"
}

fn sqlite_url_for_file(file: &str) -> String {
    format!("sqlite://{file}?mode=rwc")
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Every variable `Config::from_env` reads.
    const VARS: &[&str] = &[
        "DATABASE_URL",
        "DATABASE_FILE",
        "LISTEN",
        "RUST_LOG",
        "LOG_FORMAT",
        "AUTH_SCHEME",
        "ADMIN_USER",
        "ADMIN_PASSWORD",
        "JWT_SECRET",
        "DB_MAX_CONNECTIONS",
        "DB_CONNECT_TIMEOUT",
        "RATE_LIMIT_ENABLED",
        "BEHIND_PROXY",
        "LOGIN_RATE_PER_SECOND",
        "LOGIN_RATE_BURST",
    ];

    fn clear_env() {
        // SAFETY: callers are #[serial], so no concurrent access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_auth_scheme_parsing() {
        assert_eq!("basic".parse::<AuthScheme>().unwrap(), AuthScheme::Basic);
        assert_eq!("Bearer".parse::<AuthScheme>().unwrap(), AuthScheme::Bearer);
        assert_eq!("jwt".parse::<AuthScheme>().unwrap(), AuthScheme::Bearer);
        assert!("digest".parse::<AuthScheme>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:8080".to_string();

        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());
        config.database_url = "sqlite::memory:".to_string();
        assert!(config.validate().is_ok());

        config.jwt_secret = String::new();
        assert!(config.validate().is_err());
        config.jwt_secret = "s".to_string();

        config.rate_limit.burst = 0;
        assert!(config.validate().is_err());
        config.rate_limit.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_masks_secrets() {
        let config = Config {
            jwt_secret: "top-secret".to_string(),
            admin_password: "hunter2".to_string(),
            ..Config::default()
        };

        let printed = format!("{config:?}");
        assert!(!printed.contains("top-secret"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://people.db?mode=rwc");
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.db_connect_timeout, 30);
        assert_eq!(config.auth_scheme, AuthScheme::Bearer);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "secret");
        assert!(config.uses_default_credentials());
        assert!(config.uses_default_jwt_secret());
        assert!(config.rate_limit.enabled);
        assert!(!config.rate_limit.behind_proxy);
        assert_eq!(config.rate_limit.per_second, 1);
        assert_eq!(config.rate_limit.burst, 10);
    }

    #[test]
    #[serial]
    fn test_load_from_env_values() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("DATABASE_FILE", "/tmp/people-test.db");
            env::set_var("AUTH_SCHEME", "basic");
            env::set_var("ADMIN_USER", "root");
            env::set_var("ADMIN_PASSWORD", "hunter2");
            env::set_var("JWT_SECRET", "from-env");
            env::set_var("DB_MAX_CONNECTIONS", "12");
            env::set_var("RATE_LIMIT_ENABLED", "false");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite:///tmp/people-test.db?mode=rwc");
        assert_eq!(config.auth_scheme, AuthScheme::Basic);
        assert_eq!(config.admin_username, "root");
        assert_eq!(config.admin_password, "hunter2");
        assert_eq!(config.jwt_secret, "from-env");
        assert_eq!(config.db_max_connections, 12);
        assert!(!config.rate_limit.enabled);
        assert!(!config.uses_default_credentials());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_database_url_priority() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("DATABASE_URL", "sqlite://from-url.db");
            env::set_var("DATABASE_FILE", "from-file.db");
        }

        let url = Config::load_database_url();

        assert!(url.contains("from-url"));
        assert!(!url.contains("from-file"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_numeric_var_is_error() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("DB_MAX_CONNECTIONS", "many");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
