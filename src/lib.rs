//! # People API
//!
//! A small HTTP service that stores person records in SQLite and exposes them
//! through a JSON REST API built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Person entity, pagination rules and the repository trait
//! - **Application Layer** ([`application`]) - Person and credential/token services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations and repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Paginated listing with clamped page parameters
//! - HTTP Basic or Bearer (JWT) authentication on mutating routes
//! - Transactional writes with unique email enforcement
//! - Structured logging and login rate limiting
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_FILE="people.db"
//! export JWT_SECRET="change-me"
//!
//! cargo run
//!
//! curl -s -X POST localhost:8080/auth/login \
//!   -H 'Content-Type: application/json' \
//!   -d '{"username":"admin","password":"secret"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, PersonService};
    pub use crate::config::AuthScheme;
    pub use crate::domain::entities::{NewPerson, Person};
    pub use crate::domain::pagination::{Page, PageInfo, PageRequest};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
