//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::person_service::PersonService`] - Paginated listing and person CRUD
//! - [`services::auth_service::AuthService`] - Admin credentials and bearer tokens

pub mod services;
