//! Business logic services for the application layer.

pub mod auth_service;
pub mod person_service;

pub use auth_service::{AuthService, Claims, TokenError};
pub use person_service::PersonService;
