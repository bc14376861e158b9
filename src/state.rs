//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::api::middleware::auth::{Authenticator, authenticator_for};
use crate::application::services::{AuthService, PersonService};
use crate::config::AuthScheme;
use crate::infrastructure::persistence::SqlitePersonRepository;

#[derive(Clone)]
pub struct AppState {
    pub person_service: Arc<PersonService<SqlitePersonRepository>>,
    pub auth_service: Arc<AuthService>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Wires services over `pool` and picks the authenticator for `scheme`.
    pub fn new(pool: Arc<SqlitePool>, auth_service: Arc<AuthService>, scheme: AuthScheme) -> Self {
        let person_repository = Arc::new(SqlitePersonRepository::new(pool));

        Self {
            person_service: Arc::new(PersonService::new(person_repository)),
            authenticator: authenticator_for(scheme, auth_service.clone()),
            auth_service,
        }
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.authenticator.scheme()
    }
}
