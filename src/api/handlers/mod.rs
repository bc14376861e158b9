//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod persons;
pub mod ping;

pub use auth::login_handler;
pub use persons::{
    create_person_handler, delete_person_handler, get_person_handler, list_persons_handler,
    update_person_handler,
};
pub use ping::ping_handler;
