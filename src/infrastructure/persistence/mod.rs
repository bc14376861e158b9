//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters.
//!
//! # Repositories
//!
//! - [`SqlitePersonRepository`] - Person storage and retrieval

pub mod sqlite_person_repository;

pub use sqlite_person_repository::SqlitePersonRepository;
