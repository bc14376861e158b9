//! Repository trait for person data access.

use crate::domain::entities::{NewPerson, Person};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing person records.
///
/// Every mutating operation runs in its own transaction, committed only after
/// the statement succeeds and rolled back otherwise.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqlitePersonRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_person.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Counts all stored persons.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists persons ordered by id ascending.
    ///
    /// An offset past the last row yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Person>, AppError>;

    /// Finds a person by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Person))` if found
    /// - `Ok(None)` if no row has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, AppError>;

    /// Inserts a person and returns the id assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConstraintViolation`] if the email already exists.
    /// Returns [`AppError::Storage`] on any other database error.
    async fn create(&self, new_person: NewPerson) -> Result<i64, AppError>;

    /// Overwrites all mutable fields of the person with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row has this id.
    /// Returns [`AppError::ConstraintViolation`] if the email belongs to another person.
    /// Returns [`AppError::Storage`] on any other database error.
    async fn update(&self, id: i64, person: NewPerson) -> Result<(), AppError>;

    /// Hard-deletes the person with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row has this id.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
