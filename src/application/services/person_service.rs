//! Person management service.

use std::sync::Arc;

use validator::Validate;

use crate::domain::entities::{NewPerson, Person};
use crate::domain::pagination::{Page, PageInfo, PageRequest};
use crate::domain::repositories::PersonRepository;
use crate::error::AppError;

/// Message returned when a looked-up person does not exist.
pub const NO_RECORDS_FOUND: &str = "No Records Found";

/// Service for listing, reading and mutating person records.
pub struct PersonService<R: PersonRepository> {
    repository: Arc<R>,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a new person service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of persons ordered by id, with page metadata.
    ///
    /// The total count and the page rows are fetched concurrently. A page past
    /// the end is returned empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn list(&self, request: PageRequest) -> Result<Page<Person>, AppError> {
        let (total_items, items) = tokio::try_join!(
            self.repository.count(),
            self.repository.list(request.limit(), request.offset())
        )?;

        Ok(Page {
            items,
            info: PageInfo::new(request, total_items),
        })
    }

    /// Retrieves a person by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no person has this id.
    pub async fn get(&self, id: i64) -> Result<Person, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(NO_RECORDS_FOUND))
    }

    /// Stores a new person and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is empty or malformed and
    /// [`AppError::ConstraintViolation`] if the email is taken.
    pub async fn create(&self, new_person: NewPerson) -> Result<i64, AppError> {
        new_person.validate()?;
        let id = self.repository.create(new_person).await?;
        tracing::info!(id, "Person created");
        Ok(id)
    }

    /// Overwrites every mutable field of the person with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is empty or malformed,
    /// [`AppError::NotFound`] if no person has this id and
    /// [`AppError::ConstraintViolation`] if the email is taken.
    pub async fn update(&self, id: i64, person: NewPerson) -> Result<(), AppError> {
        person.validate()?;
        self.repository.update(id, person).await?;
        tracing::info!(id, "Person updated");
        Ok(())
    }

    /// Deletes the person with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no person has this id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        tracing::info!(id, "Person deleted");
        Ok(())
    }
}
