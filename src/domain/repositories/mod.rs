//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod person_repository;

pub use person_repository::PersonRepository;

#[cfg(test)]
pub use person_repository::MockPersonRepository;
