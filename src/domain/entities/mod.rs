//! Core domain entities.
//!
//! Entities are plain data structures. Following the "New Type" pattern,
//! creation input lives in a separate struct:
//! - [`Person`] - A stored person record
//! - [`NewPerson`] - Field values for creating or overwriting a record

pub mod person;

pub use person::{NewPerson, Person};
