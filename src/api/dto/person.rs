//! DTOs for person endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::pagination::PaginationMeta;
use crate::domain::entities::{NewPerson, Person};

/// Request body for `POST /person` and `PUT /person/{id}`.
///
/// All fields are required; an update overwrites every one of them.
#[derive(Debug, Deserialize, Validate)]
pub struct PersonRequest {
    #[validate(length(min = 1, max = 50, message = "first_name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "last_name must be 1-50 characters"))]
    pub last_name: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}

impl From<PersonRequest> for NewPerson {
    fn from(req: PersonRequest) -> Self {
        NewPerson::new(req.first_name, req.last_name, req.email)
    }
}

/// JSON representation of a stored person.
#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name,
            last_name: person.last_name,
            email: person.email,
        }
    }
}

/// `{"data": ...}` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// One page of persons.
#[derive(Debug, Serialize)]
pub struct PersonListResponse {
    pub data: Vec<PersonResponse>,
    pub pagination: PaginationMeta,
}

/// `{"message": ...}` acknowledgement, with the new id after a create.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
