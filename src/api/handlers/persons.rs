//! Handlers for person CRUD endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use validator::Validate;

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::dto::person::{
    DataResponse, MessageResponse, PersonListResponse, PersonRequest, PersonResponse,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

pub const INVALID_ID: &str = "Invalid ID";

/// Parses a path segment as a person id.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::bad_request(INVALID_ID))
}

/// Unwraps a JSON body and runs field validation.
fn validated_body(
    payload: Result<Json<PersonRequest>, JsonRejection>,
) -> Result<PersonRequest, AppError> {
    let Json(body) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    body.validate()?;
    Ok(body)
}

/// Lists persons one page at a time.
///
/// # Endpoint
///
/// `GET /api/v1/person`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1, values below 1 become 1)
/// - `page_size` (optional): Items per page (default: 10, max: 100)
///
/// # Response
///
/// ```json
/// {
///   "data": [{ "id": 1, "first_name": "John", "last_name": "Doe", "email": "john.doe@example.com" }],
///   "pagination": {
///     "current_page": 1, "page_size": 10, "total_pages": 1,
///     "total_items": 1, "has_next_page": false, "has_prev_page": false
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if `page` or `page_size` is not an integer.
pub async fn list_persons_handler(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<PersonListResponse>, AppError> {
    let Query(params) = params.map_err(|e| {
        AppError::bad_request(format!("Invalid pagination parameters: {}", e.body_text()))
    })?;

    let page = state.person_service.list(params.to_page_request()).await?;

    Ok(Json(PersonListResponse {
        data: page.items.into_iter().map(PersonResponse::from).collect(),
        pagination: PaginationMeta::from(page.info),
    }))
}

/// Retrieves a single person.
///
/// # Endpoint
///
/// `GET /api/v1/person/{id}`
///
/// # Errors
///
/// - **400**: `id` is not an integer
/// - **404**: no person has this id
pub async fn get_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<PersonResponse>>, AppError> {
    let id = parse_id(&id)?;
    let person = state.person_service.get(id).await?;

    Ok(Json(DataResponse {
        data: PersonResponse::from(person),
    }))
}

/// Creates a person.
///
/// # Endpoint
///
/// `POST /api/v1/person`
///
/// # Request Body
///
/// ```json
/// { "first_name": "John", "last_name": "Doe", "email": "john.doe@example.com" }
/// ```
///
/// # Errors
///
/// - **400**: malformed JSON, missing or invalid field, or email already taken
/// - **401**: not authenticated
/// - **500**: storage failure
pub async fn create_person_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<PersonRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let body = validated_body(payload)?;

    let id = state.person_service.create(body.into()).await?;
    tracing::info!(id, user = user.name(), "Person added");

    Ok(Json(MessageResponse::new("Person added successfully").with_id(id)))
}

/// Replaces every field of a person.
///
/// # Endpoint
///
/// `PUT /api/v1/person/{id}`
///
/// # Errors
///
/// - **400**: `id` is not an integer, the body is invalid, or the email is taken
/// - **401**: not authenticated
/// - **404**: no person has this id
pub async fn update_person_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<PersonRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    let body = validated_body(payload)?;

    state.person_service.update(id, body.into()).await?;
    tracing::info!(id, user = user.name(), "Person replaced");

    Ok(Json(MessageResponse::new("Success")))
}

/// Deletes a person.
///
/// # Endpoint
///
/// `DELETE /api/v1/person/{id}`
///
/// # Errors
///
/// - **400**: `id` is not an integer
/// - **401**: not authenticated
/// - **404**: no person has this id
pub async fn delete_person_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;

    state.person_service.delete(id).await?;
    tracing::info!(id, user = user.name(), "Person removed");

    Ok(Json(MessageResponse::new(format!("id #{id} deleted"))))
}
