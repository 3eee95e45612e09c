//! Users API handlers.
//!
//! ```text
//! POST   /api/users/      {"firstName":"Al","lastName":"Bo","biography":"..."}
//! GET    /api/users/
//! GET    /api/users/{id}
//! PUT    /api/users/{id}  {"firstName":"Al","lastName":"Bo","biography":"..."}
//! DELETE /api/users/{id}
//! ```
//!
//! Every handler logs the underlying store failure and answers with a fixed
//! client message chosen per operation, so internal detail never leaves the
//! process.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use tracing::{error, warn};

use crate::domain::{Error, User, UserStoreError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, UserDraftSchema, UserEnvelopeSchema, UserMapEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

const READ_BODY_FAILED: &str = "something went wrong";
const CREATE_INVALID: &str = "Please provide FirstName LastName and bio for the user";
const CREATE_FAILED: &str = "There was an error while saving the user to the database";
const LIST_FAILED: &str = "The users information could not be retrieved";
const USER_NOT_FOUND: &str = "The user with the specified ID does not exist";
const FIND_FAILED: &str = "The user information could not be retrieved";
const UPDATE_INVALID: &str = "Please provide name and bio for the user";
const UPDATE_FAILED: &str = "The user information could not be modified";
const DELETE_FAILED: &str = "The user could not be removed";

/// Largest request body accepted by the write handlers.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Register the user routes on a service config.
///
/// The collection routes answer with and without a trailing slash.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_registry::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api").configure(users::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/users", "/users/"])
            .route(web::post().to(create_user))
            .route(web::get().to(list_users)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::get().to(get_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user)),
    );
}

async fn read_body(mut payload: web::Payload) -> ApiResult<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            error!(error = %err, "failed to read request body");
            Error::internal(READ_BODY_FAILED)
        })?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            warn!(limit = MAX_BODY_BYTES, "request body exceeds limit");
            return Err(Error::internal(READ_BODY_FAILED));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn log_failure(operation: &'static str, err: &UserStoreError) {
    match err {
        UserStoreError::Validation(_)
        | UserStoreError::InvalidId(_)
        | UserStoreError::NotFound { .. } => {
            warn!(operation, error = %err, code = ?err.validation_code(), "user request rejected");
        }
        UserStoreError::Parse { .. } | UserStoreError::Persistence(_) => {
            error!(operation, error = %err, "user request failed");
        }
    }
}

fn map_create_error(err: UserStoreError) -> Error {
    log_failure("create", &err);
    match err {
        UserStoreError::Validation(_) => Error::invalid_request(CREATE_INVALID),
        _ => Error::internal(CREATE_FAILED),
    }
}

fn map_list_error(err: UserStoreError) -> Error {
    log_failure("list", &err);
    Error::internal(LIST_FAILED)
}

fn map_find_error(err: UserStoreError) -> Error {
    log_failure("find", &err);
    match err {
        UserStoreError::InvalidId(_) | UserStoreError::NotFound { .. } => {
            Error::not_found(USER_NOT_FOUND)
        }
        _ => Error::internal(FIND_FAILED),
    }
}

fn map_update_error(err: UserStoreError) -> Error {
    log_failure("update", &err);
    match err {
        UserStoreError::Validation(_) => Error::invalid_request(UPDATE_INVALID),
        UserStoreError::InvalidId(_) | UserStoreError::NotFound { .. } => {
            Error::not_found(USER_NOT_FOUND)
        }
        _ => Error::internal(UPDATE_FAILED),
    }
}

fn map_delete_error(err: UserStoreError) -> Error {
    log_failure("delete", &err);
    match err {
        UserStoreError::InvalidId(_) | UserStoreError::NotFound { .. } => {
            Error::not_found(USER_NOT_FOUND)
        }
        _ => Error::internal(DELETE_FAILED),
    }
}

/// Create a user from the request body and assign it a fresh identifier.
#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = UserDraftSchema,
    responses(
        (status = 201, description = "Created user", body = UserEnvelopeSchema),
        (status = 400, description = "Invalid user fields", body = ErrorEnvelopeSchema),
        (status = 500, description = "Malformed body or storage failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_body(payload).await?;
    let user = state
        .users_command
        .insert(&body)
        .await
        .map_err(map_create_error)?;
    Ok(HttpResponse::Created().json(Envelope::success(user)))
}

/// List every user keyed by identifier.
#[utoipa::path(
    get,
    path = "/api/users/",
    responses(
        (status = 200, description = "Users keyed by identifier", body = UserMapEnvelopeSchema),
        (status = 500, description = "Storage failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state
        .users_query
        .find_all()
        .await
        .map_err(map_list_error)?;
    let by_id: BTreeMap<String, User> = users
        .into_iter()
        .map(|user| (user.id().to_string(), user))
        .collect();
    Ok(HttpResponse::Ok().json(Envelope::success(by_id)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User identifier (UUID)")
    ),
    responses(
        (status = 200, description = "User", body = UserEnvelopeSchema),
        (status = 404, description = "Unknown or malformed identifier", body = ErrorEnvelopeSchema),
        (status = 500, description = "Storage failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_query
        .find_by_id(&path.into_inner())
        .await
        .map_err(map_find_error)?;
    Ok(HttpResponse::Ok().json(Envelope::success(user)))
}

/// Replace the fields of an existing user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    request_body = UserDraftSchema,
    params(
        ("id" = String, Path, description = "User identifier (UUID)")
    ),
    responses(
        (status = 200, description = "Updated user", body = UserEnvelopeSchema),
        (status = 400, description = "Invalid user fields", body = ErrorEnvelopeSchema),
        (status = 404, description = "Unknown or malformed identifier", body = ErrorEnvelopeSchema),
        (status = 500, description = "Malformed body or storage failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_body(payload).await?;
    let user = state
        .users_command
        .update(&path.into_inner(), &body)
        .await
        .map_err(map_update_error)?;
    Ok(HttpResponse::Ok().json(Envelope::success(user)))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User identifier (UUID)")
    ),
    responses(
        (status = 200, description = "User removed; empty body"),
        (status = 404, description = "Unknown or malformed identifier", body = ErrorEnvelopeSchema),
        (status = 500, description = "Storage failure", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .users_command
        .delete(&path.into_inner())
        .await
        .map_err(map_delete_error)?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests;
