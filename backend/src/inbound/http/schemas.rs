//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
///
/// Stored user record with its server-assigned identifier.
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Server-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Between 2 and 20 characters.
    #[schema(example = "Ada", min_length = 2, max_length = 20)]
    first_name: String,
    /// Between 2 and 20 characters.
    #[schema(example = "Lovelace", min_length = 2, max_length = 20)]
    last_name: String,
    /// Between 20 and 450 characters.
    #[schema(min_length = 20, max_length = 450)]
    biography: String,
}

/// OpenAPI schema for [`crate::domain::UserDraft`].
///
/// Request body for create and update. Missing fields are treated as empty
/// and fail validation; any `id` is ignored.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserDraft, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserDraftSchema {
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: String,
    #[schema(example = "Mathematician and writer, first to publish an algorithm.")]
    biography: String,
}

/// Success envelope wrapping one user.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserEnvelopeSchema {
    data: UserSchema,
}

/// Success envelope wrapping every user keyed by identifier.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserMapEnvelopeSchema {
    data: BTreeMap<String, UserSchema>,
}

/// Failure envelope carrying a client-facing message.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    #[schema(example = "The user with the specified ID does not exist")]
    error: String,
}
