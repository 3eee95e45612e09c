//! Domain primitives, services, and ports.
//!
//! Purpose: define the user record model, its validation rules, and the
//! store service that owns them. Keep types transport agnostic; inbound
//! adapters translate them to HTTP.
//!
//! Public surface:
//! - Error / ErrorCode: client-facing failure and its category.
//! - User / UserId / UserProfile / UserDraft: the record model.
//! - UserStore / UserStoreError: record rules over a repository port.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_store;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    BIOGRAPHY_MAX, BIOGRAPHY_MIN, FIRST_NAME_MAX, FIRST_NAME_MIN, InvalidUserId, LAST_NAME_MAX,
    LAST_NAME_MIN, User, UserDraft, UserId, UserProfile, UserValidationError,
};
pub use self::user_store::{ADMIN_SEED, UserStore, UserStoreError};
