//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The backing store could not be accessed.
        Unavailable { message: String } => "user repository unavailable: {message}",
        /// An insert collided with an existing identifier.
        Conflict { id: String } => "user {id} already exists",
    }
}

/// Driven port holding user records keyed by identifier.
///
/// Each method is a single atomic operation against the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new record, failing with `Conflict` when its id is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Every stored record, in no particular order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite an existing record, returning the value it replaced.
    ///
    /// Returns `Ok(None)` without writing when no record has the id.
    async fn replace(&self, user: &User) -> Result<Option<User>, UserPersistenceError>;

    /// Delete a record, returning it when it existed.
    async fn remove(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
