//! User store domain service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of
//! any [`UserRepository`]. Write payloads are decoded and validated here, in
//! a fixed order: decode, validate, then resolve the identifier.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{
    InvalidUserId, User, UserDraft, UserId, UserProfile, UserValidationError,
};

/// First name, last name, and biography of the record seeded at startup.
pub const ADMIN_SEED: (&str, &str, &str) = (
    "admin",
    "admin",
    "Administrator account created when the service starts.",
);

/// Failures surfaced by the user store.
///
/// Each variant is a distinct failure class; adapters branch on the variant
/// rather than on message text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// The payload is not a JSON object with string fields.
    #[error("error when decoding user payload: {message}")]
    Parse {
        /// Decoder diagnostic.
        message: String,
    },
    /// The payload decoded but broke a field rule.
    #[error("wrong user data: {0}")]
    Validation(#[from] UserValidationError),
    /// The identifier text is not a UUID.
    #[error("user id format is invalid: {0}")]
    InvalidId(#[from] InvalidUserId),
    /// No record carries the identifier.
    #[error("user {id} not found")]
    NotFound {
        /// Identifier that was looked up.
        id: UserId,
    },
    /// The repository failed.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

impl UserStoreError {
    /// Validation rule code when this is a validation failure.
    pub fn validation_code(&self) -> Option<u8> {
        match self {
            Self::Validation(err) => Some(err.code()),
            _ => None,
        }
    }
}

/// Domain service owning user record rules.
#[derive(Clone)]
pub struct UserStore<R> {
    repository: Arc<R>,
}

impl<R> UserStore<R> {
    /// Create a store over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserStore<R>
where
    R: UserRepository,
{
    fn decode(payload: &[u8]) -> Result<UserProfile, UserStoreError> {
        let draft: UserDraft =
            serde_json::from_slice(payload).map_err(|err| UserStoreError::Parse {
                message: err.to_string(),
            })?;
        Ok(UserProfile::try_from(draft)?)
    }

    /// Insert the admin record every fresh store starts with.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn seed_admin(&self) -> Result<User, UserStoreError> {
        let (first_name, last_name, biography) = ADMIN_SEED;
        let profile = UserProfile::try_new(first_name, last_name, biography)?;
        let user = User::new(UserId::random(), profile);
        self.repository.insert(&user).await?;
        info!(user_id = %user.id(), "seeded admin user");
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for UserStore<R>
where
    R: UserRepository,
{
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.repository.list().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<User, UserStoreError> {
        let id = UserId::new(id)?;
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or(UserStoreError::NotFound { id })
    }
}

#[async_trait]
impl<R> UsersCommand for UserStore<R>
where
    R: UserRepository,
{
    async fn insert(&self, payload: &[u8]) -> Result<User, UserStoreError> {
        let profile = Self::decode(payload)?;
        let user = User::new(UserId::random(), profile);
        self.repository.insert(&user).await?;
        Ok(user)
    }

    async fn update(&self, id: &str, payload: &[u8]) -> Result<User, UserStoreError> {
        let profile = Self::decode(payload)?;
        let id = UserId::new(id)?;
        let user = User::new(id, profile);
        match self.repository.replace(&user).await? {
            Some(_previous) => Ok(user),
            None => Err(UserStoreError::NotFound { id }),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), UserStoreError> {
        let id = UserId::new(id)?;
        match self.repository.remove(&id).await? {
            Some(_) => Ok(()),
            None => Err(UserStoreError::NotFound { id }),
        }
    }
}
