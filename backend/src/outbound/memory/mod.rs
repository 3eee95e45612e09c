//! In-memory `UserRepository` adapter.
//!
//! Records live in a `HashMap` behind a `std::sync::RwLock`. Every port call
//! takes the lock exactly once, so a replace is a single check-and-swap and
//! concurrent writers cannot interleave inside one operation. State is lost
//! when the process exits.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

type UserMap = HashMap<UserId, User>;

/// Process-wide user collection.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<UserMap>,
}

fn poisoned<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::unavailable("user map lock poisoned by a panicking writer")
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserMap>, UserPersistenceError> {
        self.users.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UserMap>, UserPersistenceError> {
        self.users.write().map_err(poisoned)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.write()?;
        match users.entry(*user.id()) {
            Entry::Occupied(_) => Err(UserPersistenceError::conflict(user.id().to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn replace(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.write()?;
        Ok(users
            .get_mut(user.id())
            .map(|stored| std::mem::replace(stored, user.clone())))
    }

    async fn remove(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.write()?.remove(id))
    }
}
