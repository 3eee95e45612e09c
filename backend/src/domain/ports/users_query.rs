//! Driving port for user reads.
//!
//! Inbound adapters fetch records through this port without touching the
//! repository directly; identifier text is parsed behind the port so every
//! adapter reports malformed ids the same way.

use async_trait::async_trait;

use crate::domain::{User, UserStoreError};

/// Domain use-case port for reading user records.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored record, in no guaranteed order.
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch the record whose identifier is spelled `id`.
    async fn find_by_id(&self, id: &str) -> Result<User, UserStoreError>;
}
