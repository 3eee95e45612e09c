//! Driving port for user writes.
//!
//! Commands receive the raw request body so decoding, validation, and
//! identifier parsing happen in one place with one error taxonomy.

use async_trait::async_trait;

use crate::domain::{User, UserStoreError};

/// Domain use-case port for creating, replacing, and deleting users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Decode and validate `payload`, assign a fresh id, and store the record.
    async fn insert(&self, payload: &[u8]) -> Result<User, UserStoreError>;

    /// Replace the content of record `id` with the decoded `payload`.
    ///
    /// Returns the record as stored after the replacement.
    async fn update(&self, id: &str, payload: &[u8]) -> Result<User, UserStoreError>;

    /// Remove record `id`.
    async fn delete(&self, id: &str) -> Result<(), UserStoreError>;
}
