//! User persistence interface consumed by the credential service.

use async_trait::async_trait;
use thiserror::Error;

use crate::db::{User, UserSummary};

/// Errors reported by a [`UserStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// A user with the same email already exists.
    #[error("unique constraint violated")]
    UniqueViolation,

    /// Any other storage failure.
    #[error("store error: {0}")]
    Backend(String),
}

/// Persistence of user records, keyed uniquely by email.
///
/// Email uniqueness is enforced by the store itself; callers never
/// check-then-insert.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user, returning only its id and email.
    async fn create(&self, email: &str, hash: &str) -> Result<UserSummary, StoreError>;

    /// Remove a user by id. Returns whether a record was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
