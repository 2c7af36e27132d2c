//! User repository for Bookmarl.
//!
//! SQLite-backed implementation of [`UserStore`].

use async_trait::async_trait;

use super::user::{User, UserSummary};
use super::DbPool;
use crate::auth::{StoreError, UserStore};
use crate::{BookmarlError, Result};

/// Repository for user records.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a user, returning only its id and email.
    ///
    /// A duplicate email is reported as [`StoreError::UniqueViolation`].
    pub async fn create(
        &self,
        email: &str,
        hash: &str,
    ) -> std::result::Result<UserSummary, StoreError> {
        sqlx::query_as::<_, UserSummary>(
            "INSERT INTO users (email, hash) VALUES (?, ?) RETURNING id, email",
        )
        .bind(email)
        .bind(hash)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    /// Get a user by email (exact match).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookmarlError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Delete a user by ID. Returns false if no such user exists.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| BookmarlError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BookmarlError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::UniqueViolation
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> std::result::Result<Option<User>, StoreError> {
        self.get_by_email(email)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn create(
        &self,
        email: &str,
        hash: &str,
    ) -> std::result::Result<UserSummary, StoreError> {
        UserRepository::create(self, email, hash).await
    }

    async fn delete(&self, id: i64) -> std::result::Result<bool, StoreError> {
        UserRepository::delete(self, id)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_repo() -> (Database, UserRepository) {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool().clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_create_user() {
        let (_db, repo) = setup_repo().await;

        let user = repo.create("a@x.com", "hash-a").await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let (_db, repo) = setup_repo().await;

        let first = repo.create("a@x.com", "h").await.unwrap();
        let second = repo.create("b@x.com", "h").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let (_db, repo) = setup_repo().await;

        repo.create("a@x.com", "hash-a").await.unwrap();
        let result = repo.create("a@x.com", "hash-b").await;

        assert!(matches!(result, Err(StoreError::UniqueViolation)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let (_db, repo) = setup_repo().await;
        repo.create("a@x.com", "hash-a").await.unwrap();

        let user = repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.hash, "hash-a");
        assert!(!user.created_at.is_empty());

        assert!(repo.get_by_email("missing@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, repo) = setup_repo().await;
        let created = repo.create("a@x.com", "hash-a").await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_email("a@x.com").await.unwrap().is_none());

        // The email can be registered again.
        repo.create("a@x.com", "hash-b").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_trait() {
        let (_db, repo) = setup_repo().await;
        let store: &dyn UserStore = &repo;

        let summary = store.create("a@x.com", "hash-a").await.unwrap();
        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, summary.id);
        assert_eq!(found.email, summary.email);

        assert!(matches!(
            store.create("a@x.com", "hash-b").await,
            Err(StoreError::UniqueViolation)
        ));
    }

    #[tokio::test]
    async fn test_closed_pool_is_backend_error() {
        let (db, repo) = setup_repo().await;
        db.pool().close().await;

        let result = UserStore::create(&repo, "a@x.com", "h").await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }
}
