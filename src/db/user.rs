//! User model for Bookmarl.

use std::fmt;

use serde::Serialize;

/// User entity representing a registered account.
///
/// The password hash is never serialized and never shown by `Debug`.
#[derive(Clone, sqlx::FromRow, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login email (unique).
    pub email: String,
    /// Password hash (Argon2id).
    #[serde(skip_serializing)]
    pub hash: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The fields returned when a user is created.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct UserSummary {
    /// Unique user ID.
    pub id: i64,
    /// Login email.
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            email: "a@x.com".to_string(),
            hash: "$argon2id$v=19$m=65536,t=3,p=4$c2FsdA$aGFzaA".to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_hash() {
        let debug = format!("{:?}", sample_user());
        assert!(debug.contains("a@x.com"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn test_serialize_skips_hash() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("hash").is_none());
    }
}
