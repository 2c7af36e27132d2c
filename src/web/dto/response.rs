//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{Claims, LoginOutcome, SignupOutcome};
use crate::db::{User, UserSummary};

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Email.
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl From<UserSummary> for UserInfo {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Signup and login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: UserInfo,
    /// Session token (JWT, valid for 15 minutes).
    pub token: String,
}

impl From<SignupOutcome> for AuthResponse {
    fn from(outcome: SignupOutcome) -> Self {
        Self {
            user: outcome.user.into(),
            token: outcome.token,
        }
    }
}

impl From<LoginOutcome> for AuthResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user: outcome.user.into(),
            token: outcome.token,
        }
    }
}

/// Current user response, read from the bearer token.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    /// User ID.
    pub id: i64,
    /// Email.
    pub email: String,
    /// Token expiry (unix seconds).
    pub expires_at: u64,
}

impl From<Claims> for MeResponse {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            expires_at: claims.exp,
        }
    }
}
