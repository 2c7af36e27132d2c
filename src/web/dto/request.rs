//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Credentials for signup and login.
///
/// Unknown fields are rejected.
#[derive(Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AuthRequest {
    /// Account email.
    #[validate(email(message = "email must be an email"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "password should not be empty"))]
    #[schema(example = "secret1")]
    pub password: String,
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
