//! Session token signing and verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of every issued token, in seconds (15 minutes).
pub const TOKEN_TTL_SECS: u64 = 15 * 60;

/// Token-related errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// No signing secret was configured.
    #[error("token signing secret is not configured")]
    MissingSecret,

    /// Encoding the token failed.
    #[error("token encoding failed: {0}")]
    Encode(String),

    /// The token has expired.
    #[error("token has expired")]
    Expired,

    /// The token is malformed or its signature does not match.
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i64,
    /// User email.
    pub email: String,
    /// Issued at (unix seconds).
    pub iat: u64,
    /// Expiration (unix seconds).
    pub exp: u64,
}

impl Claims {
    /// Build claims issued at `issued_at`, expiring [`TOKEN_TTL_SECS`] later.
    pub fn new(user_id: i64, email: impl Into<String>, issued_at: u64) -> Self {
        Self {
            sub: user_id,
            email: email.into(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        }
    }

    /// Build claims issued now.
    pub fn issue(user_id: i64, email: impl Into<String>) -> Self {
        Self::new(user_id, email, chrono::Utc::now().timestamp() as u64)
    }
}

/// Produces and checks signed, time-limited tokens.
pub trait TokenSigner: Send + Sync {
    /// Sign the claims into an opaque token string.
    fn sign(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Verify a token and return its claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 JWT signer holding the server secret.
#[derive(Clone)]
pub struct JwtSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    has_secret: bool,
}

impl JwtSigner {
    /// Create a signer from a secret key.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            has_secret: !secret.is_empty(),
        }
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        if !self.has_secret {
            return Err(TokenError::MissingSecret);
        }

        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        // An empty HMAC key would accept tokens anyone can produce.
        if !self.has_secret {
            return Err(TokenError::MissingSecret);
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl std::fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSigner").finish_non_exhaustive()
    }
}
