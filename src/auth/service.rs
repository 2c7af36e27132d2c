//! Credential service: signup, login and token issuance.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::auth::store::{StoreError, UserStore};
use crate::auth::token::{Claims, TokenError, TokenSigner};
use crate::db::{User, UserSummary};

/// Well-formed Argon2id hash with the production parameters. Unknown emails
/// are verified against it so they cost the same as a wrong password.
const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=3,p=4$Ym9va21hcmwtZHVtbXkxNg$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Failures of the credential service.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password. The two cases are indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup with an email that is already registered.
    #[error("Email already in use")]
    DuplicateEmail,

    /// Store, hashing or signing failure.
    #[error("unexpected failure: {0}")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        AuthError::Unexpected(Box::new(e))
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        AuthError::Unexpected(Box::new(e))
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Unexpected(Box::new(e))
    }
}

impl From<JoinError> for AuthError {
    fn from(e: JoinError) -> Self {
        AuthError::Unexpected(Box::new(e))
    }
}

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    /// The new user's id and email.
    pub user: UserSummary,
    /// Signed session token.
    pub token: String,
}

/// Result of a successful login.
///
/// `user` is the full stored record, hash included. Strip it before it
/// leaves the process.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The stored user record.
    pub user: User,
    /// Signed session token.
    pub token: String,
}

/// Registers users, checks credentials and issues tokens.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    signer: Arc<dyn TokenSigner>,
}

impl CredentialService {
    /// Create a service over a user store and a token signer.
    pub fn new(store: Arc<dyn UserStore>, signer: Arc<dyn TokenSigner>) -> Self {
        Self { store, signer }
    }

    /// Register a new user and issue a token for it.
    ///
    /// Fails with [`AuthError::DuplicateEmail`] when the store reports the
    /// email as taken. No record is left behind on failure: if signing
    /// fails after the insert, the new record is removed again.
    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupOutcome, AuthError> {
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user = match self.store.create(email, &hash).await {
            Ok(user) => user,
            Err(StoreError::UniqueViolation) => {
                debug!("Signup rejected: email already registered");
                return Err(AuthError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        };

        let token = match self.sign_token(user.id, &user.email) {
            Ok(token) => token,
            Err(e) => {
                if let Err(cleanup) = self.store.delete(user.id).await {
                    error!(user_id = user.id, error = %cleanup, "Failed to roll back signup");
                }
                return Err(e.into());
            }
        };
        info!(user_id = user.id, "New user registered");

        Ok(SignupOutcome { user, token })
    }

    /// Check credentials and issue a token.
    ///
    /// An unknown email and a wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                let password = password.to_owned();
                let _ =
                    tokio::task::spawn_blocking(move || verify_password(&password, DUMMY_HASH))
                        .await?;
                debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let password = password.to_owned();
        let hash = user.hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;

        match verified {
            Ok(()) => {}
            Err(PasswordError::VerificationFailed) => {
                debug!(user_id = user.id, "Login rejected: wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(PasswordError::InvalidHash) => {
                warn!(user_id = user.id, "Stored password hash is malformed");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        }

        let token = self.sign_token(user.id, &user.email)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginOutcome { user, token })
    }

    /// Sign a token for `{sub: user_id, email}` with the fixed 15-minute expiry.
    pub fn sign_token(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.signer.sign(&Claims::issue(user_id, email))
    }
}
