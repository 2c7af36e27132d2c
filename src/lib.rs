//! Bookmarl - authentication service for a bookmarking web API.
//!
//! Registers users, verifies credentials and issues short-lived signed
//! session tokens.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthError, Claims, CredentialService, JwtSigner,
    LoginOutcome, PasswordError, SignupOutcome, StoreError, TokenError, TokenSigner, UserStore,
    TOKEN_TTL_SECS,
};
pub use config::Config;
pub use db::{Database, User, UserRepository, UserSummary};
pub use error::{BookmarlError, Result};
