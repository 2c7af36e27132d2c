//! Authentication module for Bookmarl.
//!
//! Password hashing, the user store interface, token signing and the
//! credential service built on top of them.

mod password;
mod service;
mod store;
mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AuthError, CredentialService, LoginOutcome, SignupOutcome};
pub use store::{StoreError, UserStore};
pub use token::{Claims, JwtSigner, TokenError, TokenSigner, TOKEN_TTL_SECS};
