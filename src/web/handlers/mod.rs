//! API handlers for the Web API.

pub mod auth;
pub mod user;

pub use auth::*;
pub use user::*;
