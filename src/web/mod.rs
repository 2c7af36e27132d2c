//! Web API module for Bookmarl.
//!
//! HTTP surface for the credential service: signup, login, the current
//! user, health and OpenAPI documentation.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
