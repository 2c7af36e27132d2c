//! Bearer token authentication.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{Claims, TokenError, TokenSigner};
use crate::web::error::ApiError;

/// Token verifier shared with extractors through request extensions.
#[derive(Clone)]
pub struct TokenState(pub Arc<dyn TokenSigner>);

/// Extractor for authenticated users.
///
/// Requires an `Authorization: Bearer <token>` header carrying a valid,
/// unexpired token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

        let state = parts
            .extensions
            .get::<TokenState>()
            .ok_or_else(|| ApiError::internal("Token verifier not configured"))?;

        let claims = state.0.verify(token).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            match e {
                TokenError::Expired => ApiError::unauthorized("Token has expired"),
                _ => ApiError::unauthorized("Invalid token"),
            }
        })?;

        Ok(AuthUser(claims))
    }
}

/// Middleware function to inject the token verifier into request extensions.
pub async fn token_auth(state: TokenState, mut request: Request<Body>, next: Next) -> Response {
    request.extensions_mut().insert(state);
    next.run(request).await
}
