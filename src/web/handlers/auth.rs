//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{CredentialService, JwtSigner, TokenSigner};
use crate::db::{Database, UserRepository};
use crate::web::dto::{AuthRequest, AuthResponse, ValidatedJson};
use crate::web::error::{ApiError, ErrorBody};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential service.
    pub credentials: CredentialService,
    /// Token signer, also used to verify bearer tokens.
    pub signer: Arc<dyn TokenSigner>,
}

impl AppState {
    /// Create application state backed by `db`, signing with `jwt_secret`.
    pub fn new(db: &Database, jwt_secret: &str) -> Self {
        let store = Arc::new(UserRepository::new(db.pool().clone()));
        let signer: Arc<dyn TokenSigner> = Arc::new(JwtSigner::new(jwt_secret));
        Self::from_parts(CredentialService::new(store, signer.clone()), signer)
    }

    /// Create application state from an existing service and signer.
    pub fn from_parts(credentials: CredentialService, signer: Arc<dyn TokenSigner>) -> Self {
        Self {
            credentials,
            signer,
        }
    }
}

/// POST /auth/signup - Register a new user.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Auth",
    request_body = AuthRequest,
    responses(
        (status = 201, description = "User created", body = AuthResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 403, description = "Email already in use", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let outcome = state.credentials.signup(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// POST /auth/login - Log in with email and password.
///
/// The stored hash is dropped here; only id and email are returned.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 403, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let outcome = state.credentials.login(&req.email, &req.password).await?;
    Ok(Json(outcome.into()))
}
