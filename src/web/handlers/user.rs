//! User handlers.

use axum::Json;

use crate::web::dto::MeResponse;
use crate::web::error::ErrorBody;
use crate::web::middleware::AuthUser;

/// GET /users/me - The user identified by the bearer token.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody)
    )
)]
pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(claims.into())
}
