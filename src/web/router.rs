//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{AuthRequest, AuthResponse, MeResponse, UserInfo};
use super::error::{ApiError, ErrorBody, ErrorCode, ErrorDetail};
use super::handlers::{login, me, signup, AppState};
use super::middleware::{create_cors_layer, token_auth, TokenState};

/// OpenAPI document for the Bookmarl API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookmarl API",
        description = "API for bookmarking websites",
        version = "0.1"
    ),
    paths(
        crate::web::handlers::auth::signup,
        crate::web::handlers::auth::login,
        crate::web::handlers::user::me
    ),
    components(schemas(
        AuthRequest,
        AuthResponse,
        UserInfo,
        MeResponse,
        ErrorBody,
        ErrorDetail,
        ErrorCode
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Signup and login"),
        (name = "Users", description = "Authenticated user")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login));

    let user_routes = Router::new().route("/me", get(me));

    let token_state = TokenState(app_state.signer.clone());

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    token_auth(token_state.clone(), req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router (`/api-docs`, OpenAPI JSON at `/api-docs-json`).
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/api-docs").url("/api-docs-json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
