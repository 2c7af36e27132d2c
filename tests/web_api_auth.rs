//! Web API Authentication Tests
//!
//! Integration tests for signup, login and the bearer-protected user endpoint.

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use bookmarl::web::handlers::AppState;
use bookmarl::web::router::create_router;
use bookmarl::{Claims, Database, JwtSigner, TokenSigner, UserRepository};
use serde_json::{json, Value};
use std::sync::Arc;

const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server with an in-memory database.
async fn create_test_server() -> (TestServer, Database) {
    // Create in-memory database
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    // Create app state
    let app_state = Arc::new(AppState::new(&db, TEST_SECRET));

    // Create router
    let router = create_router(app_state, &[]);

    // Create test server
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Helper to sign up a test user and return the response body.
async fn signup_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/auth/signup")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// Helper to log in and return the raw response.
async fn login_user(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/auth/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await
}

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup_success() {
    let (server, db) = create_test_server().await;

    let body = signup_user(&server, "alice@example.com", "hunter2").await;

    assert!(body["token"].is_string());
    assert!(body["user"]["id"].is_i64());
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("hash").is_none());

    // The stored hash is an Argon2id PHC string, never the plaintext.
    let repo = UserRepository::new(db.pool().clone());
    let stored = repo
        .get_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.hash.starts_with("$argon2id$"));
    assert_ne!(stored.hash, "hunter2");
}

#[tokio::test]
async fn test_signup_token_claims() {
    let (server, _db) = create_test_server().await;

    let body = signup_user(&server, "alice@example.com", "hunter2").await;
    let token = body["token"].as_str().unwrap();

    let claims: Claims = JwtSigner::new(TEST_SECRET).verify(token).unwrap();
    assert_eq!(claims.sub, body["user"]["id"].as_i64().unwrap());
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.exp - claims.iat, 900);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let (server, db) = create_test_server().await;

    signup_user(&server, "alice@example.com", "hunter2").await;

    let response = server
        .post("/auth/signup")
        .json(&json!({
            "email": "alice@example.com",
            "password": "something-else"
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
    assert_eq!(body["error"]["message"], "Email already in use");

    let repo = UserRepository::new(db.pool().clone());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/signup")
        .json(&json!({
            "email": "not-an-email",
            "password": "hunter2"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["email"].is_array());
}

#[tokio::test]
async fn test_signup_empty_password() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/signup")
        .json(&json!({
            "email": "alice@example.com",
            "password": ""
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert!(body["error"]["details"]["password"].is_array());
}

#[tokio::test]
async fn test_signup_unknown_field_rejected() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/signup")
        .json(&json!({
            "email": "alice@example.com",
            "password": "hunter2",
            "role": "admin"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_signup_malformed_body() {
    let (server, _db) = create_test_server().await;

    let response = server.post("/auth/signup").text("{not json").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_missing_password() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": "alice@example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let (server, _db) = create_test_server().await;

    let signup = signup_user(&server, "alice@example.com", "hunter2").await;

    let response = login_user(&server, "alice@example.com", "hunter2").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["id"], signup["user"]["id"]);
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("hash").is_none());
    assert!(!response.text().contains("argon2"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _db) = create_test_server().await;

    signup_user(&server, "alice@example.com", "hunter2").await;

    let response = login_user(&server, "alice@example.com", "wrong").await;
    response.assert_status(StatusCode::FORBIDDEN);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
    assert_eq!(body["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (server, _db) = create_test_server().await;

    let response = login_user(&server, "nobody@example.com", "hunter2").await;
    response.assert_status(StatusCode::FORBIDDEN);

    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (server, _db) = create_test_server().await;

    signup_user(&server, "alice@example.com", "hunter2").await;

    let wrong_password: Value = login_user(&server, "alice@example.com", "nope")
        .await
        .json();
    let unknown_email: Value = login_user(&server, "bob@example.com", "hunter2")
        .await
        .json();

    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let (server, _db) = create_test_server().await;

    signup_user(&server, "alice@example.com", "hunter2").await;

    let response = login_user(&server, "Alice@Example.com", "hunter2").await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_invalid_email() {
    let (server, _db) = create_test_server().await;

    let response = login_user(&server, "not-an-email", "hunter2").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Current User Tests
// ============================================================================

#[tokio::test]
async fn test_me_with_signup_token() {
    let (server, _db) = create_test_server().await;

    let signup = signup_user(&server, "alice@example.com", "hunter2").await;
    let token = signup["token"].as_str().unwrap();

    let response = server
        .get("/users/me")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], signup["user"]["id"]);
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["expires_at"].is_u64());
}

#[tokio::test]
async fn test_me_with_login_token() {
    let (server, _db) = create_test_server().await;

    signup_user(&server, "alice@example.com", "hunter2").await;
    let login: Value = login_user(&server, "alice@example.com", "hunter2")
        .await
        .json();
    let token = login["token"].as_str().unwrap();

    let response = server
        .get("/users/me")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["email"], "alice@example.com");
}

#[tokio::test]
async fn test_me_without_token() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_with_invalid_token() {
    let (server, _db) = create_test_server().await;

    let response = server
        .get("/users/me")
        .add_header(AUTHORIZATION, "Bearer invalid-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid token");
}

#[tokio::test]
async fn test_me_with_token_from_other_secret() {
    let (server, _db) = create_test_server().await;

    let token = JwtSigner::new("some-other-secret")
        .sign(&Claims::issue(1, "alice@example.com"))
        .unwrap();

    let response = server
        .get("/users/me")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let (server, _db) = create_test_server().await;

    let token = JwtSigner::new(TEST_SECRET)
        .sign(&Claims::new(1, "alice@example.com", 1_000_000))
        .unwrap();

    let response = server
        .get("/users/me")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Token has expired"
    );
}

#[tokio::test]
async fn test_me_rejects_token_when_secret_is_empty() {
    let db = Database::open_in_memory().await.unwrap();
    let router = create_router(Arc::new(AppState::new(&db, "")), &[]);
    let server = TestServer::new(router).unwrap();

    // Anyone can produce a token with an empty HMAC key.
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &Claims::issue(1, "alice@example.com"),
        &jsonwebtoken::EncodingKey::from_secret(b""),
    )
    .unwrap();

    let response = server
        .get("/users/me")
        .add_header(AUTHORIZATION, format!("Bearer {}", forged))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Routing Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_route() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/auth/logout").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
