//! User registration and profile API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use uuid::Uuid;

use common::fixtures;
use common::TestContext;

/// Test registering a new user returns a token.
#[tokio::test]
#[ignore = "requires database"]
async fn test_register_returns_token() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let email = format!("register-{}@example.com", &Uuid::new_v4().to_string()[..8]);
    let response = server
        .post("/api/users/register")
        .json(&fixtures::register_request(&email))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().unwrap().len() > 10);

    let user_id: Uuid = body["user_id"].as_str().unwrap().parse().unwrap();
    ctx.cleanup_user(user_id).await;
}

/// Test registering with an empty email is rejected.
#[tokio::test]
#[ignore = "requires database"]
async fn test_register_empty_email() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post("/api/users/register")
        .json(&fixtures::register_request("   "))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test a fresh user defaults to the free plan.
#[tokio::test]
#[ignore = "requires database"]
async fn test_me_defaults_to_free_plan() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let user = ctx.create_test_user().await;

    let response = server
        .get("/api/users/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&user.token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["plan"], "free");
    assert_eq!(body["email"], user.email);

    ctx.cleanup_user(user.id).await;
}

/// Test protected endpoints require authentication.
#[tokio::test]
#[ignore = "requires database"]
async fn test_me_requires_auth() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/users/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

/// Test a garbage token is rejected.
#[tokio::test]
#[ignore = "requires database"]
async fn test_invalid_token_rejected() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/users/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value("not-a-real-token"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
