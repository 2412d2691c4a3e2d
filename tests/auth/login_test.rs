use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn login_with_valid_credentials_returns_tokens_and_user() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register_user(&email).await;

    let response = ctx
        .server
        .post("/api/login")
        .json(&json!({
            "email": &email,
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body.get("access_token").is_some());
    assert!(body.get("refresh_token").is_some());
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_returns_generic_unauthorized() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register_user(&email).await;

    let response = ctx
        .server
        .post("/api/login")
        .json(&json!({
            "email": &email,
            "password": "WrongPassword123!"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn login_with_unknown_email_uses_the_same_message() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/login")
        .json(&json!({
            "email": "nonexistent@example.com",
            "password": test_password()
        }))
        .await;

    // Account existence must not be derivable from the response.
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn login_with_missing_fields_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/login")
        .json(&json!({ "email": test_email() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .post("/api/login")
        .json(&json!({ "password": test_password() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_different_tokens_each_time() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register_user(&email).await;

    let body1: serde_json::Value = ctx
        .server
        .post("/api/login")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await
        .json();

    let body2: serde_json::Value = ctx
        .server
        .post("/api/login")
        .json(&json!({ "email": &email, "password": test_password() }))
        .await
        .json();

    assert_ne!(body1["refresh_token"], body2["refresh_token"]);
}
