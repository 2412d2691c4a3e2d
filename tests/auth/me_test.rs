use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use crate::common::{test_email, TestContext, TEST_JWT_SECRET};

#[tokio::test]
async fn me_returns_the_current_user_without_password() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (token, user_id) = ctx.register_user(&email).await;

    let response = ctx.server.get("/api/me").authorization_bearer(&token).await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn me_without_authorization_header_returns_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Authorization token required");
}

#[tokio::test]
async fn me_with_garbage_token_returns_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get("/api/me")
        .authorization_bearer("not.a.jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_expired_token_returns_unauthorized() {
    let ctx = TestContext::new().await;
    let (_token, user_id) = ctx.register_user(&test_email()).await;

    // Correctly signed, but already expired.
    let now = Utc::now().timestamp();
    let claims = json!({
        "iss": "greenwork-api",
        "iat": now - 7200,
        "exp": now - 3600,
        "data": { "id": user_id, "email": "x@example.com", "role": "user" }
    });
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = ctx
        .server
        .get("/api/me")
        .authorization_bearer(&expired)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_token_of_deleted_user_returns_unauthorized() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let (token, _user_id) = ctx.register_user(&email).await;

    sqlx::query("DELETE FROM users WHERE email = ?")
        .bind(&email)
        .execute(&ctx.db)
        .await
        .unwrap();

    let response = ctx.server.get("/api/me").authorization_bearer(&token).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
