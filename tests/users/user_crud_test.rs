use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn listing_users_requires_a_token() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/users").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_users_never_exposes_password_hashes() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user(&test_email()).await;

    let response = ctx
        .server
        .get("/api/users")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let users = body.as_array().unwrap();
    assert!(!users.is_empty());
    for user in users {
        assert!(user.get("password").is_none());
    }
}

#[tokio::test]
async fn getting_unknown_user_returns_not_found() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user(&test_email()).await;

    let response = ctx
        .server
        .get("/api/users/no-such-id")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admins_can_create_users_others_cannot() {
    let ctx = TestContext::new().await;
    let (admin_token, _) = ctx.register_admin(&test_email()).await;
    let (user_token, _) = ctx.register_user(&test_email()).await;

    let payload = json!({
        "email": test_email(),
        "password": test_password(),
        "first_name": "Created"
    });

    let response = ctx
        .server
        .post("/api/users")
        .authorization_bearer(&user_token)
        .json(&payload)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = ctx
        .server
        .post("/api/users")
        .authorization_bearer(&admin_token)
        .json(&payload)
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn users_can_update_their_own_profile_only() {
    let ctx = TestContext::new().await;
    let (token_a, id_a) = ctx.register_user(&test_email()).await;
    let (_token_b, id_b) = ctx.register_user(&test_email()).await;

    let response = ctx
        .server
        .put(&format!("/api/users/{}", id_a))
        .authorization_bearer(&token_a)
        .json(&json!({ "first_name": "Renamed" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["first_name"], "Renamed");

    let response = ctx
        .server
        .put(&format!("/api/users/{}", id_b))
        .authorization_bearer(&token_a)
        .json(&json!({ "first_name": "Hijacked" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_can_update_any_profile() {
    let ctx = TestContext::new().await;
    let (admin_token, _) = ctx.register_admin(&test_email()).await;
    let (_token, user_id) = ctx.register_user(&test_email()).await;

    let response = ctx
        .server
        .put(&format!("/api/users/{}", user_id))
        .authorization_bearer(&admin_token)
        .json(&json!({ "last_name": "Adjusted" }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn role_changes_by_non_admins_are_silently_ignored() {
    let ctx = TestContext::new().await;
    let (token, user_id) = ctx.register_user(&test_email()).await;

    let response = ctx
        .server
        .put(&format!("/api/users/{}", user_id))
        .authorization_bearer(&token)
        .json(&json!({ "role": "admin" }))
        .await;

    // The update succeeds; the role does not move.
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn updating_to_an_email_already_in_use_returns_conflict() {
    let ctx = TestContext::new().await;
    let taken = test_email();
    ctx.register_user(&taken).await;
    let (token, user_id) = ctx.register_user(&test_email()).await;

    let response = ctx
        .server
        .put(&format!("/api/users/{}", user_id))
        .authorization_bearer(&token)
        .json(&json!({ "email": &taken }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn only_admins_can_delete_users() {
    let ctx = TestContext::new().await;
    let (admin_token, _) = ctx.register_admin(&test_email()).await;
    let (user_token, _) = ctx.register_user(&test_email()).await;
    let (_victim_token, victim_id) = ctx.register_user(&test_email()).await;

    let response = ctx
        .server
        .delete(&format!("/api/users/{}", victim_id))
        .authorization_bearer(&user_token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = ctx
        .server
        .delete(&format!("/api/users/{}", victim_id))
        .authorization_bearer(&admin_token)
        .await;
    response.assert_status(StatusCode::OK);

    let response = ctx
        .server
        .get(&format!("/api/users/{}", victim_id))
        .authorization_bearer(&admin_token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
