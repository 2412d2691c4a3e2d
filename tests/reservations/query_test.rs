use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

async fn create_reservation(
    ctx: &TestContext,
    user_id: &str,
    room_id: &str,
    start: &str,
    end: &str,
) -> String {
    let body: serde_json::Value = ctx
        .server
        .post("/api/reservations")
        .json(&json!({
            "user_id": user_id,
            "room_id": room_id,
            "date": "2025-06-01",
            "start_time": start,
            "end_time": end
        }))
        .await
        .json();

    body["reservation"]["id"].as_str().expect("reservation id").to_string()
}

#[tokio::test]
async fn list_returns_all_reservations() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    create_reservation(&ctx, &user_id, &room_id, "09:00:00", "10:00:00").await;
    create_reservation(&ctx, &user_id, &room_id, "11:00:00", "12:00:00").await;

    let response = ctx.server.get("/api/reservations").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_by_id_returns_the_full_record() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    let id = create_reservation(&ctx, &user_id, &room_id, "09:00:00", "10:00:00").await;

    let response = ctx.server.get(&format!("/api/reservations/{}", id)).await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["room_id"], room_id);
    assert_eq!(body["date"], "2025-06-01");
}

#[tokio::test]
async fn reservations_can_be_listed_by_user() {
    let ctx = TestContext::new().await;
    let (user_a, room_a) = ctx.create_room().await;
    let (user_b, room_b) = ctx.create_room().await;
    create_reservation(&ctx, &user_a, &room_a, "09:00:00", "10:00:00").await;
    create_reservation(&ctx, &user_b, &room_b, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .get(&format!("/api/users/{}/reservations", user_a))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], user_a);
}

#[tokio::test]
async fn reservations_can_be_listed_by_room() {
    let ctx = TestContext::new().await;
    let (user_id, room_a) = ctx.create_room().await;
    let (_user_b, room_b) = ctx.create_room().await;
    create_reservation(&ctx, &user_id, &room_a, "09:00:00", "10:00:00").await;
    create_reservation(&ctx, &user_id, &room_b, "11:00:00", "12:00:00").await;

    let response = ctx
        .server
        .get(&format!("/api/rooms/{}/reservations", room_a))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["room_id"], room_a);
}
