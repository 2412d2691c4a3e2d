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
async fn updating_an_unknown_reservation_returns_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/api/reservations/no-such-id")
        .json(&json!({ "start_time": "09:00:00" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_merges_absent_fields_from_the_stored_record() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    let id = create_reservation(&ctx, &user_id, &room_id, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .put(&format!("/api/reservations/{}", id))
        .json(&json!({ "start_time": "09:30:00" }))
        .await;

    response.assert_status(StatusCode::OK);

    let stored: serde_json::Value = ctx
        .server
        .get(&format!("/api/reservations/{}", id))
        .await
        .json();

    assert_eq!(stored["start_time"], "09:30:00");
    assert_eq!(stored["end_time"], "10:00:00");
    assert_eq!(stored["date"], "2025-06-01");
}

#[tokio::test]
async fn malformed_time_fails_before_any_conflict_check() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    // Occupy the slot the malformed update would land on.
    create_reservation(&ctx, &user_id, &room_id, "10:00:00", "11:00:00").await;
    let id = create_reservation(&ctx, &user_id, &room_id, "12:00:00", "13:00:00").await;

    let response = ctx
        .server
        .put(&format!("/api/reservations/{}", id))
        .json(&json!({ "start_time": "10:15" }))
        .await;

    // 400, not 409: the format check runs first.
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Invalid start time format. Use HH:MM:SS");
}

#[tokio::test]
async fn update_rejects_an_inverted_merged_window() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    let id = create_reservation(&ctx, &user_id, &room_id, "09:00:00", "10:00:00").await;

    // end_time alone moves before the stored start_time.
    let response = ctx
        .server
        .put(&format!("/api/reservations/{}", id))
        .json(&json!({ "end_time": "08:00:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Start time must be before end time");
}

#[tokio::test]
async fn moving_onto_an_occupied_window_returns_conflict() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    create_reservation(&ctx, &user_id, &room_id, "10:00:00", "11:00:00").await;
    let id = create_reservation(&ctx, &user_id, &room_id, "12:00:00", "13:00:00").await;

    let response = ctx
        .server
        .put(&format!("/api/reservations/{}", id))
        .json(&json!({ "start_time": "10:30:00", "end_time": "11:30:00" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn moving_to_a_free_window_succeeds() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    create_reservation(&ctx, &user_id, &room_id, "10:00:00", "11:00:00").await;
    let id = create_reservation(&ctx, &user_id, &room_id, "12:00:00", "13:00:00").await;

    let response = ctx
        .server
        .put(&format!("/api/reservations/{}", id))
        .json(&json!({ "start_time": "14:00:00", "end_time": "15:00:00" }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn a_reservation_does_not_conflict_with_itself() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    let id = create_reservation(&ctx, &user_id, &room_id, "09:00:00", "10:00:00").await;

    // The new window overlaps the old one; the record's own prior state is
    // excluded from the candidate set.
    let response = ctx
        .server
        .put(&format!("/api/reservations/{}", id))
        .json(&json!({ "start_time": "09:15:00", "end_time": "10:15:00" }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn status_can_be_updated_without_touching_the_window() {
    let ctx = TestContext::new().await;
    let (user_id, room_id) = ctx.create_room().await;
    let id = create_reservation(&ctx, &user_id, &room_id, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .put(&format!("/api/reservations/{}", id))
        .json(&json!({ "status": "paid" }))
        .await;

    response.assert_status(StatusCode::OK);

    let stored: serde_json::Value = ctx
        .server
        .get(&format!("/api/reservations/{}", id))
        .await
        .json();
    assert_eq!(stored["status"], "paid");
}
