use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::rooms::crud::RoomCrud;
use crate::modules::users::crud::UserCrud;
use crate::AppState;

use super::conflict;
use super::crud::ReservationCrud;
use super::model::Reservation;
use super::schema::{
    CreateReservationRequest, CreateReservationResponse, ErrorResponse, MessageResponse,
    UpdateReservationRequest,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn internal(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Reservation not found")),
    )
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(bad_request(format!("The field '{}' is required", field))),
    }
}

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    tracing::info!("getting all reservations");

    let reservations = ReservationCrud::new(state.db.clone())
        .list()
        .await
        .map_err(internal)?;

    Ok(Json(reservations))
}

pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Reservation>, ApiError> {
    tracing::info!("getting reservation by id");

    let reservation = ReservationCrud::new(state.db.clone())
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    Ok(Json(reservation))
}

pub async fn list_reservations_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    tracing::info!("getting reservations for user {}", user_id);

    let reservations = ReservationCrud::new(state.db.clone())
        .list_by_user(&user_id)
        .await
        .map_err(internal)?;

    Ok(Json(reservations))
}

pub async fn list_reservations_by_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    tracing::info!("getting reservations for room {}", room_id);

    let reservations = ReservationCrud::new(state.db.clone())
        .list_by_room(&room_id)
        .await
        .map_err(internal)?;

    Ok(Json(reservations))
}

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), ApiError> {
    tracing::info!("creating reservation");

    let user_id = required(&req.user_id, "user_id")?.to_string();
    let room_id = required(&req.room_id, "room_id")?.to_string();
    let date = required(&req.date, "date")?.to_string();
    let start_time = required(&req.start_time, "start_time")?.to_string();
    let end_time = required(&req.end_time, "end_time")?.to_string();

    let user_exists = UserCrud::new(state.db.clone())
        .find_by_id(&user_id)
        .await
        .map_err(internal)?
        .is_some();
    if !user_exists {
        return Err(bad_request("The provided user does not exist"));
    }

    let room_exists = RoomCrud::new(state.db.clone())
        .find_by_id(&room_id)
        .await
        .map_err(internal)?
        .is_some();
    if !room_exists {
        return Err(bad_request("The provided room does not exist"));
    }

    if !conflict::is_valid_date(&date) {
        return Err(bad_request("Invalid date format. Use YYYY-MM-DD"));
    }

    if !conflict::is_valid_time(&start_time) || !conflict::is_valid_time(&end_time) {
        return Err(bad_request("Invalid time format. Use HH:MM:SS"));
    }

    if !conflict::window_is_ordered(&start_time, &end_time) {
        return Err(bad_request("Start time must be before end time"));
    }

    let reservation = Reservation {
        id: Uuid::new_v4().to_string(),
        user_id,
        room_id,
        date,
        start_time,
        end_time,
        status: req.status.unwrap_or_else(|| "confirmed".to_string()),
        total_price: req.total_price,
        payment_status: req.payment_status,
        payment_method: req.payment_method,
        card_last_digits: req.card_last_digits,
    };

    ReservationCrud::new(state.db.clone())
        .create(&reservation)
        .await
        .map_err(|e| (e.status_code(), Json(ErrorResponse::new(e.to_string()))))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse {
            success: true,
            message: "Reservation created successfully",
            reservation,
        }),
    ))
}

pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("updating reservation {}", id);

    let crud = ReservationCrud::new(state.db.clone());

    let mut reservation = crud
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    // Format checks run on the provided fields before any conflict lookup.
    let window_changed =
        req.date.is_some() || req.start_time.is_some() || req.end_time.is_some();

    if let Some(date) = req.date {
        if !conflict::is_valid_date(&date) {
            return Err(bad_request("Invalid date format. Use YYYY-MM-DD"));
        }
        reservation.date = date;
    }

    if let Some(start_time) = req.start_time {
        if !conflict::is_valid_time(&start_time) {
            return Err(bad_request("Invalid start time format. Use HH:MM:SS"));
        }
        reservation.start_time = start_time;
    }

    if let Some(end_time) = req.end_time {
        if !conflict::is_valid_time(&end_time) {
            return Err(bad_request("Invalid end time format. Use HH:MM:SS"));
        }
        reservation.end_time = end_time;
    }

    if !conflict::window_is_ordered(&reservation.start_time, &reservation.end_time) {
        return Err(bad_request("Start time must be before end time"));
    }

    if let Some(status) = req.status {
        reservation.status = status;
    }

    crud.update(&reservation, window_changed)
        .await
        .map_err(|e| (e.status_code(), Json(ErrorResponse::new(e.to_string()))))?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Reservation updated successfully",
    }))
}

pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("cancelling reservation {}", id);

    let crud = ReservationCrud::new(state.db.clone());

    if crud.find_by_id(&id).await.map_err(internal)?.is_none() {
        return Err(not_found());
    }

    crud.set_status(&id, "cancelled").await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Reservation cancelled successfully",
    }))
}

pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("deleting reservation {}", id);

    let crud = ReservationCrud::new(state.db.clone());

    if crud.find_by_id(&id).await.map_err(internal)?.is_none() {
        return Err(not_found());
    }

    crud.delete(&id).await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Reservation deleted successfully",
    }))
}
