use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::companies::crud::CompanyCrud;
use crate::AppState;

use super::crud::RoomCrud;
use super::model::Room;
use super::schema::{
    CreateRoomRequest, CreateRoomResponse, ErrorResponse, MessageResponse, UpdateRoomRequest,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Room not found")),
    )
}

fn missing_field(field: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(format!(
            "The field '{}' is required",
            field
        ))),
    )
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Room>>, ApiError> {
    tracing::info!("getting all rooms");

    let rooms = RoomCrud::new(state.db.clone())
        .list()
        .await
        .map_err(internal)?;

    Ok(Json(rooms))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Room>, ApiError> {
    tracing::info!("getting room by id");

    let room = RoomCrud::new(state.db.clone())
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    Ok(Json(room))
}

pub async fn list_rooms_by_company(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<String>,
) -> Result<Json<Vec<Room>>, ApiError> {
    tracing::info!("getting rooms for company {}", company_id);

    let company_exists = CompanyCrud::new(state.db.clone())
        .find_by_id(&company_id)
        .await
        .map_err(internal)?
        .is_some();
    if !company_exists {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Company not found")),
        ));
    }

    let rooms = RoomCrud::new(state.db.clone())
        .list_by_company(&company_id)
        .await
        .map_err(internal)?;

    Ok(Json(rooms))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), ApiError> {
    tracing::info!("creating room");

    let company_id = match req.company_id.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => return Err(missing_field("company_id")),
    };
    let name = match req.name.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => return Err(missing_field("name")),
    };
    let Some(capacity) = req.capacity else {
        return Err(missing_field("capacity"));
    };

    let company_exists = CompanyCrud::new(state.db.clone())
        .find_by_id(&company_id)
        .await
        .map_err(internal)?
        .is_some();
    if !company_exists {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("The provided company does not exist")),
        ));
    }

    let room = Room {
        id: Uuid::new_v4().to_string(),
        company_id,
        name,
        capacity,
        status: req.status.unwrap_or_else(|| "available".to_string()),
        description: req.description,
        price: req.price,
    };

    RoomCrud::new(state.db.clone())
        .create(&room)
        .await
        .map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            success: true,
            message: "Room created successfully",
            room,
        }),
    ))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("updating room {}", id);

    let crud = RoomCrud::new(state.db.clone());

    let mut room = crud
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    if let Some(name) = req.name {
        room.name = name;
    }

    if let Some(capacity) = req.capacity {
        room.capacity = capacity;
    }

    if let Some(status) = req.status {
        room.status = status;
    }

    if let Some(description) = req.description {
        room.description = Some(description);
    }

    if let Some(price) = req.price {
        room.price = Some(price);
    }

    crud.update(&room).await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Room updated successfully",
    }))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("deleting room {}", id);

    let crud = RoomCrud::new(state.db.clone());

    if crud.find_by_id(&id).await.map_err(internal)?.is_none() {
        return Err(not_found());
    }

    crud.delete(&id).await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Room deleted successfully",
    }))
}
