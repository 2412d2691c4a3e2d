use serde::{Deserialize, Serialize};

use super::model::Room;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub company_id: Option<String>,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub success: bool,
    pub message: &'static str,
    pub room: Room,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}
