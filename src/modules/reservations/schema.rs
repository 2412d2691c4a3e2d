use serde::{Deserialize, Serialize};

use super::model::Reservation;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub user_id: Option<String>,
    pub room_id: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub total_price: Option<f64>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub card_last_digits: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateReservationResponse {
    pub success: bool,
    pub message: &'static str,
    pub reservation: Reservation,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UpdateReservationRequest {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
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
