use serde::Serialize;
use sqlx::FromRow;

/// `date` is `YYYY-MM-DD`, the times are `HH:MM:SS`. The zero-padded formats
/// make lexicographic order agree with chronological order, which is what the
/// conflict checks rely on.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub total_price: Option<f64>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub card_last_digits: Option<String>,
}
