use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub capacity: i64,
    pub status: String,
    pub description: Option<String>,
    pub price: Option<f64>,
}
