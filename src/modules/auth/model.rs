use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A persisted refresh token. One row per issued token: a user logged in on
/// several devices holds several live rows at once.
#[derive(Debug, Clone, FromRow)]
pub struct Token {
    pub id: String,
    pub user_id: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl Token {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }
}
