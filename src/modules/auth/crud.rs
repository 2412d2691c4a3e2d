use chrono::Utc;
use uuid::Uuid;

use crate::config::DbPool;
use crate::services::jwt::JwtService;

use super::model::Token;

pub struct TokenCrud {
    pool: DbPool,
}

impl TokenCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Generate, persist and hand back a fresh refresh token for `user_id`.
    pub async fn issue(&self, jwt: &JwtService, user_id: &str) -> Result<String, sqlx::Error> {
        let refresh_token = JwtService::generate_refresh_token();

        let token = Token {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            refresh_token: refresh_token.clone(),
            expires_at: jwt.refresh_token_expires_at(),
            is_revoked: false,
            created_at: Utc::now(),
        };

        self.create(&token).await?;

        Ok(refresh_token)
    }

    pub async fn create(&self, token: &Token) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO tokens (id, user_id, refresh_token, expires_at, is_revoked, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&token.id)
        .bind(&token.user_id)
        .bind(&token.refresh_token)
        .bind(token.expires_at)
        .bind(token.is_revoked)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Validity is decided by the caller from the row's current state; this
    /// is a plain read so every redemption sees the store, not a cache.
    pub async fn find_by_refresh_token(&self, raw: &str) -> Result<Option<Token>, sqlx::Error> {
        sqlx::query_as::<_, Token>("SELECT * FROM tokens WHERE refresh_token = ?")
            .bind(raw)
            .fetch_optional(&self.pool)
            .await
    }

    /// Mark a refresh token revoked. Unknown tokens are a no-op, not an error.
    pub async fn revoke(&self, raw: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tokens SET is_revoked = 1 WHERE refresh_token = ?")
            .bind(raw)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
