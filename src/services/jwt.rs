use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const ISSUER: &str = "greenwork-api";

/// The identity carried inside an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub data: TokenUser,
}

/// Where an access token was issued from. Login/registration tokens live for
/// seven days, tokens minted by the refresh endpoint for one hour. The
/// asymmetry is inherited policy (see DESIGN.md), not something to even out.
#[derive(Debug, Clone, Copy)]
pub enum AccessTokenKind {
    Login,
    Refreshed,
}

pub struct JwtService {
    secret: String,
    login_token_duration: Duration,
    refreshed_token_duration: Duration,
    refresh_token_duration: Duration,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            login_token_duration: Duration::days(7),
            refreshed_token_duration: Duration::hours(1),
            refresh_token_duration: Duration::days(30),
        }
    }

    pub fn create_access_token(
        &self,
        user: &TokenUser,
        kind: AccessTokenKind,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = match kind {
            AccessTokenKind::Login => now + self.login_token_duration,
            AccessTokenKind::Refreshed => now + self.refreshed_token_duration,
        };

        let claims = Claims {
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            data: user.clone(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify_access_token(
        &self,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
    }

    /// Opaque refresh token: 256 random bits, hex-encoded. Not a JWT; its
    /// validity lives entirely in the tokens table.
    pub fn generate_refresh_token() -> String {
        let bytes: [u8; 32] = rand::rng().random();
        hex::encode(bytes)
    }

    pub fn refresh_token_expires_at(&self) -> DateTime<Utc> {
        Utc::now() + self.refresh_token_duration
    }
}
