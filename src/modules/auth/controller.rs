use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::modules::users::crud::UserCrud;
use crate::services::auth::AuthUser;
use crate::services::hashing;
use crate::services::jwt::{AccessTokenKind, TokenUser};
use crate::AppState;

use super::crud::TokenCrud;
use super::schema::{
    ErrorResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse, MeResponse,
    RefreshTokenRequest, RefreshTokenResponse,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

/// The one message for every credential failure: a caller cannot tell an
/// unknown email from a wrong password.
fn invalid_credentials() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("Invalid email or password")),
    )
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    tracing::info!("user login attempt");

    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Email and password are required")),
        ));
    };

    let user = UserCrud::new(state.db.clone())
        .find_by_email(&email)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            tracing::debug!("login failed: unknown email");
            invalid_credentials()
        })?;

    let password_ok = hashing::verify_password(&password, &user.password).map_err(internal)?;
    if !password_ok {
        tracing::debug!("login failed: bad password for user {}", user.id);
        return Err(invalid_credentials());
    }

    let token_user = TokenUser {
        id: user.id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
    };

    let access_token = state
        .jwt_service
        .create_access_token(&token_user, AccessTokenKind::Login)
        .map_err(internal)?;

    let refresh_token = TokenCrud::new(state.db.clone())
        .issue(&state.jwt_service, &user.id)
        .await
        .map_err(internal)?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful",
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, ApiError> {
    tracing::info!("token refresh attempt");

    let refresh_token = match req.refresh_token.as_deref() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Refresh token is required")),
            ))
        }
    };

    // Validity is re-read from the store on every call; a logout or an
    // expiry between two refreshes takes effect immediately.
    let token = TokenCrud::new(state.db.clone())
        .find_by_refresh_token(&refresh_token)
        .await
        .map_err(internal)?;

    let token = match token {
        Some(t) if t.is_valid() => t,
        other => {
            if other.is_some() {
                tracing::debug!("refresh rejected: token revoked or expired");
            } else {
                tracing::debug!("refresh rejected: token not found");
            }
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid or expired refresh token")),
            ));
        }
    };

    let user = UserCrud::new(state.db.clone())
        .find_by_id(&token.user_id)
        .await
        .map_err(internal)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        ))?;

    let token_user = TokenUser {
        id: user.id,
        email: user.email,
        role: user.role,
    };

    // The refresh token itself is not rotated; it stays usable until its own
    // expiry or an explicit logout.
    let access_token = state
        .jwt_service
        .create_access_token(&token_user, AccessTokenKind::Refreshed)
        .map_err(internal)?;

    Ok(Json(RefreshTokenResponse {
        success: true,
        message: "Token refreshed",
        access_token,
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<LogoutResponse>, ApiError> {
    tracing::info!("user logout attempt");

    let refresh_token = match req.refresh_token.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Refresh token is required")),
            ))
        }
    };

    TokenCrud::new(state.db.clone())
        .revoke(refresh_token)
        .await
        .map_err(internal)?;

    Ok(Json(LogoutResponse {
        success: true,
        message: "Logout successful",
    }))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = UserCrud::new(state.db.clone())
        .find_by_id(&auth.0.id)
        .await
        .map_err(internal)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        ))?;

    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}
