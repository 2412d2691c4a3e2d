use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::modules::users::crud::UserCrud;
use crate::services::jwt::TokenUser;
use crate::AppState;

/// Verified bearer identity, extracted per request. Handlers that need
/// authentication take an `AuthUser` argument; everything else stays public.
pub struct AuthUser(pub TokenUser);

#[derive(Debug, Serialize)]
pub struct AuthErrorBody {
    pub error: bool,
    pub message: &'static str,
}

fn unauthenticated(message: &'static str) -> (StatusCode, Json<AuthErrorBody>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthErrorBody {
            error: true,
            message,
        }),
    )
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = (StatusCode, Json<AuthErrorBody>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("Authorization token required"))?;

        let token = header.strip_prefix("Bearer ").unwrap_or(header);

        // Clients get a uniform message whatever the actual failure; the
        // distinction only goes to the logs.
        let decoded = state.jwt_service.verify_access_token(token).map_err(|e| {
            tracing::debug!("access token rejected: {}", e);
            unauthenticated("Invalid or expired token")
        })?;

        let claims = decoded.claims.data;

        // A token for a deleted user is no longer valid, however good its
        // signature is.
        let user = UserCrud::new(state.db.clone())
            .find_by_id(&claims.id)
            .await
            .map_err(|e| {
                tracing::error!("user lookup during token verification failed: {}", e);
                unauthenticated("Invalid or expired token")
            })?;

        if user.is_none() {
            tracing::debug!("access token references deleted user {}", claims.id);
            return Err(unauthenticated("Invalid or expired token"));
        }

        Ok(AuthUser(claims))
    }
}

// =============================================================================
// AUTHORIZATION GUARDS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    #[error("Forbidden: Insufficient permissions")]
    RoleNotAllowed,

    #[error("You do not have permission to access this resource")]
    NotOwner,
}

impl AuthzError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }
}

/// Role must be one of `allowed`.
pub fn require_role(user: &TokenUser, allowed: &[&str]) -> Result<(), AuthzError> {
    if allowed.contains(&user.role.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::RoleNotAllowed)
    }
}

/// Admins pass; everyone else must own the resource.
pub fn require_owner_or_admin(user: &TokenUser, owner_id: &str) -> Result<(), AuthzError> {
    if user.role == "admin" || user.id == owner_id {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}
