use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::auth::crud::TokenCrud;
use crate::services::auth::{require_owner_or_admin, require_role, AuthUser};
use crate::services::hashing;
use crate::services::jwt::{AccessTokenKind, TokenUser};
use crate::AppState;

use super::crud::UserCrud;
use super::model::User;
use super::schema::{
    ChangePasswordRequest, CreateUserRequest, CreateUserResponse, ErrorResponse, MessageResponse,
    RegisterRequest, RegisterResponse, UpdateUserRequest, UpdateUserResponse, UserResponse,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("Field '{}' is required", field))),
        )),
    }
}

fn internal(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    tracing::info!("user registration attempt");

    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let email = required(&req.email, "email")?.to_string();
    let password = required(&req.password, "password")?.to_string();
    let first_name = required(&req.first_name, "first_name")?.to_string();
    let last_name = required(&req.last_name, "last_name")?.to_string();

    let crud = UserCrud::new(state.db.clone());

    if crud.email_exists(&email).await.map_err(internal)? {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Email already registered")),
        ));
    }

    let password_hash = hashing::hash_password(&password).map_err(internal)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        first_name,
        last_name,
        email,
        password: password_hash,
        role: req.role.unwrap_or_else(|| "user".to_string()),
        preferred_language: req.preferred_language,
        profile_image_id: None,
    };

    if let Err(e) = crud.create(&user).await {
        // A concurrent registration can slip past the existence check; the
        // unique index has the final word.
        if e.to_string().contains("UNIQUE constraint") {
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("Email already registered")),
            ));
        }
        return Err(internal(e));
    }

    tracing::info!("user created, id {}", user.id);

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

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful",
            access_token,
            refresh_token,
            user: user.into(),
        }),
    ))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    tracing::info!("getting all users");

    let users = UserCrud::new(state.db.clone())
        .list()
        .await
        .map_err(internal)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    tracing::info!("getting user by id");

    let user = UserCrud::new(state.db.clone())
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        ))?;

    Ok(Json(user.into()))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    tracing::info!("saving user - admin only");

    require_role(&auth.0, &["admin"])
        .map_err(|e| (e.status_code(), Json(ErrorResponse::new(e.to_string()))))?;

    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let email = required(&req.email, "email")?.to_string();
    let password = required(&req.password, "password")?.to_string();
    let first_name = required(&req.first_name, "first_name")?.to_string();

    let crud = UserCrud::new(state.db.clone());

    if crud.email_exists(&email).await.map_err(internal)? {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Email already registered")),
        ));
    }

    let password_hash = hashing::hash_password(&password).map_err(internal)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        first_name,
        last_name: req.last_name.unwrap_or_default(),
        email,
        password: password_hash,
        role: req.role.unwrap_or_else(|| "user".to_string()),
        preferred_language: None,
        profile_image_id: None,
    };

    crud.create(&user).await.map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            success: true,
            message: "User created successfully",
            user: user.into(),
        }),
    ))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, ApiError> {
    tracing::info!("updating user {}", id);

    require_owner_or_admin(&auth.0, &id).map_err(|e| {
        (
            e.status_code(),
            Json(ErrorResponse::new("You can only update your own profile")),
        )
    })?;

    let crud = UserCrud::new(state.db.clone());

    let mut user = crud.find_by_id(&id).await.map_err(internal)?.ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("User not found")),
    ))?;

    if let Some(first_name) = req.first_name {
        user.first_name = first_name;
    }

    if let Some(last_name) = req.last_name {
        user.last_name = last_name;
    }

    if let Some(email) = req.email {
        if crud
            .email_taken_by_other(&email, &id)
            .await
            .map_err(internal)?
        {
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("Email already in use by another user")),
            ));
        }
        user.email = email;
    }

    if let Some(password) = req.password.filter(|p| !p.is_empty()) {
        user.password = hashing::hash_password(&password).map_err(internal)?;
    }

    if let Some(role) = req.role {
        // Only admins may change roles; anyone else is silently ignored.
        if auth.0.role == "admin" {
            tracing::info!("admin {} changing role of {} to {}", auth.0.id, id, role);
            user.role = role;
        } else {
            tracing::warn!("non-admin {} attempted role change on {}", auth.0.id, id);
        }
    }

    if let Some(preferred_language) = req.preferred_language {
        user.preferred_language = Some(preferred_language);
    }

    if let Some(profile_image_id) = req.profile_image_id {
        user.profile_image_id = Some(profile_image_id);
    }

    crud.update(&user).await.map_err(internal)?;

    Ok(Json(UpdateUserResponse {
        success: true,
        message: "User updated successfully",
        user: user.into(),
    }))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("changing password for user {}", id);

    require_owner_or_admin(&auth.0, &id).map_err(|e| {
        (
            e.status_code(),
            Json(ErrorResponse::new("You can only change your own password")),
        )
    })?;

    let crud = UserCrud::new(state.db.clone());

    let user = crud.find_by_id(&id).await.map_err(internal)?.ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("User not found")),
    ))?;

    let current = req.current_password.filter(|p| !p.is_empty());
    let new = req.new_password.filter(|p| !p.is_empty());
    let (Some(current), Some(new)) = (current, new) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Current password and new password are required",
            )),
        ));
    };

    let current_ok = hashing::verify_password(&current, &user.password).map_err(internal)?;
    if !current_ok {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Current password is incorrect")),
        ));
    }

    if new.len() < 8 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "New password must be at least 8 characters long",
            )),
        ));
    }

    let password_hash = hashing::hash_password(&new).map_err(internal)?;
    crud.set_password(&id, &password_hash)
        .await
        .map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Password changed successfully",
    }))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("deleting user - admin only");

    require_role(&auth.0, &["admin"])
        .map_err(|e| (e.status_code(), Json(ErrorResponse::new(e.to_string()))))?;

    let crud = UserCrud::new(state.db.clone());

    if crud.find_by_id(&id).await.map_err(internal)?.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        ));
    }

    crud.delete(&id).await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "User deleted successfully",
    }))
}
