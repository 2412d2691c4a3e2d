use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::crud::UserCrud;
use crate::services::auth::{require_owner_or_admin, AuthUser};
use crate::AppState;

use super::crud::CompanyCrud;
use super::model::Company;
use super::schema::{
    CreateCompanyRequest, CreateCompanyResponse, ErrorResponse, MessageResponse,
    UpdateCompanyRequest,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "The field '{}' is required",
                field
            ))),
        )),
    }
}

fn internal(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Company not found")),
    )
}

pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<Vec<Company>>, ApiError> {
    tracing::info!("getting all companies");

    let companies = CompanyCrud::new(state.db.clone())
        .list()
        .await
        .map_err(internal)?;

    Ok(Json(companies))
}

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Company>, ApiError> {
    tracing::info!("getting company by id");

    let company = CompanyCrud::new(state.db.clone())
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    Ok(Json(company))
}

pub async fn list_companies_by_user(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Company>>, ApiError> {
    tracing::info!("getting companies for user {}", user_id);

    require_owner_or_admin(&auth.0, &user_id).map_err(|e| {
        (
            e.status_code(),
            Json(ErrorResponse::new(
                "You do not have permission to view these companies",
            )),
        )
    })?;

    let companies = CompanyCrud::new(state.db.clone())
        .list_by_user(&user_id)
        .await
        .map_err(internal)?;

    Ok(Json(companies))
}

pub async fn create_company(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CreateCompanyResponse>), ApiError> {
    tracing::info!("creating company");

    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let user_id = required(&req.user_id, "user_id")?.to_string();
    let name = required(&req.name, "name")?.to_string();
    let email = required(&req.email, "email")?.to_string();

    let crud = CompanyCrud::new(state.db.clone());

    if crud.email_exists(&email).await.map_err(internal)? {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                "Email already registered for another company",
            )),
        ));
    }

    let owner_exists = UserCrud::new(state.db.clone())
        .find_by_id(&user_id)
        .await
        .map_err(internal)?
        .is_some();
    if !owner_exists {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("The provided user does not exist")),
        ));
    }

    let company = Company {
        id: Uuid::new_v4().to_string(),
        user_id,
        name,
        email,
        phone: req.phone,
        address: req.address,
    };

    crud.create(&company).await.map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCompanyResponse {
            success: true,
            message: "Company created successfully",
            company,
        }),
    ))
}

pub async fn update_company(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("updating company {}", id);

    let crud = CompanyCrud::new(state.db.clone());

    let mut company = crud
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    require_owner_or_admin(&auth.0, &company.user_id).map_err(|e| {
        (
            e.status_code(),
            Json(ErrorResponse::new(
                "You do not have permission to modify this company",
            )),
        )
    })?;

    if let Some(name) = req.name.filter(|n| !n.is_empty()) {
        company.name = name;
    }

    if let Some(email) = req.email.filter(|e| !e.is_empty()) {
        if crud
            .email_taken_by_other(&email, &id)
            .await
            .map_err(internal)?
        {
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "Email already in use by another company",
                )),
            ));
        }
        company.email = email;
    }

    if let Some(phone) = req.phone {
        company.phone = Some(phone);
    }

    if let Some(address) = req.address {
        company.address = Some(address);
    }

    crud.update(&company).await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Company updated successfully",
    }))
}

pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("deleting company {}", id);

    let crud = CompanyCrud::new(state.db.clone());

    let company = crud
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    require_owner_or_admin(&auth.0, &company.user_id).map_err(|e| {
        (
            e.status_code(),
            Json(ErrorResponse::new(
                "You do not have permission to delete this company",
            )),
        )
    })?;

    crud.delete(&id).await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Company deleted successfully",
    }))
}
