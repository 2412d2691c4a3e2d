use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;
use uuid::Uuid;

use crate::services::auth::AuthUser;
use crate::AppState;

use super::crud::ImageCrud;
use super::model::Image;
use super::schema::{
    CreateImageRequest, CreateImageResponse, ErrorResponse, ImageResponse, ImageSummary,
    MessageResponse, UpdateImageRequest, UpdateImageResponse,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Image not found")),
    )
}

/// Content type from the leading magic bytes, image/jpeg when unrecognized.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else {
        "image/jpeg"
    }
}

pub async fn list_images(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<Vec<ImageSummary>>, ApiError> {
    tracing::info!("getting all images");

    let images = ImageCrud::new(state.db.clone())
        .list()
        .await
        .map_err(internal)?;

    Ok(Json(images.into_iter().map(ImageSummary::from).collect()))
}

pub async fn get_image_by_name(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<ImageResponse>, ApiError> {
    tracing::info!("getting image by name: {}", name);

    let image = ImageCrud::new(state.db.clone())
        .find_by_name(&name)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    Ok(Json(image.into()))
}

pub async fn create_image(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Json(req): Json<CreateImageRequest>,
) -> Result<(StatusCode, Json<CreateImageResponse>), ApiError> {
    tracing::info!("creating image");

    let name = match req.name.as_deref() {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No image or name provided")),
            ))
        }
    };

    if let Some(data) = req.data.as_deref() {
        if BASE64.decode(data).is_err() {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Image data is not valid base64")),
            ));
        }
    } else {
        tracing::warn!("image '{}' created without data", name);
    }

    let image = Image {
        id: Uuid::new_v4().to_string(),
        name,
        data: req.data,
    };

    ImageCrud::new(state.db.clone())
        .create(&image)
        .await
        .map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateImageResponse {
            success: true,
            message: "Image created successfully",
            image: image.into(),
        }),
    ))
}

/// Replaces the stored bytes; the name moves too when one is provided. An
/// update that carries no data is rejected.
pub async fn update_image(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateImageRequest>,
) -> Result<Json<UpdateImageResponse>, ApiError> {
    tracing::info!("updating image {}", id);

    let crud = ImageCrud::new(state.db.clone());

    let mut image = crud
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    let data = match req.data {
        Some(d) if !d.is_empty() => d,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No image provided to update")),
            ))
        }
    };

    if BASE64.decode(&data).is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Image data is not valid base64")),
        ));
    }
    image.data = Some(data);

    if let Some(name) = req.name.filter(|n| !n.is_empty()) {
        image.name = name;
    }

    crud.update(&image).await.map_err(internal)?;

    Ok(Json(UpdateImageResponse {
        success: true,
        message: "Image updated successfully",
        image: image.into(),
    }))
}

/// The stored bytes, decoded, with a sniffed content type. Rows without data
/// are treated as missing.
pub async fn get_image_data(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), ApiError> {
    tracing::info!("getting image data for {}", id);

    let image = ImageCrud::new(state.db.clone())
        .find_by_id(&id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;

    let data = image.data.ok_or_else(not_found)?;
    let bytes = BASE64.decode(&data).map_err(|_| not_found())?;
    let mime = sniff_mime(&bytes);

    Ok(([(header::CONTENT_TYPE, mime)], bytes))
}

pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("deleting image {}", id);

    let crud = ImageCrud::new(state.db.clone());

    if crud.find_by_id(&id).await.map_err(internal)?.is_none() {
        return Err(not_found());
    }

    crud.delete(&id).await.map_err(internal)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Image deleted successfully",
    }))
}
