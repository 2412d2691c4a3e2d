use serde::{Deserialize, Serialize};

use super::model::Image;

#[derive(Debug, Deserialize)]
pub struct CreateImageRequest {
    pub name: Option<String>,
    /// Base64-encoded bytes.
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub id: String,
    pub name: String,
}

impl From<Image> for ImageSummary {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            name: image.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: String,
    pub name: String,
    pub data: Option<String>,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            name: image.name,
            data: image.data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateImageResponse {
    pub success: bool,
    pub message: &'static str,
    pub image: ImageSummary,
}

#[derive(Debug, Deserialize)]
pub struct UpdateImageRequest {
    pub name: Option<String>,
    /// Base64-encoded replacement bytes.
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateImageResponse {
    pub success: bool,
    pub message: &'static str,
    pub image: ImageResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}
