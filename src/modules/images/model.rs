use sqlx::FromRow;

/// `data` holds the base64-encoded bytes. It is only serialized by the
/// endpoints that exist to return it.
#[derive(Debug, Clone, FromRow)]
pub struct Image {
    pub id: String,
    pub name: String,
    pub data: Option<String>,
}
