use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn image_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/images",
            get(controller::list_images).post(controller::create_image),
        )
        .route(
            "/images/{name}",
            get(controller::get_image_by_name)
                .put(controller::update_image)
                .delete(controller::delete_image),
        )
        .route("/images/data/{id}", get(controller::get_image_data))
}
