use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn room_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/rooms",
            get(controller::list_rooms).post(controller::create_room),
        )
        .route(
            "/rooms/{id}",
            get(controller::get_room)
                .put(controller::update_room)
                .delete(controller::delete_room),
        )
        .route(
            "/companies/{id}/rooms",
            get(controller::list_rooms_by_company),
        )
}
