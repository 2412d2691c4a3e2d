use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn reservation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reservations",
            get(controller::list_reservations).post(controller::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(controller::get_reservation)
                .put(controller::update_reservation)
                .delete(controller::delete_reservation),
        )
        .route(
            "/reservations/{id}/cancel",
            put(controller::cancel_reservation),
        )
        .route(
            "/users/{id}/reservations",
            get(controller::list_reservations_by_user),
        )
        .route(
            "/rooms/{id}/reservations",
            get(controller::list_reservations_by_room),
        )
}
