use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(controller::register))
        .route(
            "/users",
            get(controller::list_users).post(controller::create_user),
        )
        .route(
            "/users/{id}",
            get(controller::get_user)
                .put(controller::update_user)
                .delete(controller::delete_user),
        )
        .route(
            "/users/{id}/change-password",
            post(controller::change_password),
        )
}
