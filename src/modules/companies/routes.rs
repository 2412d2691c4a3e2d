use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

use super::controller;

pub fn company_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/companies",
            get(controller::list_companies).post(controller::create_company),
        )
        .route(
            "/companies/{id}",
            get(controller::get_company)
                .put(controller::update_company)
                .delete(controller::delete_company),
        )
        .route(
            "/users/{id}/companies",
            get(controller::list_companies_by_user),
        )
}
