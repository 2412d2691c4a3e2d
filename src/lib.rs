pub mod config;
pub mod modules;
pub mod services;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::{Any, CorsLayer}, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::DbPool;
use modules::auth::auth_routes;
use modules::companies::company_routes;
use modules::images::image_routes;
use modules::reservations::reservation_routes;
use modules::rooms::room_routes;
use modules::users::user_routes;
use services::jwt::JwtService;

pub struct AppState {
    pub db: DbPool,
    pub jwt_service: JwtService,
}

pub async fn create_app(db: DbPool, jwt_service: JwtService) -> Router {
    let state = Arc::new(AppState { db, jwt_service });

    let api = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(company_routes())
        .merge(room_routes())
        .merge(reservation_routes())
        .merge(image_routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(RequestBodyLimitLayer::new(1024 * 1024 * 10)) // 10MB: image payloads travel as base64 JSON
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400))
}

async fn root() -> &'static str {
    "Greenwork Booking API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
