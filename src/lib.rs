pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{response::Json, routing::get, BoxError, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_middleware;
use state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Assemble the full API router over an [`AppState`].
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/cars", routes::car_routes::create_car_router())
        .nest("/api/bookings", routes::booking_routes::create_booking_router())
        .nest("/api/user", routes::user_routes::create_user_router())
        .nest("/api/admin", routes::admin_routes::create_admin_router())
        .nest("/api/settings", routes::settings_routes::create_settings_router())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(REQUEST_TIMEOUT),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timeout", "code": "REQUEST_TIMEOUT" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error", "code": "INTERNAL_ERROR" })),
        )
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "vehiql-marketplace",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
