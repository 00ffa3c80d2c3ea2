//! Rutas HTTP
//!
//! Construye el router completo: rutas de carros protegidas por API key,
//! health check público, CORS y trazas de requests.

pub mod car_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .merge(car_routes::create_car_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "car-dealership",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
