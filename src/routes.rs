// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{health, quiz},
    state::AppState,
};

/// Assembles the application router.
///
/// * `GET /` liveness, `POST /generate-quiz` quiz generation.
/// * Applies global middleware (Trace, CORS, body size limit).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::liveness))
        .route("/generate-quiz", post(quiz::generate_quiz))
        // Global Middleware (applied from outside in)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
