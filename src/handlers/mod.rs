//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod page;
pub mod predict;
pub mod views;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::FareOrchestrator;
use crate::utils::error::{helpers::not_found_error, AppError};
use anyhow::Result;
use axum::{http::Uri, middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub orchestrator: FareOrchestrator,
    pub started_at: Instant,
}

/// Create application router
pub fn create_router(settings: Settings) -> Result<Router> {
    let orchestrator = FareOrchestrator::new(&settings)?;

    let app_state = Arc::new(AppState {
        settings,
        orchestrator,
        started_at: Instant::now(),
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let router = Router::new()
        .route("/", get(page::index))
        .route("/api/predict", post(predict::handle_predict))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .fallback(not_found)
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}

async fn not_found(uri: Uri) -> AppError {
    not_found_error(uri.path().to_string())
}
