//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, and gzip compression, the
//! JSON 404 fallback, and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use davenport_core::error::DavenportError;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The widget is served from a separate dev origin; mirror the original's
    // open CORS policy.
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/bot-response", post(handlers::bot_response))
        .route("/api/status", get(handlers::status))
        .route("/api/handle-order", post(handlers::handle_order))
        .route("/api/check-order", post(handlers::check_order))
        .route("/api/update-delivery", post(handlers::update_delivery))
        .route("/api/cancel-order", post(handlers::cancel_order))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
pub async fn start_server(state: AppState) -> Result<(), DavenportError> {
    let addr = format!("{}:{}", state.config.server.bind, state.config.server.port);
    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DavenportError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| DavenportError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
