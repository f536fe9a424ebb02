//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/shorturl`        - Create a short code
//! - `GET  /api/shorturl/{code}` - Redirect to the stored URL
//! - `GET  /health`              - Health check: database and cache
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling (applied in [`crate::server`])

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes::routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}
