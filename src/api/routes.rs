//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorturl`        - Create a short code for a URL
/// - `GET  /shorturl/{code}` - Redirect to the URL stored for a code
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorturl", post(shorten_handler))
        .route("/shorturl/{code}", get(redirect_handler))
}
