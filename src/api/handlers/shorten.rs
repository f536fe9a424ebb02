//! Handler for the short URL creation endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a URL whose host resolves.
///
/// # Endpoint
///
/// `POST /api/shorturl`
///
/// # Request Body
///
/// Form-encoded (`url=https://www.example.com`) or JSON:
///
/// ```json
/// { "url": "https://www.example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "original_url": "https://www.example.com", "short_url": "aB3dE5f" }
/// ```
///
/// # Errors
///
/// Returns 400 `{"error": "Invalid URL"}` if the URL is malformed or its
/// host does not resolve. Returns 500 on storage failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: ShortenRequest,
) -> Result<Json<ShortenResponse>, AppError> {
    let record = state.shortening_service.shorten(&payload.url).await?;

    Ok(Json(ShortenResponse {
        original_url: record.original_url,
        short_url: record.code,
    }))
}
